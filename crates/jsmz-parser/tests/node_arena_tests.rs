//! Factory and update methods on `NodeArena`.

use jsmz_parser::parser::node_flags;
use jsmz_parser::{NodeArena, NodeData, NodeIndex, NodeList, ParserState};
use jsmz_scanner::SyntaxKind;

#[test]
fn test_factory_nodes_are_synthesized_with_empty_range() {
    let mut arena = NodeArena::new();
    let prop = arena.create_shorthand_property_assignment("Foo");
    let node = arena.get(prop).unwrap();

    assert_eq!(node.kind(), SyntaxKind::ShorthandPropertyAssignment);
    assert!(node.has_flag(node_flags::SYNTHESIZED));
    assert_eq!((node.pos, node.end), (0, 0));

    let name = arena.get_shorthand_property(node).unwrap().name;
    assert_eq!(arena.identifier_text(name), Some("Foo"));
    assert!(arena.get(name).unwrap().has_flag(node_flags::SYNTHESIZED));

    assert!(arena.set_text_range(prop, 10, 15));
    let node = arena.get(prop).unwrap();
    assert_eq!((node.pos, node.end), (10, 15));
}

#[test]
fn test_object_literal_factory_keeps_property_order() {
    let mut arena = NodeArena::new();
    let a = arena.create_shorthand_property_assignment("A");
    let b = arena.create_shorthand_property_assignment("B");
    let object = arena.create_object_literal(vec![a, b]);

    assert_eq!(arena.kind_of(object), Some(SyntaxKind::ObjectLiteralExpression));
    assert_eq!(arena.children(object), vec![a, b]);
}

#[test]
fn test_variable_declaration_factory_has_no_initializer() {
    let mut arena = NodeArena::new();
    let decl = arena.create_variable_declaration("lazy");
    let data = arena
        .get_variable_declaration(arena.get(decl).unwrap())
        .unwrap();
    assert!(data.initializer.is_none());
    assert_eq!(arena.identifier_text(data.name), Some("lazy"));
    assert_eq!(arena.children(decl), vec![data.name]);
}

#[test]
fn test_rewrites_replace_child_fields_in_place() {
    let mut file =
        ParserState::new("a.js".to_string(), "x = 1;\nvar a, b;".to_string()).parse_source_file();
    let nodes_before = file.arena.len();

    let stmt = file.statements.nodes[0];
    let expr = file
        .arena
        .get_expression_statement(file.arena.get(stmt).unwrap())
        .unwrap()
        .expression;

    let replacement = file.arena.create_identifier("y");
    assert!(file.arena.set_binary_right(expr, replacement));
    let binary = file
        .arena
        .get_binary_expr(file.arena.get(expr).unwrap())
        .unwrap();
    assert_eq!(binary.right, replacement);

    let var_stmt = file.statements.nodes[1];
    let list = match &file.arena.get(var_stmt).unwrap().data {
        NodeData::VariableStatement(var) => var.declaration_list,
        other => panic!("expected variable statement, got {other:?}"),
    };
    let mut decls = file
        .arena
        .variable_statement_declarations(var_stmt)
        .unwrap()
        .to_vec();
    decls.push(file.arena.create_variable_declaration("c"));
    assert!(file.arena.set_declarations(list, decls.clone()));
    assert_eq!(
        file.arena.variable_statement_declarations(var_stmt).unwrap(),
        decls.as_slice()
    );

    // Append-only: nothing was removed.
    assert_eq!(file.arena.len(), nodes_before + 3);
}

#[test]
fn test_updates_reject_wrong_kinds_and_none() {
    let mut arena = NodeArena::new();
    let ident = arena.create_identifier("x");

    assert!(!arena.set_binary_right(ident, NodeIndex::NONE));
    assert!(!arena.set_declarations(ident, Vec::new()));
    assert!(!arena.set_text_range(NodeIndex::NONE, 1, 2));
    assert!(arena.set_identifier_text(ident, "z"));
    assert_eq!(arena.identifier_text(ident), Some("z"));
    assert!(arena.get(NodeIndex::NONE).is_none());
}

#[test]
fn test_node_list_accessors() {
    let list = NodeList::with_nodes(vec![NodeIndex(3), NodeIndex(7)], 2, 9);
    assert_eq!(list.len(), 2);
    assert_eq!(list.first(), Some(NodeIndex(3)));
    assert_eq!(list.get(1), Some(NodeIndex(7)));
    assert_eq!(list.get(2), None);
    assert!(NodeList::new().is_empty());
    assert!(NodeIndex::default().is_none());
}
