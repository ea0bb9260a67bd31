//! Statement and expression shapes produced by the parser.

use jsmz_common::ScriptKind;
use jsmz_parser::parser::node_flags;
use jsmz_parser::{NodeData, NodeIndex, ParserState, SourceFile, parse_source_file};
use jsmz_scanner::SyntaxKind;

fn parse(source: &str) -> SourceFile {
    ParserState::new("test.js".to_string(), source.to_string()).parse_source_file()
}

fn statement_kinds(file: &SourceFile) -> Vec<SyntaxKind> {
    file.statements
        .iter()
        .map(|stmt| file.arena.kind_of(stmt).unwrap())
        .collect()
}

fn expression_of(file: &SourceFile, stmt: NodeIndex) -> NodeIndex {
    let node = file.arena.get(stmt).unwrap();
    file.arena.get_expression_statement(node).unwrap().expression
}

#[test]
fn test_export_list_assignment_shape() {
    let source = r#"this.EXPORTED_SYMBOLS = ["A", "B"];"#;
    let file = parse(source);
    assert!(file.parse_diagnostics.is_empty(), "{:?}", file.parse_diagnostics);
    assert_eq!(statement_kinds(&file), vec![SyntaxKind::ExpressionStatement]);

    let expr = expression_of(&file, file.statements.nodes[0]);
    let binary = file
        .arena
        .get_binary_expr(file.arena.get(expr).unwrap())
        .unwrap();
    assert_eq!(binary.operator_token, SyntaxKind::EqualsToken);

    let left = file
        .arena
        .get_property_access(file.arena.get(binary.left).unwrap())
        .unwrap();
    assert!(file.arena.is_this_keyword(left.expression));
    assert_eq!(
        file.arena.identifier_text(left.name_or_argument),
        Some("EXPORTED_SYMBOLS")
    );

    let array_node = file.arena.get(binary.right).unwrap();
    let array = file.arena.get_array_literal(array_node).unwrap();
    assert_eq!(array.elements.len(), 2);
    assert_eq!((array_node.pos, array_node.end), (23, 34));
    assert_eq!((array.elements.pos, array.elements.end), (25, 33));

    let first = file.arena.get(array.elements.nodes[0]).unwrap();
    let second = file.arena.get(array.elements.nodes[1]).unwrap();
    assert_eq!((first.pos, first.end), (25, 28));
    // Full start includes the space after the comma.
    assert_eq!((second.pos, second.end), (29, 33));
    assert_eq!(file.arena.text_of_name(array.elements.nodes[1]), Some("B"));
}

#[test]
fn test_variable_statement_flags_and_names() {
    let source = "var x, y;\nlet a = 1;\nconst b = 2;\n";
    let file = parse(source);
    assert_eq!(
        statement_kinds(&file),
        vec![SyntaxKind::VariableStatement; 3]
    );

    let decls = file
        .arena
        .variable_statement_declarations(file.statements.nodes[0])
        .unwrap();
    let names: Vec<_> = decls
        .iter()
        .map(|&decl| {
            let node = file.arena.get(decl).unwrap();
            let data = file.arena.get_variable_declaration(node).unwrap();
            file.arena.identifier_text(data.name).unwrap()
        })
        .collect();
    assert_eq!(names, vec!["x", "y"]);

    let list_flags = |stmt: NodeIndex| {
        let node = file.arena.get(stmt).unwrap();
        let var = file.arena.get_variable(node).unwrap();
        file.arena.get(var.declaration_list).unwrap().flags
    };
    assert_eq!(list_flags(file.statements.nodes[0]), node_flags::NONE);
    assert_eq!(list_flags(file.statements.nodes[1]), node_flags::LET);
    assert_eq!(list_flags(file.statements.nodes[2]), node_flags::CONST);
}

#[test]
fn test_declare_var_with_object_type() {
    let source = "declare var MessageChannel: {\n    prototype: MessageChannel;\n    new(): MessageChannel;\n};\n";
    let file = parse_source_file("lib.dom.d.ts", source.to_string(), ScriptKind::Unknown);
    assert_eq!(file.script_kind, ScriptKind::TS);
    assert!(file.parse_diagnostics.is_empty(), "{:?}", file.parse_diagnostics);
    assert_eq!(statement_kinds(&file), vec![SyntaxKind::VariableStatement]);

    let stmt = file.statements.nodes[0];
    assert!(file.arena.get(stmt).unwrap().has_flag(node_flags::AMBIENT));
    let decls = file.arena.variable_statement_declarations(stmt).unwrap();
    let decl = file
        .arena
        .get_variable_declaration(file.arena.get(decls[0]).unwrap())
        .unwrap();
    assert_eq!(file.arena.identifier_text(decl.name), Some("MessageChannel"));
    assert!(decl.initializer.is_none());
}

#[test]
fn test_lazy_getter_call_shape() {
    let source = r#"XPCOMUtils.defineLazyGetter(this, "foo", function() { return 1; });"#;
    let file = parse(source);
    assert!(file.parse_diagnostics.is_empty(), "{:?}", file.parse_diagnostics);

    let expr = expression_of(&file, file.statements.nodes[0]);
    let call = file
        .arena
        .get_call_expr(file.arena.get(expr).unwrap())
        .unwrap();
    assert_eq!(call.arguments.len(), 3);

    let callee = file
        .arena
        .get_property_access(file.arena.get(call.expression).unwrap())
        .unwrap();
    assert_eq!(file.arena.identifier_text(callee.expression), Some("XPCOMUtils"));
    assert_eq!(
        file.arena.identifier_text(callee.name_or_argument),
        Some("defineLazyGetter")
    );

    let args: Vec<_> = call.arguments.iter().collect();
    assert!(file.arena.is_this_keyword(args[0]));
    let name = file
        .arena
        .get_string_literal(file.arena.get(args[1]).unwrap())
        .unwrap();
    assert_eq!(name.text, "foo");
    assert_eq!(
        file.arena.kind_of(args[2]),
        Some(SyntaxKind::FunctionExpression)
    );
}

#[test]
fn test_unmodeled_statements_are_skipped_whole() {
    let source = r"
if (a) { b(); } else { c(); }
function f(x) { return x; }
class K extends B { m() {} }
for (let i = 0; i < 3; i++) {}
var z = 1;
";
    let file = parse(source);
    assert!(file.parse_diagnostics.is_empty(), "{:?}", file.parse_diagnostics);
    assert_eq!(
        statement_kinds(&file),
        vec![
            SyntaxKind::SkippedStatement,
            SyntaxKind::FunctionDeclaration,
            SyntaxKind::ClassDeclaration,
            SyntaxKind::SkippedStatement,
            SyntaxKind::VariableStatement,
        ]
    );

    let func = file
        .arena
        .get_named_declaration(file.arena.get(file.statements.nodes[1]).unwrap())
        .unwrap();
    assert_eq!(file.arena.identifier_text(func.name), Some("f"));
    let class = file
        .arena
        .get_named_declaration(file.arena.get(file.statements.nodes[2]).unwrap())
        .unwrap();
    assert_eq!(file.arena.identifier_text(class.name), Some("K"));
}

#[test]
fn test_import_module_specifiers() {
    let source = "import { a } from \"./a\";\nimport \"./b\";\nimport * as c from './c';\n";
    let file = parse(source);
    assert!(file.parse_diagnostics.is_empty(), "{:?}", file.parse_diagnostics);
    let specifiers: Vec<_> = file
        .module_specifiers()
        .into_iter()
        .map(|(spec, _)| spec)
        .collect();
    assert_eq!(specifiers, vec!["./a", "./b", "./c"]);
}

#[test]
fn test_automatic_semicolon_insertion() {
    let source = "var a = 1\nvar b = foo\n  .bar\nthis.x = 2\n";
    let file = parse(source);
    assert!(file.parse_diagnostics.is_empty(), "{:?}", file.parse_diagnostics);
    assert_eq!(
        statement_kinds(&file),
        vec![
            SyntaxKind::VariableStatement,
            SyntaxKind::VariableStatement,
            SyntaxKind::ExpressionStatement,
        ]
    );

    let decls = file
        .arena
        .variable_statement_declarations(file.statements.nodes[1])
        .unwrap();
    let decl = file
        .arena
        .get_variable_declaration(file.arena.get(decls[0]).unwrap())
        .unwrap();
    assert_eq!(
        file.arena.kind_of(decl.initializer),
        Some(SyntaxKind::PropertyAccessExpression)
    );
}

#[test]
fn test_object_literal_elements() {
    let source = "var o = { a, b: 1, get c() { return 1; }, ...d, [e]: 2 };";
    let file = parse(source);
    assert!(file.parse_diagnostics.is_empty(), "{:?}", file.parse_diagnostics);

    let decls = file
        .arena
        .variable_statement_declarations(file.statements.nodes[0])
        .unwrap();
    let decl = file
        .arena
        .get_variable_declaration(file.arena.get(decls[0]).unwrap())
        .unwrap();
    let object = file
        .arena
        .get_object_literal(file.arena.get(decl.initializer).unwrap())
        .unwrap();
    let kinds: Vec<_> = object
        .elements
        .iter()
        .map(|el| file.arena.kind_of(el).unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::ShorthandPropertyAssignment,
            SyntaxKind::PropertyAssignment,
            SyntaxKind::FunctionExpression,
            SyntaxKind::SkippedExpression,
            SyntaxKind::PropertyAssignment,
        ]
    );
}

#[test]
fn test_unterminated_string_reports_ts1002() {
    let source = "var s = \"abc\nvar t;\n";
    let file = parse(source);
    let errors: Vec<_> = file
        .parse_diagnostics
        .iter()
        .filter(|d| d.code == 1002)
        .collect();
    assert_eq!(errors.len(), 1, "Expected one TS1002 error");
}

#[test]
fn test_leading_trivia_is_part_of_full_start() {
    let source = "// lead\nvar x;";
    let file = parse(source);
    let stmt = file.statements.nodes[0];
    assert_eq!(file.arena.get(stmt).unwrap().pos, 0);
    assert_eq!(file.token_start(stmt), Some(8));
    assert_eq!(file.node_text(stmt), Some("var x;"));
}
