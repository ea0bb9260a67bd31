//! Shape matching and node synthesis for the legacy constructs.

use jsmz_common::ScriptKind;
use jsmz_parser::parser::node_flags;
use jsmz_parser::{NodeIndex, SourceFile, parse_source_file};
use jsmz_patch::{
    is_export_list_assignment, is_lazy_binding_call, synthesize_export_object,
    synthesize_lazy_declaration,
};

fn parse(source: &str) -> SourceFile {
    parse_source_file("/m/Test.jsm", source.to_string(), ScriptKind::JS)
}

fn expression_at(file: &SourceFile, statement: usize) -> NodeIndex {
    let stmt = file.statements.nodes[statement];
    file.arena
        .get_expression_statement(file.arena.get(stmt).unwrap())
        .unwrap()
        .expression
}

fn export_matches(source: &str) -> bool {
    let file = parse(source);
    is_export_list_assignment(&file.arena, expression_at(&file, 0))
}

fn lazy_matches(source: &str) -> bool {
    let file = parse(source);
    is_lazy_binding_call(&file.arena, expression_at(&file, 0))
}

#[test]
fn test_export_list_assignment_shapes() {
    assert!(export_matches(r#"this.EXPORTED_SYMBOLS = ["A", "B"];"#));
    assert!(export_matches(r#"foo.bar.EXPORTED_SYMBOLS = x;"#));

    assert!(!export_matches(r#"EXPORTED_SYMBOLS = ["A"];"#));
    assert!(!export_matches(r#"this["EXPORTED_SYMBOLS"] = ["A"];"#));
    assert!(!export_matches(r#"this.EXPORTED_SYMBOLS += ["A"];"#));
    assert!(!export_matches(r#"this.EXPORTED = ["A"];"#));
    assert!(!export_matches(r#"this.EXPORTED_SYMBOLS;"#));
}

#[test]
fn test_lazy_binding_call_shapes() {
    for method in [
        "defineLazyGetter",
        "defineLazyServiceGetter",
        "defineLazyPreferenceGetter",
    ] {
        let source = format!(r#"XPCOMUtils.{method}(this, "foo", "x");"#);
        assert!(lazy_matches(&source), "{method} should match");
    }

    // Too few arguments
    assert!(!lazy_matches(r#"XPCOMUtils.defineLazyGetter(this, "foo");"#));
    // Receiver must be `this`
    assert!(!lazy_matches(r#"XPCOMUtils.defineLazyGetter(obj, "foo", f);"#));
    // Name must be a string literal
    assert!(!lazy_matches(r#"XPCOMUtils.defineLazyGetter(this, foo, f);"#));
    assert!(!lazy_matches(r#"XPCOMUtils.defineLazyGetter(this, `foo`, f);"#));
    // Unknown helper or receiver
    assert!(!lazy_matches(r#"XPCOMUtils.defineLazyModuleGetter(this, "foo", f);"#));
    assert!(!lazy_matches(r#"Utils.defineLazyGetter(this, "foo", f);"#));
    assert!(!lazy_matches(r#"defineLazyGetter(this, "foo", f);"#));
    assert!(!lazy_matches(r#"a.XPCOMUtils.defineLazyGetter(this, "foo", f);"#));
}

#[test]
fn test_matchers_do_not_overlap() {
    let file = parse(r#"this.EXPORTED_SYMBOLS = []; XPCOMUtils.defineLazyGetter(this, "a", f);"#);
    assert!(is_export_list_assignment(&file.arena, expression_at(&file, 0)));
    assert!(is_lazy_binding_call(&file.arena, expression_at(&file, 1)));
    assert!(!is_lazy_binding_call(&file.arena, expression_at(&file, 0)));
    assert!(!is_export_list_assignment(&file.arena, expression_at(&file, 1)));
}

#[test]
fn test_export_object_copies_element_ranges() {
    let mut file = parse(r#"this.EXPORTED_SYMBOLS = ["A", "B"];"#);
    let assignment = expression_at(&file, 0);
    let before = file.arena.len();

    let object = synthesize_export_object(&mut file.arena, assignment).unwrap();
    assert!(file.arena.len() > before);

    let node = file.arena.get(object).unwrap();
    assert!(node.has_flag(node_flags::SYNTHESIZED));
    assert_eq!((node.pos, node.end), (23, 34));

    let properties = file
        .arena
        .get_object_literal(node)
        .unwrap()
        .elements
        .nodes
        .clone();
    assert_eq!(properties.len(), 2);

    let expected = [("A", 25, 28), ("B", 29, 33)];
    for (property, (name, pos, end)) in properties.into_iter().zip(expected) {
        let prop_node = file.arena.get(property).unwrap();
        assert_eq!((prop_node.pos, prop_node.end), (pos, end));
        let name_node = file.arena.get_shorthand_property(prop_node).unwrap().name;
        assert_eq!(file.arena.identifier_text(name_node), Some(name));
        let name_range = file.arena.get(name_node).map(|n| (n.pos, n.end));
        assert_eq!(name_range, Some((pos, end)));
    }
}

#[test]
fn test_export_object_skips_non_textual_elements() {
    let mut file = parse(r#"this.EXPORTED_SYMBOLS = ["A", Bee, 3, f(), "C"];"#);
    let assignment = expression_at(&file, 0);
    let object = synthesize_export_object(&mut file.arena, assignment).unwrap();
    let node = file.arena.get(object).unwrap();
    let names: Vec<&str> = file
        .arena
        .get_object_literal(node)
        .unwrap()
        .elements
        .iter()
        .map(|prop| {
            let prop_node = file.arena.get(prop).unwrap();
            let name = file.arena.get_shorthand_property(prop_node).unwrap().name;
            file.arena.identifier_text(name).unwrap()
        })
        .collect();
    assert_eq!(names, vec!["A", "Bee", "C"]);
}

#[test]
fn test_export_object_requires_array() {
    let mut file = parse(r#"this.EXPORTED_SYMBOLS = names;"#);
    let assignment = expression_at(&file, 0);
    let before = file.arena.len();
    assert_eq!(synthesize_export_object(&mut file.arena, assignment), None);
    assert_eq!(file.arena.len(), before);
}

#[test]
fn test_lazy_declaration_name_range() {
    let source = r#"XPCOMUtils.defineLazyGetter(this, "foo", function() { return 1; });"#;
    let mut file = parse(source);
    let call = expression_at(&file, 0);

    let declaration = synthesize_lazy_declaration(&mut file.arena, call).unwrap();
    let decl_node = file.arena.get(declaration).unwrap();
    assert!(decl_node.has_flag(node_flags::SYNTHESIZED));
    let data = file.arena.get_variable_declaration(decl_node).unwrap();
    assert!(data.initializer.is_none());

    let name_node = file.arena.get(data.name).unwrap();
    assert_eq!(file.arena.identifier_text(data.name), Some("foo"));
    assert_eq!((name_node.pos, name_node.end), (35, 38));
    assert_eq!(&source[name_node.pos as usize..name_node.end as usize], "foo");
}

#[test]
fn test_lazy_declaration_range_is_clamped() {
    // No space before the literal: the name range still never inverts.
    let mut file = parse(r#"XPCOMUtils.defineLazyGetter(this,"",f);"#);
    let call = expression_at(&file, 0);
    let declaration = synthesize_lazy_declaration(&mut file.arena, call).unwrap();
    let data = file
        .arena
        .get_variable_declaration(file.arena.get(declaration).unwrap())
        .unwrap();
    let name_node = file.arena.get(data.name).unwrap();
    assert!(name_node.pos <= name_node.end);
    assert_eq!(file.arena.identifier_text(data.name), Some(""));
}
