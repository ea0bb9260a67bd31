//! Replacement fragments for matched legacy constructs.
//!
//! Synthesized nodes are appended to the file's arena and flagged
//! `SYNTHESIZED`; ranges are copied from the source nodes they stand in for
//! so diagnostics on them point at the original text.

use jsmz_parser::{NodeArena, NodeData, NodeIndex};
use jsmz_scanner::SyntaxKind;
use tracing::trace;

/// `["A", "B"]` on the right of `list_assignment` → `{ A, B }`.
///
/// Each shorthand property, and its name, takes the range of the array
/// element it came from; the object takes the array's range. Elements that
/// are neither string literals nor identifiers are left out. Returns `None`
/// when the right-hand side is not an array literal.
pub fn synthesize_export_object(
    arena: &mut NodeArena,
    list_assignment: NodeIndex,
) -> Option<NodeIndex> {
    let right = arena
        .get(list_assignment)
        .and_then(|node| arena.get_binary_expr(node))?
        .right;
    let array = arena.get(right)?;
    let (array_pos, array_end) = (array.pos, array.end);
    let elements = arena.get_array_literal(array)?.elements.nodes.clone();

    let mut properties = Vec::with_capacity(elements.len());
    for element in elements {
        let Some((name, pos, end)) = element_name(arena, element) else {
            trace!(element = element.0, "skipping non-textual export element");
            continue;
        };
        let property = arena.create_shorthand_property_assignment(name);
        arena.set_text_range(property, pos, end);
        if let Some(name_node) = arena
            .get(property)
            .and_then(|node| arena.get_shorthand_property(node))
            .map(|prop| prop.name)
        {
            arena.set_text_range(name_node, pos, end);
        }
        properties.push(property);
    }

    let object = arena.create_object_literal(properties);
    arena.set_text_range(object, array_pos, array_end);
    Some(object)
}

/// `XPCOMUtils.defineLazyGetter(this, "name", ...)` → declaration `name`.
///
/// The name node covers the string's contents: two past the literal's full
/// start (one trivia space plus the opening quote) up to before the closing
/// quote.
pub fn synthesize_lazy_declaration(arena: &mut NodeArena, call: NodeIndex) -> Option<NodeIndex> {
    let literal = arena
        .get(call)
        .and_then(|node| arena.get_call_expr(node))?
        .arguments
        .get(1)?;
    let literal_node = arena.get(literal)?;
    let (pos, end) = (literal_node.pos, literal_node.end);
    let name = arena.get_string_literal(literal_node)?.text.clone();

    let declaration = arena.create_variable_declaration(name);
    let name_node = arena
        .get(declaration)
        .and_then(|node| arena.get_variable_declaration(node))?
        .name;
    let name_end = end.saturating_sub(1);
    arena.set_text_range(name_node, pos.saturating_add(2).min(name_end), name_end);
    Some(declaration)
}

fn element_name(arena: &NodeArena, element: NodeIndex) -> Option<(String, u32, u32)> {
    let node = arena.get(element)?;
    let name = match &node.data {
        NodeData::Identifier(ident) => ident.escaped_text.clone(),
        NodeData::Literal(lit)
            if matches!(
                lit.kind,
                SyntaxKind::StringLiteral | SyntaxKind::NoSubstitutionTemplateLiteral
            ) =>
        {
            lit.text.clone()
        }
        _ => return None,
    };
    Some((name, node.pos, node.end))
}
