//! Classification of CommonJS-style assignments in JavaScript files.

use jsmz_parser::{NodeArena, NodeData, NodeIndex};
use jsmz_scanner::SyntaxKind;
use serde::Serialize;

/// What an assignment expression declares. Numeric values match the host
/// checker's `AssignmentDeclarationKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum AssignmentDeclarationKind {
    None = 0,
    /// `exports.name = expr` / `module.exports.name = expr`
    ExportsProperty = 1,
    /// `module.exports = expr`
    ModuleExports = 2,
    /// `F.prototype.name = expr`
    PrototypeProperty = 3,
    /// `this.name = expr`
    ThisProperty = 4,
    /// `F.name = expr`
    Property = 5,
    /// `F.prototype = { ... }`
    Prototype = 6,
}

/// Decides the declaration kind of an assignment while binding.
///
/// The binder calls back through this seam for every top-level expression
/// statement of a JavaScript file, so a host can substitute its own rules.
pub trait AssignmentClassifier {
    fn classify_assignment(&self, arena: &NodeArena, expr: NodeIndex) -> AssignmentDeclarationKind;
}

/// Classifier with the built-in rules only.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAssignmentClassifier;

impl AssignmentClassifier for DefaultAssignmentClassifier {
    fn classify_assignment(&self, arena: &NodeArena, expr: NodeIndex) -> AssignmentDeclarationKind {
        get_special_property_assignment_kind(arena, expr)
    }
}

pub fn get_special_property_assignment_kind(
    arena: &NodeArena,
    expr: NodeIndex,
) -> AssignmentDeclarationKind {
    let Some(binary) = arena.get(expr).and_then(|node| arena.get_binary_expr(node)) else {
        return AssignmentDeclarationKind::None;
    };
    if binary.operator_token != SyntaxKind::EqualsToken {
        return AssignmentDeclarationKind::None;
    }
    let Some(access) = arena
        .get(binary.left)
        .and_then(|node| arena.get_property_access(node))
    else {
        return AssignmentDeclarationKind::None;
    };

    let target = access.expression;
    let Some(name) = arena.identifier_text(access.name_or_argument) else {
        return AssignmentDeclarationKind::None;
    };

    if is_module_exports(arena, binary.left) {
        return AssignmentDeclarationKind::ModuleExports;
    }
    if arena.identifier_text(target) == Some("exports") || is_module_exports(arena, target) {
        return AssignmentDeclarationKind::ExportsProperty;
    }
    if arena.is_this_keyword(target) {
        return AssignmentDeclarationKind::ThisProperty;
    }
    if name == "prototype" && is_entity_name(arena, target) {
        return AssignmentDeclarationKind::Prototype;
    }
    if let Some(inner) = arena.get(target).and_then(|node| arena.get_property_access(node))
        && arena.identifier_text(inner.name_or_argument) == Some("prototype")
        && is_entity_name(arena, inner.expression)
    {
        return AssignmentDeclarationKind::PrototypeProperty;
    }
    if is_entity_name(arena, target) {
        return AssignmentDeclarationKind::Property;
    }
    AssignmentDeclarationKind::None
}

/// `module.exports`
fn is_module_exports(arena: &NodeArena, index: NodeIndex) -> bool {
    arena
        .get(index)
        .and_then(|node| arena.get_property_access(node))
        .is_some_and(|access| {
            arena.identifier_text(access.expression) == Some("module")
                && arena.identifier_text(access.name_or_argument) == Some("exports")
        })
}

/// Identifier or dotted name (`a`, `a.b.c`).
fn is_entity_name(arena: &NodeArena, index: NodeIndex) -> bool {
    match arena.get(index).map(|node| &node.data) {
        Some(NodeData::Identifier(_)) => true,
        Some(NodeData::PropertyAccess(access)) => {
            !access.question_dot_token && is_entity_name(arena, access.expression)
        }
        _ => false,
    }
}
