//! Shape predicates for the legacy module constructs.
//!
//! Both predicates fail closed: a missing node or an unexpected kind anywhere
//! in the shape is simply "no match".

use jsmz_parser::{NodeArena, NodeIndex};
use jsmz_scanner::SyntaxKind;

/// Global the exported name list is assigned to.
pub const EXPORTED_SYMBOLS: &str = "EXPORTED_SYMBOLS";

/// Receiver of the lazy binding helpers.
pub const XPCOM_UTILS: &str = "XPCOMUtils";

pub const LAZY_BINDING_METHODS: [&str; 3] = [
    "defineLazyGetter",
    "defineLazyServiceGetter",
    "defineLazyPreferenceGetter",
];

/// `<expr>.EXPORTED_SYMBOLS = <anything>`
pub fn is_export_list_assignment(arena: &NodeArena, expr: NodeIndex) -> bool {
    let Some(binary) = arena.get(expr).and_then(|node| arena.get_binary_expr(node)) else {
        return false;
    };
    binary.operator_token == SyntaxKind::EqualsToken
        && arena
            .get(binary.left)
            .and_then(|node| arena.get_property_access(node))
            .is_some_and(|access| {
                arena.identifier_text(access.name_or_argument) == Some(EXPORTED_SYMBOLS)
            })
}

/// `XPCOMUtils.<lazy helper>(this, "name", ...)` with at least three arguments.
pub fn is_lazy_binding_call(arena: &NodeArena, expr: NodeIndex) -> bool {
    let Some(call) = arena.get(expr).and_then(|node| arena.get_call_expr(node)) else {
        return false;
    };
    let Some(callee) = arena
        .get(call.expression)
        .and_then(|node| arena.get_property_access(node))
    else {
        return false;
    };

    if arena.identifier_text(callee.expression) != Some(XPCOM_UTILS) {
        return false;
    }
    let is_lazy_helper = arena
        .identifier_text(callee.name_or_argument)
        .is_some_and(|method| LAZY_BINDING_METHODS.contains(&method));
    if !is_lazy_helper || call.arguments.len() <= 2 {
        return false;
    }

    let receiver_is_this = call
        .arguments
        .get(0)
        .is_some_and(|arg| arena.is_this_keyword(arg));
    let name_is_string = call
        .arguments
        .get(1)
        .and_then(|arg| arena.get(arg))
        .is_some_and(|node| arena.get_string_literal(node).is_some());
    receiver_is_this && name_is_string
}
