//! Name binder for the jsmz compiler layer.
//!
//! Binds the top level of a source file: declared locals, plus the
//! CommonJS-style exports of JavaScript files (`module.exports = {...}`,
//! `exports.x = ...`, `this.x = ...`).

pub mod symbols;
pub use symbols::{Symbol, SymbolArena, SymbolId, SymbolTable, symbol_flags};

pub mod special_assignment;
pub use special_assignment::{
    AssignmentClassifier, AssignmentDeclarationKind, DefaultAssignmentClassifier,
    get_special_property_assignment_kind,
};

pub mod state;
pub use state::{BinderState, EXPORT_EQUALS, SpecialAssignment};
