//! Pre-bind rewrite of legacy modules.
//!
//! Runs once per source file, right before the host binder sees it. The
//! rewrite only touches `.jsm` files and the DOM lib declaration file.

use crate::classify::is_jsm_file;
use crate::matchers::{is_export_list_assignment, is_lazy_binding_call};
use crate::synthesize::{synthesize_export_object, synthesize_lazy_declaration};
use jsmz_binder::{AssignmentDeclarationKind, BinderState};
use jsmz_host::{BindSourceFileFn, ClassifyAssignmentFn, HostApi};
use jsmz_parser::parser::node_flags;
use jsmz_parser::{NodeArena, NodeIndex, SourceFile};
use jsmz_scanner::SyntaxKind;
use std::rc::Rc;
use tracing::{debug, trace};

pub const LIB_DOM: &str = "lib.dom.d.ts";

/// The DOM lib's global that clashes with the legacy module globals.
const MESSAGE_CHANNEL: &str = "MessageChannel";
const RENAMED_SUFFIX: &str = "Dummy";

/// What one rewrite pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteSummary {
    pub exports_rewritten: usize,
    /// Lazy declarations appended to the first variable statement
    pub lazy_declarations: usize,
    /// Lazy declarations dropped because the file has no variable statement
    pub lazy_dropped: usize,
    pub renamed: usize,
}

pub fn is_rewrite_candidate(file_name: &str) -> bool {
    is_jsm_file(file_name) || file_name.ends_with(LIB_DOM)
}

/// Rewrite the legacy constructs of `file` in place.
///
/// Returns `None` without touching the file when it is not a candidate or has
/// already been rewritten.
pub fn rewrite_legacy_module(file: &mut SourceFile) -> Option<RewriteSummary> {
    if file.pre_bind_rewritten || !is_rewrite_candidate(&file.file_name) {
        return None;
    }
    file.pre_bind_rewritten = true;

    let lib_dom = file.file_name.ends_with(LIB_DOM);
    let arena = &mut file.arena;
    let mut summary = RewriteSummary::default();
    let mut first_variable_statement = None;
    let mut lazy_declarations = Vec::new();

    for stmt in file.statements.nodes.iter().copied() {
        let expression = arena
            .get(stmt)
            .and_then(|node| arena.get_expression_statement(node))
            .map(|data| data.expression);

        if let Some(expr) = expression {
            if is_export_list_assignment(arena, expr)
                && let Some(object) = synthesize_export_object(arena, expr)
            {
                arena.set_binary_right(expr, object);
                summary.exports_rewritten += 1;
                trace!(file = %file.file_name, statement = stmt.0, "rewrote exported symbols");
            }
            if is_lazy_binding_call(arena, expr)
                && let Some(declaration) = synthesize_lazy_declaration(arena, expr)
            {
                lazy_declarations.push(declaration);
            }
            continue;
        }

        if arena.kind_of(stmt) == Some(SyntaxKind::VariableStatement) {
            first_variable_statement.get_or_insert(stmt);
            if lib_dom && rename_message_channel(arena, stmt) {
                summary.renamed += 1;
            }
        }
    }

    if !lazy_declarations.is_empty() {
        match first_variable_statement {
            Some(stmt) if append_declarations(arena, stmt, &lazy_declarations) => {
                summary.lazy_declarations = lazy_declarations.len();
            }
            _ => summary.lazy_dropped = lazy_declarations.len(),
        }
    }

    debug!(
        file = %file.file_name,
        exports = summary.exports_rewritten,
        lazy = summary.lazy_declarations,
        dropped = summary.lazy_dropped,
        renamed = summary.renamed,
        "rewrote legacy module"
    );
    Some(summary)
}

/// Declaration list becomes its parsed prefix followed by `declarations`.
fn append_declarations(
    arena: &mut NodeArena,
    statement: NodeIndex,
    declarations: &[NodeIndex],
) -> bool {
    let Some(list) = arena
        .get(statement)
        .and_then(|node| arena.get_variable(node))
        .map(|var| var.declaration_list)
    else {
        return false;
    };
    let Some(existing) = arena.variable_statement_declarations(statement) else {
        return false;
    };

    let mut combined: Vec<NodeIndex> = existing
        .iter()
        .copied()
        .take_while(|&decl| {
            !arena
                .get(decl)
                .is_some_and(|node| node.has_flag(node_flags::SYNTHESIZED))
        })
        .collect();
    combined.extend_from_slice(declarations);
    arena.set_declarations(list, combined)
}

fn rename_message_channel(arena: &mut NodeArena, statement: NodeIndex) -> bool {
    let Some(first) = arena
        .variable_statement_declarations(statement)
        .and_then(|declarations| declarations.first().copied())
    else {
        return false;
    };
    let Some(name) = arena
        .get(first)
        .and_then(|node| arena.get_variable_declaration(node))
        .map(|decl| decl.name)
    else {
        return false;
    };
    if arena.identifier_text(name) != Some(MESSAGE_CHANNEL) {
        return false;
    }
    arena.set_identifier_text(name, format!("{MESSAGE_CHANNEL}{RENAMED_SUFFIX}"))
}

/// Binder entry that rewrites first, then hands the file to `previous`.
pub fn bind_source_file_override(previous: Rc<BindSourceFileFn>) -> Rc<BindSourceFileFn> {
    Rc::new(move |api: &HostApi, file: &mut SourceFile| -> BinderState {
        rewrite_legacy_module(file);
        previous(api, file)
    })
}

/// The exported name list declares the module's exports, like `module.exports =`.
pub fn classify_assignment_override(
    previous: Rc<ClassifyAssignmentFn>,
) -> Rc<ClassifyAssignmentFn> {
    Rc::new(move |arena: &NodeArena, expr: NodeIndex| {
        if is_export_list_assignment(arena, expr) {
            AssignmentDeclarationKind::ModuleExports
        } else {
            previous(arena, expr)
        }
    })
}
