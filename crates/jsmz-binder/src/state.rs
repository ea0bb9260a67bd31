//! Binder state and top-level binding.

use crate::special_assignment::{AssignmentClassifier, AssignmentDeclarationKind};
use crate::symbols::{SymbolArena, SymbolId, SymbolTable, symbol_flags};
use jsmz_common::Diagnostic;
use jsmz_common::diagnostics::diagnostic_messages;
use jsmz_parser::parser::node_flags;
use jsmz_parser::{NodeData, NodeIndex, SourceFile};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

/// Name used for the export symbol of `module.exports = <non-object>`.
pub const EXPORT_EQUALS: &str = "export=";

/// A classified top-level assignment, kept for callers that inspect how a
/// file's CommonJS surface was derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialAssignment {
    pub expression: NodeIndex,
    pub kind: AssignmentDeclarationKind,
    /// Assigned property name, when the left side names one.
    pub name: Option<String>,
}

/// An export whose local target is looked up once all locals are known.
struct PendingExport {
    symbol: SymbolId,
    local_name: String,
    node: NodeIndex,
    report_missing: bool,
}

/// Binder state for one source file.
#[derive(Debug, Default)]
pub struct BinderState {
    pub file_name: String,
    pub symbols: SymbolArena,
    /// Top-level declarations
    pub file_locals: SymbolTable,
    /// CommonJS-style export surface
    pub exports: SymbolTable,
    pub special_assignments: Vec<SpecialAssignment>,
    /// Node index of each declaration to its symbol
    pub node_symbols: FxHashMap<u32, SymbolId>,
    pub diagnostics: Vec<Diagnostic>,
    /// Set when the file assigns `module.exports` or `exports.x`
    pub is_commonjs_module: bool,
}

impl BinderState {
    pub fn new() -> BinderState {
        BinderState::default()
    }

    /// Bind the top level of `file`. Special assignments are only recognized
    /// in JavaScript files, and are classified through `classifier`.
    pub fn bind_source_file(&mut self, file: &SourceFile, classifier: &dyn AssignmentClassifier) {
        *self = BinderState {
            file_name: file.file_name.clone(),
            ..BinderState::default()
        };

        // Classify first: `this.x = ...` depends on whether the file is a
        // CommonJS module anywhere, not just above the assignment.
        let mut classified = Vec::new();
        for stmt in file.statements.iter() {
            let Some(node) = file.arena.get(stmt) else {
                continue;
            };
            if let Some(expr_stmt) = file.arena.get_expression_statement(node)
                && file.script_kind.is_js()
            {
                let kind = classifier.classify_assignment(&file.arena, expr_stmt.expression);
                if kind != AssignmentDeclarationKind::None {
                    classified.push((expr_stmt.expression, kind));
                }
            }
        }
        self.is_commonjs_module = classified.iter().any(|(_, kind)| {
            matches!(
                kind,
                AssignmentDeclarationKind::ModuleExports | AssignmentDeclarationKind::ExportsProperty
            )
        });

        for stmt in file.statements.iter() {
            self.bind_statement(file, stmt);
        }

        let mut pending = Vec::new();
        for (expr, kind) in classified {
            self.bind_special_assignment(file, expr, kind, &mut pending);
        }
        self.resolve_pending_exports(file, pending);

        debug!(
            file = %self.file_name,
            locals = self.file_locals.len(),
            exports = self.exports.len(),
            commonjs = self.is_commonjs_module,
            "bound source file"
        );
    }

    fn bind_statement(&mut self, file: &SourceFile, stmt: NodeIndex) {
        let arena = &file.arena;
        let Some(node) = arena.get(stmt) else {
            return;
        };
        match &node.data {
            NodeData::VariableStatement(var) => {
                let block_scoped = arena
                    .get(var.declaration_list)
                    .is_some_and(|list| list.has_flag(node_flags::BLOCK_SCOPED));
                let flags = if block_scoped {
                    symbol_flags::BLOCK_SCOPED_VARIABLE
                } else {
                    symbol_flags::FUNCTION_SCOPED_VARIABLE
                };
                let Some(declarations) = arena.variable_statement_declarations(stmt) else {
                    return;
                };
                for &decl in declarations {
                    let Some(data) = arena
                        .get(decl)
                        .and_then(|decl_node| arena.get_variable_declaration(decl_node))
                    else {
                        continue;
                    };
                    // Binding patterns are not modeled.
                    if let Some(name) = arena.identifier_text(data.name) {
                        self.declare_local(name, flags, decl);
                    }
                }
            }
            NodeData::FunctionDeclaration(func) => {
                if let Some(name) = arena.identifier_text(func.name) {
                    self.declare_local(name, symbol_flags::FUNCTION, stmt);
                }
            }
            NodeData::ClassDeclaration(class) => {
                if let Some(name) = arena.identifier_text(class.name) {
                    self.declare_local(name, symbol_flags::CLASS, stmt);
                }
            }
            _ => {}
        }
    }

    fn bind_special_assignment(
        &mut self,
        file: &SourceFile,
        expr: NodeIndex,
        kind: AssignmentDeclarationKind,
        pending: &mut Vec<PendingExport>,
    ) {
        let arena = &file.arena;
        let Some(binary) = arena.get(expr).and_then(|node| arena.get_binary_expr(node)) else {
            return;
        };
        let name = arena
            .get(binary.left)
            .and_then(|node| arena.get_access_expr(node))
            .and_then(|access| arena.text_of_name(access.name_or_argument))
            .map(str::to_string);
        trace!(file = %self.file_name, ?kind, name = ?name, "special assignment");

        match kind {
            AssignmentDeclarationKind::ModuleExports => {
                self.bind_module_exports(file, binary.right, pending);
            }
            AssignmentDeclarationKind::ExportsProperty => {
                if let Some(name) = &name {
                    self.declare_export(name, symbol_flags::PROPERTY, binary.left);
                }
            }
            AssignmentDeclarationKind::ThisProperty => {
                if let Some(name) = &name {
                    if self.is_commonjs_module {
                        self.declare_export(name, symbol_flags::PROPERTY, binary.left);
                    } else {
                        // In a script, top-level `this` is the global object.
                        self.declare_local(name, symbol_flags::FUNCTION_SCOPED_VARIABLE, binary.left);
                    }
                }
            }
            AssignmentDeclarationKind::Property
            | AssignmentDeclarationKind::Prototype
            | AssignmentDeclarationKind::PrototypeProperty
            | AssignmentDeclarationKind::None => {}
        }

        self.special_assignments.push(SpecialAssignment {
            expression: expr,
            kind,
            name,
        });
    }

    /// `module.exports = { A, b: c }` exports each property; any other right
    /// side becomes a single `export=` symbol.
    fn bind_module_exports(
        &mut self,
        file: &SourceFile,
        right: NodeIndex,
        pending: &mut Vec<PendingExport>,
    ) {
        let arena = &file.arena;
        let Some(right_node) = arena.get(right) else {
            return;
        };

        let Some(object) = arena.get_object_literal(right_node) else {
            let symbol = self.declare_export(EXPORT_EQUALS, symbol_flags::ALIAS, right);
            if let Some(local) = arena.identifier_text(right) {
                pending.push(PendingExport {
                    symbol,
                    local_name: local.to_string(),
                    node: right,
                    report_missing: false,
                });
            }
            return;
        };

        for element in object.elements.iter() {
            let Some(element_node) = arena.get(element) else {
                continue;
            };
            match &element_node.data {
                NodeData::ShorthandPropertyAssignment(prop) => {
                    let Some(name) = arena.identifier_text(prop.name) else {
                        continue;
                    };
                    let symbol = self.declare_export(name, symbol_flags::PROPERTY, element);
                    pending.push(PendingExport {
                        symbol,
                        local_name: name.to_string(),
                        node: element,
                        report_missing: true,
                    });
                }
                NodeData::PropertyAssignment(prop) => {
                    let Some(name) = arena.text_of_name(prop.name) else {
                        continue;
                    };
                    let symbol = self.declare_export(name, symbol_flags::PROPERTY, element);
                    if let Some(local) = arena.identifier_text(prop.initializer) {
                        pending.push(PendingExport {
                            symbol,
                            local_name: local.to_string(),
                            node: element,
                            report_missing: false,
                        });
                    }
                }
                _ => {}
            }
        }
    }

    fn resolve_pending_exports(&mut self, file: &SourceFile, pending: Vec<PendingExport>) {
        for export in pending {
            if let Some(local) = self.file_locals.get(&export.local_name) {
                if let Some(symbol) = self.symbols.get_mut(export.symbol) {
                    symbol.export_target = Some(local);
                }
                continue;
            }
            if !export.report_missing {
                continue;
            }
            let Some(node) = file.arena.get(export.node) else {
                continue;
            };
            let start = file.token_start(export.node).unwrap_or(node.pos);
            self.diagnostics.push(Diagnostic::from_message(
                self.file_name.clone(),
                start,
                node.end.saturating_sub(start),
                &diagnostic_messages::CANNOT_FIND_NAME,
                &[&export.local_name],
            ));
        }
    }

    pub(crate) fn declare_local(&mut self, name: &str, flags: u32, declaration: NodeIndex) -> SymbolId {
        let id = match self.file_locals.get(name) {
            Some(existing) => existing,
            None => {
                let id = self.symbols.alloc(flags, name.to_string());
                self.file_locals.set(name.to_string(), id);
                id
            }
        };
        self.add_declaration(id, flags, declaration);
        id
    }

    fn declare_export(&mut self, name: &str, flags: u32, declaration: NodeIndex) -> SymbolId {
        let flags = flags | symbol_flags::EXPORT_VALUE;
        let id = match self.exports.get(name) {
            Some(existing) => existing,
            None => {
                let id = self.symbols.alloc(flags, name.to_string());
                self.exports.set(name.to_string(), id);
                id
            }
        };
        self.add_declaration(id, flags, declaration);
        id
    }

    fn add_declaration(&mut self, id: SymbolId, flags: u32, declaration: NodeIndex) {
        if let Some(symbol) = self.symbols.get_mut(id) {
            symbol.flags |= flags;
            if !symbol.declarations.contains(&declaration) {
                symbol.declarations.push(declaration);
            }
            if symbol.value_declaration.is_none() && flags & symbol_flags::VALUE != 0 {
                symbol.value_declaration = declaration;
            }
        }
        self.node_symbols.insert(declaration.0, id);
    }

    /// Names of the file's top-level declarations, in declaration order.
    pub fn local_names(&self) -> Vec<String> {
        self.file_locals.names().map(str::to_string).collect()
    }

    /// Names of the file's exports, in declaration order.
    pub fn export_names(&self) -> Vec<String> {
        self.exports.names().map(str::to_string).collect()
    }

    /// Local symbol an export refers to, if it was resolved.
    pub fn export_target(&self, name: &str) -> Option<SymbolId> {
        self.symbols.get(self.exports.get(name)?)?.export_target
    }
}
