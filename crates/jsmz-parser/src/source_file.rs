//! Parsed source files.

use crate::parser::node::{NodeArena, NodeData};
use crate::parser::{NodeIndex, NodeList, ParserState};
use jsmz_common::{Diagnostic, ScriptKind};
use jsmz_scanner::skip_trivia;

/// A parsed file: the text, its arena and the top-level statement list.
///
/// The binding step may rewrite the tree once before binding; that rewrite
/// sets `pre_bind_rewritten` and never runs again for the same file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub file_name: String,
    pub text: String,
    pub script_kind: ScriptKind,
    pub arena: NodeArena,
    pub statements: NodeList,
    pub parse_diagnostics: Vec<Diagnostic>,
    pub pre_bind_rewritten: bool,
}

impl SourceFile {
    /// String specifiers of all top-level `import` declarations, with the
    /// literal node so callers can report at its range.
    pub fn module_specifiers(&self) -> Vec<(String, NodeIndex)> {
        self.statements
            .iter()
            .filter_map(|stmt| {
                let node = self.arena.get(stmt)?;
                let import = self.arena.get_import_decl(node)?;
                let spec = self.arena.text_of_name(import.module_specifier)?;
                Some((spec.to_string(), import.module_specifier))
            })
            .collect()
    }

    /// Start of the first token of a node, after leading trivia.
    pub fn token_start(&self, index: NodeIndex) -> Option<u32> {
        let node = self.arena.get(index)?;
        Some(skip_trivia(&self.text, node.pos).min(node.end.max(node.pos)))
    }

    /// Source text covered by a node, without leading trivia.
    pub fn node_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.arena.get(index)?;
        let start = self.token_start(index)? as usize;
        self.text.get(start..node.end as usize)
    }

    /// Top-level statements that are variable statements, in order.
    pub fn variable_statements(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.statements.iter().filter(|&stmt| {
            self.arena
                .get(stmt)
                .is_some_and(|node| matches!(node.data, NodeData::VariableStatement(_)))
        })
    }
}

/// Parse `text` as `file_name`. `ScriptKind::Unknown` derives the kind from
/// the file name.
pub fn parse_source_file(file_name: &str, text: String, script_kind: ScriptKind) -> SourceFile {
    let parser = ParserState::new(file_name.to_string(), text);
    if script_kind == ScriptKind::Unknown {
        parser.parse_source_file()
    } else {
        parser.with_script_kind(script_kind).parse_source_file()
    }
}
