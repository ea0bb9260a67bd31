//! Parser state: token handling, diagnostics and token skipping.
//!
//! Statement parsing lives in `state_statements.rs`, expression parsing in
//! `state_expressions.rs`.

use super::base::{NodeIndex, NodeList};
use super::node::NodeArena;
use crate::source_file::SourceFile;
use jsmz_common::diagnostics::{DiagnosticMessage, diagnostic_messages};
use jsmz_common::{Diagnostic, ScriptKind};
use jsmz_scanner::{ScannerState, SyntaxKind};
use tracing::debug;

pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) arena: NodeArena,
    pub(crate) file_name: String,
    pub(crate) script_kind: ScriptKind,
    pub(crate) diagnostics: Vec<Diagnostic>,
    /// Token before the current one, for line-break continuation checks.
    pub(crate) previous_token: SyntaxKind,
    last_error_pos: Option<u32>,
}

impl ParserState {
    pub fn new(file_name: String, source_text: String) -> ParserState {
        let script_kind = ScriptKind::from_file_name(&file_name);
        let estimated_nodes = source_text.len() / 4;
        ParserState {
            scanner: ScannerState::new(source_text),
            arena: NodeArena::with_capacity(estimated_nodes),
            file_name,
            script_kind,
            diagnostics: Vec::new(),
            previous_token: SyntaxKind::Unknown,
            last_error_pos: None,
        }
    }

    /// Override the script kind derived from the file name.
    pub fn with_script_kind(mut self, script_kind: ScriptKind) -> ParserState {
        self.script_kind = script_kind;
        self
    }

    pub fn get_diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Parse the whole text and hand the tree over as a `SourceFile`.
    pub fn parse_source_file(mut self) -> SourceFile {
        self.next_token();
        let list_pos = self.node_pos();
        let mut statements = Vec::new();

        while self.token() != SyntaxKind::EndOfFileToken {
            let start = self.scanner.get_token_start();
            statements.push(self.parse_statement());
            // Every statement consumes at least one token; guard against stalls anyway.
            if self.scanner.get_token_start() == start
                && self.token() != SyntaxKind::EndOfFileToken
            {
                self.next_token();
            }
        }

        let end = self.node_pos();
        debug!(
            file = %self.file_name,
            statements = statements.len(),
            nodes = self.arena.len(),
            diagnostics = self.diagnostics.len(),
            "parsed source file"
        );

        SourceFile {
            file_name: self.file_name,
            text: self.scanner.into_text(),
            script_kind: self.script_kind,
            arena: self.arena,
            statements: NodeList::with_nodes(statements, list_pos, end),
            parse_diagnostics: self.diagnostics,
            pre_bind_rewritten: false,
        }
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.scanner.get_token()
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.previous_token = self.scanner.get_token();
        let token = self.scanner.scan();
        if self.scanner.is_unterminated() && token == SyntaxKind::StringLiteral {
            self.error_at_current_token(&diagnostic_messages::UNTERMINATED_STRING_LITERAL, &[]);
        }
        token
    }

    /// Full start of the current token; the start of any node beginning here.
    #[inline]
    pub(crate) fn node_pos(&self) -> u32 {
        self.scanner.get_token_full_start()
    }

    /// End of the previously consumed token.
    #[inline]
    pub(crate) fn node_end(&self) -> u32 {
        self.scanner.get_token_full_start()
    }

    #[inline]
    pub(crate) fn token_value(&self) -> &str {
        self.scanner.get_token_value()
    }

    #[inline]
    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    pub(crate) fn is_identifier(&self) -> bool {
        self.token() == SyntaxKind::Identifier
    }

    pub(crate) fn is_contextual_keyword(&self, text: &str) -> bool {
        self.is_identifier() && self.token_value() == text
    }

    /// Peek at the token after the current one without consuming anything.
    pub(crate) fn look_ahead_token(&mut self) -> (SyntaxKind, bool) {
        let snapshot = self.scanner.snapshot();
        let previous = self.previous_token;
        let kind = self.scanner.scan();
        let line_break = self.scanner.has_preceding_line_break();
        self.scanner.restore(snapshot);
        self.previous_token = previous;
        (kind, line_break)
    }

    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.token() == kind {
            self.next_token();
            return true;
        }
        let text = kind.punctuation_text().unwrap_or("token");
        self.error_at_current_token(&diagnostic_messages::EXPECTED, &[text]);
        false
    }

    /// Consume a `;`, or accept automatic semicolon insertion.
    pub(crate) fn parse_semicolon(&mut self) {
        match self.token() {
            SyntaxKind::SemicolonToken => {
                self.next_token();
            }
            SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken => {}
            _ if self.has_preceding_line_break() => {}
            _ => {
                self.error_at_current_token(&diagnostic_messages::EXPECTED, &[";"]);
            }
        }
    }

    pub(crate) fn error_at_current_token(&mut self, message: &DiagnosticMessage, args: &[&str]) {
        let start = self.scanner.get_token_start();
        // One error per position keeps recovery noise down.
        if self.last_error_pos == Some(start) {
            return;
        }
        self.last_error_pos = Some(start);
        let length = self.scanner.get_token_end().saturating_sub(start);
        self.diagnostics.push(Diagnostic::from_message(
            self.file_name.clone(),
            start,
            length,
            message,
            args,
        ));
    }

    // =========================================================================
    // Skipping
    // =========================================================================

    /// Consume a bracketed group starting at the current opener, including
    /// the matching closer. Returns false if the file ended first.
    pub(crate) fn skip_balanced(&mut self) -> bool {
        let mut depth = 0usize;
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => {
                    self.error_at_current_token(&diagnostic_messages::EXPECTED, &["}"]);
                    return false;
                }
                kind if is_opener(kind) => depth += 1,
                kind if is_closer(kind) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.next_token();
                        return true;
                    }
                }
                _ => {}
            }
            self.next_token();
        }
    }

    /// Consume tokens until `stop` matches at bracket depth 0. Never consumes
    /// a closer that belongs to an enclosing group. With `respect_line_breaks`
    /// a line break at depth 0 ends the run unless the expression clearly
    /// continues across it.
    pub(crate) fn skip_until(
        &mut self,
        stop: impl Fn(SyntaxKind) -> bool,
        respect_line_breaks: bool,
    ) {
        let mut depth = 0usize;
        let mut first = true;
        loop {
            let token = self.token();
            if token == SyntaxKind::EndOfFileToken {
                return;
            }
            if depth == 0 {
                if stop(token) || is_closer(token) {
                    return;
                }
                if respect_line_breaks
                    && !first
                    && self.has_preceding_line_break()
                    && !continues_expression(self.previous_token, token)
                {
                    return;
                }
            }
            if is_opener(token) {
                depth += 1;
            } else if is_closer(token) {
                depth -= 1;
            }
            first = false;
            self.next_token();
        }
    }

    /// Skip a type annotation after `:`, stopping at `=`, `,`, `;` or a
    /// closer at depth 0. Angle brackets count as nesting here.
    pub(crate) fn skip_type_annotation(&mut self, stop_at_open_brace: bool) {
        let mut depth = 0isize;
        let mut first = true;
        loop {
            let token = self.token();
            if token == SyntaxKind::EndOfFileToken {
                return;
            }
            if depth <= 0 {
                let stops = matches!(
                    token,
                    SyntaxKind::EqualsToken | SyntaxKind::CommaToken | SyntaxKind::SemicolonToken
                ) || is_closer(token)
                    || (stop_at_open_brace && token == SyntaxKind::OpenBraceToken && !first);
                if stops {
                    return;
                }
                if !first
                    && self.has_preceding_line_break()
                    && !continues_type(self.previous_token, token)
                {
                    return;
                }
            }
            match token {
                SyntaxKind::LessThanToken => depth += 1,
                SyntaxKind::GreaterThanToken => depth -= 1,
                SyntaxKind::GreaterThanGreaterThanToken => depth -= 2,
                SyntaxKind::GreaterThanGreaterThanGreaterThanToken => depth -= 3,
                kind if is_opener(kind) => {
                    self.skip_balanced();
                    first = false;
                    continue;
                }
                _ => {}
            }
            first = false;
            self.next_token();
        }
    }

    pub(crate) fn missing_node(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        self.arena.add_skipped(SyntaxKind::SkippedExpression, pos, pos)
    }
}

pub(crate) fn is_opener(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::OpenBraceToken | SyntaxKind::OpenParenToken | SyntaxKind::OpenBracketToken
    )
}

pub(crate) fn is_closer(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::CloseBraceToken | SyntaxKind::CloseParenToken | SyntaxKind::CloseBracketToken
    )
}

/// Operators that join two operands; a line break next to one of these does
/// not end an expression.
pub(crate) fn is_binary_operator(kind: SyntaxKind) -> bool {
    let k = kind as u16;
    let in_operator_range = k >= SyntaxKind::QuestionDotToken as u16
        && k <= SyntaxKind::CaretEqualsToken as u16
        && !matches!(
            kind,
            SyntaxKind::PlusPlusToken
                | SyntaxKind::MinusMinusToken
                | SyntaxKind::ExclamationToken
                | SyntaxKind::TildeToken
                | SyntaxKind::AtToken
                | SyntaxKind::HashToken
        );
    in_operator_range
        || matches!(
            kind,
            SyntaxKind::DotToken | SyntaxKind::InKeyword | SyntaxKind::InstanceOfKeyword
        )
}

fn continues_expression(previous: SyntaxKind, next: SyntaxKind) -> bool {
    is_binary_operator(previous)
        || is_binary_operator(next)
        || matches!(
            previous,
            SyntaxKind::CommaToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::ExclamationToken
                | SyntaxKind::TildeToken
                | SyntaxKind::NewKeyword
                | SyntaxKind::TypeOfKeyword
                | SyntaxKind::VoidKeyword
                | SyntaxKind::DeleteKeyword
        )
}

fn continues_type(previous: SyntaxKind, next: SyntaxKind) -> bool {
    matches!(
        previous,
        SyntaxKind::ColonToken
            | SyntaxKind::BarToken
            | SyntaxKind::AmpersandToken
            | SyntaxKind::EqualsGreaterThanToken
            | SyntaxKind::DotToken
            | SyntaxKind::LessThanToken
            | SyntaxKind::CommaToken
    ) || matches!(
        next,
        SyntaxKind::BarToken
            | SyntaxKind::AmpersandToken
            | SyntaxKind::EqualsGreaterThanToken
            | SyntaxKind::DotToken
            | SyntaxKind::OpenBracketToken
    )
}
