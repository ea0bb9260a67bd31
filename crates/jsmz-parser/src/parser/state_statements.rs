//! Statement parsing.

use super::base::{NodeIndex, NodeList};
use super::node_flags;
use super::state::{ParserState, is_closer, is_opener};
use jsmz_common::diagnostics::diagnostic_messages;
use jsmz_scanner::SyntaxKind;

impl ParserState {
    pub(crate) fn parse_statement(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        match self.token() {
            SyntaxKind::SemicolonToken => {
                self.next_token();
                let end = self.node_end();
                self.arena.add_empty_statement(pos, end)
            }
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => {
                self.parse_variable_statement(pos, node_flags::NONE)
            }
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(pos, node_flags::NONE),
            SyntaxKind::ClassKeyword => self.parse_class_declaration(pos, node_flags::NONE),
            SyntaxKind::ImportKeyword => {
                let (next, _) = self.look_ahead_token();
                if matches!(next, SyntaxKind::OpenParenToken | SyntaxKind::DotToken) {
                    self.parse_expression_statement(pos)
                } else {
                    self.parse_import_declaration(pos)
                }
            }
            SyntaxKind::Identifier if self.token_value() == "declare" => {
                let (next, line_break) = self.look_ahead_token();
                if line_break || !starts_declaration(next) {
                    return self.parse_expression_statement(pos);
                }
                self.next_token();
                match self.token() {
                    SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => {
                        self.parse_variable_statement(pos, node_flags::AMBIENT)
                    }
                    SyntaxKind::FunctionKeyword => {
                        self.parse_function_declaration(pos, node_flags::AMBIENT)
                    }
                    SyntaxKind::ClassKeyword => {
                        self.parse_class_declaration(pos, node_flags::AMBIENT)
                    }
                    _ => self.parse_skipped_statement(pos),
                }
            }
            SyntaxKind::Identifier
                if matches!(self.token_value(), "interface" | "type" | "namespace" | "module") =>
            {
                let (next, line_break) = self.look_ahead_token();
                if !line_break && matches!(next, SyntaxKind::Identifier | SyntaxKind::StringLiteral)
                {
                    self.parse_skipped_statement(pos)
                } else {
                    self.parse_expression_statement(pos)
                }
            }
            kind if starts_expression(kind) => self.parse_expression_statement(pos),
            _ => self.parse_skipped_statement(pos),
        }
    }

    /// `var a = 1, b;` with `pos` at the statement start (before any `declare`).
    fn parse_variable_statement(&mut self, pos: u32, flags: u16) -> NodeIndex {
        let list_pos = self.node_pos();
        let list_flags = match self.token() {
            SyntaxKind::LetKeyword => node_flags::LET,
            SyntaxKind::ConstKeyword => node_flags::CONST,
            _ => node_flags::NONE,
        };
        self.next_token();

        let decls_pos = self.node_pos();
        let mut declarations = Vec::new();
        loop {
            declarations.push(self.parse_variable_declaration());
            if self.token() != SyntaxKind::CommaToken {
                break;
            }
            self.next_token();
        }
        let list_end = self.node_end();
        let list = self.arena.add_variable_declaration_list(
            list_pos,
            list_end,
            NodeList::with_nodes(declarations, decls_pos, list_end),
            list_flags,
        );

        self.parse_semicolon();
        let end = self.node_end();
        self.arena.add_variable_statement(pos, end, list, flags)
    }

    fn parse_variable_declaration(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let name = match self.token() {
            SyntaxKind::Identifier => self.parse_identifier(),
            SyntaxKind::OpenBraceToken | SyntaxKind::OpenBracketToken => {
                self.skip_balanced();
                let end = self.node_end();
                self.arena.add_skipped(SyntaxKind::BindingPattern, pos, end)
            }
            _ => {
                self.error_at_current_token(&diagnostic_messages::EXPECTED, &["identifier"]);
                NodeIndex::NONE
            }
        };

        if self.token() == SyntaxKind::ColonToken {
            self.next_token();
            self.skip_type_annotation(false);
        }

        let initializer = if self.token() == SyntaxKind::EqualsToken {
            self.next_token();
            self.parse_assignment_expression()
        } else {
            NodeIndex::NONE
        };

        let end = self.node_end();
        self.arena
            .add_variable_declaration(pos, end, name, initializer)
    }

    fn parse_function_declaration(&mut self, pos: u32, flags: u16) -> NodeIndex {
        self.next_token();
        if self.token() == SyntaxKind::AsteriskToken {
            self.next_token();
        }
        let name = if self.is_identifier() {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        self.skip_signature_and_body();
        let end = self.node_end();
        self.arena.add_function_declaration(pos, end, name, flags)
    }

    /// Type parameters, parameters, return type and body (or `;` for overloads).
    pub(crate) fn skip_signature_and_body(&mut self) {
        if self.token() == SyntaxKind::LessThanToken {
            self.skip_until(|kind| kind == SyntaxKind::OpenParenToken, false);
        }
        if self.token() == SyntaxKind::OpenParenToken {
            self.skip_balanced();
        } else {
            self.error_at_current_token(&diagnostic_messages::EXPECTED, &["("]);
        }
        if self.token() == SyntaxKind::ColonToken {
            self.next_token();
            self.skip_type_annotation(true);
        }
        if self.token() == SyntaxKind::OpenBraceToken {
            self.skip_balanced();
        } else {
            self.parse_semicolon();
        }
    }

    fn parse_class_declaration(&mut self, pos: u32, flags: u16) -> NodeIndex {
        self.next_token();
        let name = if self.is_identifier() && !self.is_contextual_keyword("implements") {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        // Heritage clauses run up to the class body.
        self.skip_until(|kind| kind == SyntaxKind::OpenBraceToken, false);
        if self.token() == SyntaxKind::OpenBraceToken {
            self.skip_balanced();
        } else {
            self.error_at_current_token(&diagnostic_messages::EXPECTED, &["{"]);
        }
        let end = self.node_end();
        self.arena.add_class_declaration(pos, end, name, flags)
    }

    /// `import "x";`, `import a, {b} from "x";`, `import * as c from "x";`
    fn parse_import_declaration(&mut self, pos: u32) -> NodeIndex {
        self.next_token();
        if self.token() != SyntaxKind::StringLiteral {
            // Import clause: everything up to `from`.
            let mut depth = 0usize;
            while self.token() != SyntaxKind::EndOfFileToken {
                if depth == 0 && self.is_contextual_keyword("from") {
                    break;
                }
                match self.token() {
                    kind if is_opener(kind) => depth += 1,
                    kind if is_closer(kind) => {
                        if depth == 0 {
                            break;
                        }
                        depth -= 1;
                    }
                    SyntaxKind::SemicolonToken if depth == 0 => break,
                    _ => {}
                }
                self.next_token();
            }
            if self.is_contextual_keyword("from") {
                self.next_token();
            } else {
                self.error_at_current_token(&diagnostic_messages::EXPECTED, &["from"]);
            }
        }

        let module_specifier = if self.token() == SyntaxKind::StringLiteral {
            self.parse_literal()
        } else {
            self.error_at_current_token(&diagnostic_messages::EXPECTED, &["string literal"]);
            NodeIndex::NONE
        };

        // Import attributes: `with { type: "json" }` / `assert { ... }`
        if (self.token() == SyntaxKind::WithKeyword || self.is_contextual_keyword("assert"))
            && !self.has_preceding_line_break()
        {
            self.next_token();
            if self.token() == SyntaxKind::OpenBraceToken {
                self.skip_balanced();
            }
        }

        self.parse_semicolon();
        let end = self.node_end();
        self.arena
            .add_import_declaration(pos, end, module_specifier)
    }

    fn parse_expression_statement(&mut self, pos: u32) -> NodeIndex {
        let mut expression = self.parse_assignment_expression();
        if self.token() == SyntaxKind::CommaToken {
            // Comma expressions are not modeled; keep the whole range.
            while self.token() == SyntaxKind::CommaToken {
                self.next_token();
                self.parse_assignment_expression();
            }
            let end = self.node_end();
            expression = self
                .arena
                .add_skipped(SyntaxKind::SkippedExpression, pos, end);
        }
        self.parse_semicolon();
        let end = self.node_end();
        self.arena.add_expression_statement(pos, end, expression)
    }

    /// Statements the binder does not look into (control flow, blocks,
    /// TypeScript-only declarations). Runs to the `;` or the closing `}` of
    /// the statement's last block, keeping `else`/`catch`/`finally` chains.
    fn parse_skipped_statement(&mut self, pos: u32) -> NodeIndex {
        let mut depth = 0usize;
        let mut first = true;
        loop {
            let token = self.token();
            if token == SyntaxKind::EndOfFileToken {
                break;
            }
            if is_opener(token) {
                depth += 1;
            } else if is_closer(token) {
                if depth == 0 {
                    // Stray closer: consume it so parsing makes progress.
                    if first {
                        self.next_token();
                    }
                    break;
                }
                depth -= 1;
                if depth == 0 && token == SyntaxKind::CloseBraceToken {
                    self.next_token();
                    if matches!(
                        self.token(),
                        SyntaxKind::ElseKeyword
                            | SyntaxKind::CatchKeyword
                            | SyntaxKind::FinallyKeyword
                            | SyntaxKind::WhileKeyword
                    ) {
                        first = false;
                        continue;
                    }
                    if self.token() == SyntaxKind::SemicolonToken {
                        self.next_token();
                    }
                    break;
                }
            } else if token == SyntaxKind::SemicolonToken && depth == 0 {
                self.next_token();
                break;
            }
            first = false;
            self.next_token();
        }
        let end = self.node_end();
        self.arena
            .add_skipped(SyntaxKind::SkippedStatement, pos, end)
    }
}

fn starts_declaration(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::VarKeyword
            | SyntaxKind::LetKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::EnumKeyword
            | SyntaxKind::Identifier
    )
}

fn starts_expression(kind: SyntaxKind) -> bool {
    kind.is_literal()
        || matches!(
            kind,
            SyntaxKind::Identifier
                | SyntaxKind::ThisKeyword
                | SyntaxKind::SuperKeyword
                | SyntaxKind::TrueKeyword
                | SyntaxKind::FalseKeyword
                | SyntaxKind::NullKeyword
                | SyntaxKind::NewKeyword
                | SyntaxKind::TypeOfKeyword
                | SyntaxKind::VoidKeyword
                | SyntaxKind::DeleteKeyword
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::PlusToken
                | SyntaxKind::MinusToken
                | SyntaxKind::PlusPlusToken
                | SyntaxKind::MinusMinusToken
                | SyntaxKind::ExclamationToken
                | SyntaxKind::TildeToken
        )
}
