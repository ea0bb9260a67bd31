//! Expression parsing.
//!
//! Only the shapes the binder inspects are modeled: assignments, member
//! access, calls and array/object literals. Everything else (operators,
//! arrow functions, function and class expressions) is kept as a skipped
//! range so the tree stays faithful to the source offsets.

use super::base::{NodeIndex, NodeList};
use super::state::ParserState;
use jsmz_common::diagnostics::diagnostic_messages;
use jsmz_scanner::SyntaxKind;

impl ParserState {
    pub(crate) fn parse_assignment_expression(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let left = self.parse_left_hand_side_expression();

        let operator = self.token();
        if operator.is_assignment_operator() {
            self.next_token();
            let right = self.parse_assignment_expression();
            let end = self.node_end();
            return self.arena.add_binary(pos, end, left, operator, right);
        }

        if self.at_expression_end() {
            return left;
        }

        // Binary, conditional or arrow tail: keep the range, drop the shape.
        self.skip_until(
            |kind| matches!(kind, SyntaxKind::CommaToken | SyntaxKind::SemicolonToken),
            true,
        );
        let end = self.node_end();
        self.arena
            .add_skipped(SyntaxKind::SkippedExpression, pos, end)
    }

    fn at_expression_end(&self) -> bool {
        match self.token() {
            SyntaxKind::CommaToken
            | SyntaxKind::SemicolonToken
            | SyntaxKind::CloseParenToken
            | SyntaxKind::CloseBracketToken
            | SyntaxKind::CloseBraceToken
            | SyntaxKind::EndOfFileToken => true,
            kind => {
                self.has_preceding_line_break()
                    && !super::state::is_binary_operator(kind)
                    && kind != SyntaxKind::QuestionDotToken
            }
        }
    }

    fn parse_left_hand_side_expression(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let mut expression = self.parse_primary_expression();

        loop {
            match self.token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    let name = self.parse_property_name_after_dot();
                    let end = self.node_end();
                    expression = self
                        .arena
                        .add_property_access(pos, end, expression, name, false);
                }
                SyntaxKind::QuestionDotToken => {
                    self.next_token();
                    expression = match self.token() {
                        SyntaxKind::OpenParenToken => {
                            let arguments = self.parse_arguments();
                            let end = self.node_end();
                            self.arena.add_call(pos, end, expression, arguments)
                        }
                        SyntaxKind::OpenBracketToken => self.parse_element_access(pos, expression, true),
                        _ => {
                            let name = self.parse_property_name_after_dot();
                            let end = self.node_end();
                            self.arena
                                .add_property_access(pos, end, expression, name, true)
                        }
                    };
                }
                SyntaxKind::OpenBracketToken => {
                    expression = self.parse_element_access(pos, expression, false);
                }
                SyntaxKind::OpenParenToken => {
                    let arguments = self.parse_arguments();
                    let end = self.node_end();
                    expression = self.arena.add_call(pos, end, expression, arguments);
                }
                SyntaxKind::NoSubstitutionTemplateLiteral => {
                    // Tagged template.
                    self.next_token();
                    let end = self.node_end();
                    expression = self
                        .arena
                        .add_skipped(SyntaxKind::SkippedExpression, pos, end);
                }
                SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken
                    if !self.has_preceding_line_break() =>
                {
                    self.next_token();
                    let end = self.node_end();
                    return self
                        .arena
                        .add_skipped(SyntaxKind::SkippedExpression, pos, end);
                }
                // Non-null assertion `a!.b`
                SyntaxKind::ExclamationToken if !self.has_preceding_line_break() => {
                    self.next_token();
                }
                _ => return expression,
            }
        }
    }

    fn parse_element_access(
        &mut self,
        pos: u32,
        expression: NodeIndex,
        question_dot: bool,
    ) -> NodeIndex {
        self.next_token();
        let argument = self.parse_assignment_expression();
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let end = self.node_end();
        self.arena
            .add_element_access(pos, end, expression, argument, question_dot)
    }

    /// `( a, b, ...c )`
    fn parse_arguments(&mut self) -> NodeList {
        self.next_token();
        let list_pos = self.node_pos();
        let mut arguments = Vec::new();
        while !matches!(
            self.token(),
            SyntaxKind::CloseParenToken | SyntaxKind::EndOfFileToken
        ) {
            arguments.push(self.parse_argument_or_element());
            if self.token() == SyntaxKind::CommaToken {
                self.next_token();
            } else if self.token() != SyntaxKind::CloseParenToken {
                self.error_at_current_token(&diagnostic_messages::EXPECTED, &[","]);
                break;
            }
        }
        let list_end = self.node_pos();
        self.parse_expected(SyntaxKind::CloseParenToken);
        NodeList::with_nodes(arguments, list_pos, list_end)
    }

    fn parse_argument_or_element(&mut self) -> NodeIndex {
        if self.token() == SyntaxKind::DotDotDotToken {
            let pos = self.node_pos();
            self.next_token();
            self.parse_assignment_expression();
            let end = self.node_end();
            return self
                .arena
                .add_skipped(SyntaxKind::SkippedExpression, pos, end);
        }
        self.parse_assignment_expression()
    }

    fn parse_property_name_after_dot(&mut self) -> NodeIndex {
        if self.token() == SyntaxKind::HashToken {
            self.next_token();
        }
        if self.is_identifier() || self.token().is_keyword() {
            return self.parse_identifier_name();
        }
        self.error_at_current_token(&diagnostic_messages::EXPECTED, &["identifier"]);
        self.missing_node()
    }

    fn parse_primary_expression(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        match self.token() {
            SyntaxKind::Identifier => self.parse_identifier(),
            SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::ImportKeyword => {
                let kind = self.token();
                self.next_token();
                let end = self.node_end();
                self.arena.add_token(kind, pos, end)
            }
            kind if kind.is_literal() => self.parse_literal(),
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::OpenParenToken => {
                self.skip_balanced();
                let end = self.node_end();
                self.arena
                    .add_skipped(SyntaxKind::ParenthesizedExpression, pos, end)
            }
            SyntaxKind::FunctionKeyword => {
                self.next_token();
                if self.token() == SyntaxKind::AsteriskToken {
                    self.next_token();
                }
                if self.is_identifier() {
                    self.next_token();
                }
                self.skip_signature_and_body();
                let end = self.node_end();
                self.arena
                    .add_skipped(SyntaxKind::FunctionExpression, pos, end)
            }
            SyntaxKind::ClassKeyword => {
                self.next_token();
                self.skip_until(|kind| kind == SyntaxKind::OpenBraceToken, false);
                if self.token() == SyntaxKind::OpenBraceToken {
                    self.skip_balanced();
                }
                let end = self.node_end();
                self.arena
                    .add_skipped(SyntaxKind::SkippedExpression, pos, end)
            }
            SyntaxKind::NewKeyword
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::DeleteKeyword
            | SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::TildeToken => {
                self.next_token();
                self.parse_left_hand_side_expression();
                let end = self.node_end();
                self.arena
                    .add_skipped(SyntaxKind::SkippedExpression, pos, end)
            }
            _ => {
                self.error_at_current_token(&diagnostic_messages::EXPECTED, &["Expression"]);
                self.missing_node()
            }
        }
    }

    /// `[a, , ...b]`; holes are dropped.
    fn parse_array_literal(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        self.next_token();
        let list_pos = self.node_pos();
        let mut elements = Vec::new();
        while !matches!(
            self.token(),
            SyntaxKind::CloseBracketToken | SyntaxKind::EndOfFileToken
        ) {
            if self.token() == SyntaxKind::CommaToken {
                self.next_token();
                continue;
            }
            elements.push(self.parse_argument_or_element());
            if self.token() == SyntaxKind::CommaToken {
                self.next_token();
            } else if self.token() != SyntaxKind::CloseBracketToken {
                self.error_at_current_token(&diagnostic_messages::EXPECTED, &[","]);
                break;
            }
        }
        let list_end = self.node_pos();
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let end = self.node_end();
        self.arena
            .add_array_literal(pos, end, NodeList::with_nodes(elements, list_pos, list_end))
    }

    fn parse_object_literal(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        self.next_token();
        let list_pos = self.node_pos();
        let mut properties = Vec::new();
        while !matches!(
            self.token(),
            SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) {
            properties.push(self.parse_object_literal_element());
            if self.token() == SyntaxKind::CommaToken {
                self.next_token();
            } else if self.token() != SyntaxKind::CloseBraceToken {
                self.error_at_current_token(&diagnostic_messages::EXPECTED, &[","]);
                self.skip_until(|kind| kind == SyntaxKind::CommaToken, false);
                if self.token() != SyntaxKind::CommaToken {
                    break;
                }
                self.next_token();
            }
        }
        let list_end = self.node_pos();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let end = self.node_end();
        self.arena
            .add_object_literal(pos, end, NodeList::with_nodes(properties, list_pos, list_end))
    }

    fn parse_object_literal_element(&mut self) -> NodeIndex {
        let pos = self.node_pos();

        if self.token() == SyntaxKind::DotDotDotToken {
            self.next_token();
            self.parse_assignment_expression();
            let end = self.node_end();
            return self
                .arena
                .add_skipped(SyntaxKind::SkippedExpression, pos, end);
        }

        // Accessors, async and generator methods.
        let mut is_method = false;
        if self.token() == SyntaxKind::AsteriskToken {
            self.next_token();
            is_method = true;
        } else if self.is_identifier() && matches!(self.token_value(), "get" | "set" | "async") {
            let (next, _) = self.look_ahead_token();
            if !matches!(
                next,
                SyntaxKind::CommaToken
                    | SyntaxKind::ColonToken
                    | SyntaxKind::OpenParenToken
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::EqualsToken
            ) {
                self.next_token();
                if self.token() == SyntaxKind::AsteriskToken {
                    self.next_token();
                }
                is_method = true;
            }
        }

        let is_plain_identifier = self.is_identifier();
        let name = match self.token() {
            SyntaxKind::OpenBracketToken => {
                let name_pos = self.node_pos();
                self.skip_balanced();
                let end = self.node_end();
                self.arena
                    .add_skipped(SyntaxKind::SkippedExpression, name_pos, end)
            }
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral => self.parse_literal(),
            kind if kind == SyntaxKind::Identifier || kind.is_keyword() => {
                self.parse_identifier_name()
            }
            _ => {
                self.error_at_current_token(&diagnostic_messages::EXPECTED, &["Property assignment"]);
                return self.missing_node();
            }
        };

        if is_method
            || matches!(
                self.token(),
                SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
            )
        {
            self.skip_signature_and_body();
            let end = self.node_end();
            return self
                .arena
                .add_skipped(SyntaxKind::FunctionExpression, pos, end);
        }

        match self.token() {
            SyntaxKind::ColonToken => {
                self.next_token();
                let initializer = self.parse_assignment_expression();
                let end = self.node_end();
                self.arena
                    .add_property_assignment(pos, end, name, initializer)
            }
            SyntaxKind::CommaToken | SyntaxKind::CloseBraceToken if is_plain_identifier => {
                let end = self.node_end();
                self.arena.add_shorthand_property(pos, end, name)
            }
            SyntaxKind::EqualsToken if is_plain_identifier => {
                // Shorthand with default, only valid in destructuring targets.
                self.next_token();
                self.parse_assignment_expression();
                let end = self.node_end();
                self.arena
                    .add_skipped(SyntaxKind::SkippedExpression, pos, end)
            }
            _ => {
                self.error_at_current_token(&diagnostic_messages::EXPECTED, &[":"]);
                let end = self.node_end();
                self.arena
                    .add_skipped(SyntaxKind::SkippedExpression, pos, end)
            }
        }
    }

    pub(crate) fn parse_identifier(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let text = self.token_value().to_string();
        self.next_token();
        let end = self.node_end();
        self.arena.add_identifier(pos, end, text)
    }

    /// Identifier position where reserved words are allowed (`a.default`, `{ new: 1 }`).
    fn parse_identifier_name(&mut self) -> NodeIndex {
        self.parse_identifier()
    }

    pub(crate) fn parse_literal(&mut self) -> NodeIndex {
        let pos = self.node_pos();
        let kind = self.token();
        let text = self.token_value().to_string();
        self.next_token();
        let end = self.node_end();
        self.arena.add_literal(kind, pos, end, text)
    }
}
