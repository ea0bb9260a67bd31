//! Tokenizer state machine.
//!
//! Positions follow the host checker's convention: a token's *full start*
//! includes the trivia (whitespace and comments) in front of it, so the full
//! start of one token is always the end of the previous one.

use crate::syntax_kind::{PUNCTUATION, SyntaxKind, keyword_kind};

/// Skip whitespace and comments starting at `pos`, returning the offset of
/// the first significant character.
pub fn skip_trivia(text: &str, pos: u32) -> u32 {
    let bytes = text.as_bytes();
    let mut pos = pos as usize;
    loop {
        let Some(ch) = text.get(pos..).and_then(|rest| rest.chars().next()) else {
            return pos.min(bytes.len()) as u32;
        };
        if ch.is_whitespace() || ch == '\u{feff}' {
            pos += ch.len_utf8();
            continue;
        }
        if ch == '/' && bytes.get(pos + 1) == Some(&b'/') {
            pos = match memchr::memchr(b'\n', &bytes[pos..]) {
                Some(offset) => pos + offset,
                None => bytes.len(),
            };
            continue;
        }
        if ch == '/' && bytes.get(pos + 1) == Some(&b'*') {
            pos = match memchr::memmem::find(&bytes[pos + 2..], b"*/") {
                Some(offset) => pos + 2 + offset + 2,
                None => bytes.len(),
            };
            continue;
        }
        if pos == 0 && ch == '#' && bytes.get(1) == Some(&b'!') {
            pos = memchr::memchr(b'\n', bytes).unwrap_or(bytes.len());
            continue;
        }
        return pos as u32;
    }
}

pub struct ScannerState {
    text: String,
    pos: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    preceding_line_break: bool,
    unterminated: bool,
}

impl ScannerState {
    pub fn new(text: String) -> ScannerState {
        ScannerState {
            text,
            pos: 0,
            full_start: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            preceding_line_break: false,
            unterminated: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Give the source text back once scanning is finished.
    pub fn into_text(self) -> String {
        self.text
    }

    pub fn get_token(&self) -> SyntaxKind {
        self.token
    }

    pub fn get_token_full_start(&self) -> u32 {
        self.full_start as u32
    }

    pub fn get_token_start(&self) -> u32 {
        self.token_start as u32
    }

    pub fn get_token_end(&self) -> u32 {
        self.pos as u32
    }

    /// Cooked value of identifiers and literals; empty for punctuation.
    pub fn get_token_value(&self) -> &str {
        &self.token_value
    }

    pub fn get_token_text(&self) -> &str {
        &self.text[self.token_start..self.pos]
    }

    pub fn has_preceding_line_break(&self) -> bool {
        self.preceding_line_break
    }

    /// The last string, template or regex literal ran into end of line/file.
    pub fn is_unterminated(&self) -> bool {
        self.unterminated
    }

    pub fn scan(&mut self) -> SyntaxKind {
        let previous = self.token;
        self.full_start = self.pos;
        let significant = skip_trivia(&self.text, self.pos as u32) as usize;
        self.preceding_line_break = self.text[self.pos..significant].contains('\n');
        self.pos = significant;
        self.token_start = significant;
        self.token_value.clear();
        self.unterminated = false;

        let Some(ch) = self.peek_char() else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        self.token = match ch {
            '"' | '\'' => self.scan_string(ch),
            '`' => self.scan_template(),
            '0'..='9' => self.scan_number(),
            '.' if self.byte_at(1).is_some_and(|b| b.is_ascii_digit()) => self.scan_number(),
            '/' if !previous.ends_expression() => self.scan_regex(),
            c if is_identifier_start(c) => self.scan_identifier(),
            _ => self.scan_punctuation(ch),
        };
        self.token
    }

    fn peek_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn byte_at(&self, offset: usize) -> Option<u8> {
        self.text.as_bytes().get(self.pos + offset).copied()
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if !is_identifier_part(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        self.token_value.push_str(&self.text[start..self.pos]);
        keyword_kind(&self.token_value).unwrap_or(SyntaxKind::Identifier)
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        let is_hex = self.text[start..].starts_with("0x") || self.text[start..].starts_with("0X");
        let mut prev = '\0';
        while let Some(c) = self.peek_char() {
            let exponent_sign =
                (c == '+' || c == '-') && !is_hex && (prev == 'e' || prev == 'E');
            if !(c.is_ascii_alphanumeric() || c == '_' || c == '.' || exponent_sign) {
                break;
            }
            prev = c;
            self.pos += 1;
        }
        self.token_value.push_str(&self.text[start..self.pos]);
        SyntaxKind::NumericLiteral
    }

    fn scan_string(&mut self, quote: char) -> SyntaxKind {
        self.pos += 1;
        loop {
            let Some(c) = self.peek_char() else {
                self.unterminated = true;
                break;
            };
            if c == quote {
                self.pos += 1;
                break;
            }
            if c == '\n' || c == '\r' {
                self.unterminated = true;
                break;
            }
            if c == '\\' {
                self.pos += 1;
                self.scan_escape();
                continue;
            }
            self.token_value.push(c);
            self.pos += c.len_utf8();
        }
        SyntaxKind::StringLiteral
    }

    fn scan_escape(&mut self) {
        let Some(c) = self.peek_char() else {
            return;
        };
        self.pos += c.len_utf8();
        let cooked = match c {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'v' => '\u{b}',
            '0' => '\0',
            'x' => return self.scan_hex_escape(2),
            'u' if self.peek_char() == Some('{') => {
                self.pos += 1;
                let start = self.pos;
                while self.peek_char().is_some_and(|c| c.is_ascii_hexdigit()) {
                    self.pos += 1;
                }
                let value = u32::from_str_radix(&self.text[start..self.pos], 16).ok();
                if self.peek_char() == Some('}') {
                    self.pos += 1;
                }
                if let Some(ch) = value.and_then(char::from_u32) {
                    self.token_value.push(ch);
                }
                return;
            }
            'u' => return self.scan_hex_escape(4),
            '\r' => {
                if self.peek_char() == Some('\n') {
                    self.pos += 1;
                }
                return;
            }
            '\n' | '\u{2028}' | '\u{2029}' => return,
            other => other,
        };
        self.token_value.push(cooked);
    }

    fn scan_hex_escape(&mut self, digits: usize) {
        let end = (self.pos + digits).min(self.text.len());
        let Some(hex) = self.text.get(self.pos..end) else {
            return;
        };
        if hex.len() == digits
            && let Ok(value) = u32::from_str_radix(hex, 16)
            && let Some(ch) = char::from_u32(value)
        {
            self.token_value.push(ch);
            self.pos = end;
        }
    }

    fn scan_template(&mut self) -> SyntaxKind {
        self.pos += 1;
        let start = self.pos;
        let mut depth = 0usize;
        loop {
            let Some(c) = self.peek_char() else {
                self.unterminated = true;
                self.token_value.push_str(&self.text[start..self.pos]);
                break;
            };
            match c {
                '\\' => {
                    self.pos += 1;
                    if let Some(next) = self.peek_char() {
                        self.pos += next.len_utf8();
                    }
                    continue;
                }
                '`' if depth == 0 => {
                    self.token_value.push_str(&self.text[start..self.pos]);
                    self.pos += 1;
                    break;
                }
                '$' if self.byte_at(1) == Some(b'{') => {
                    depth += 1;
                    self.pos += 2;
                    continue;
                }
                '{' if depth > 0 => depth += 1,
                '}' if depth > 0 => depth -= 1,
                _ => {}
            }
            self.pos += c.len_utf8();
        }
        SyntaxKind::NoSubstitutionTemplateLiteral
    }

    fn scan_regex(&mut self) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        let mut in_class = false;
        loop {
            let Some(c) = self.peek_char() else {
                self.unterminated = true;
                break;
            };
            match c {
                '\n' | '\r' => {
                    self.unterminated = true;
                    break;
                }
                '\\' => {
                    self.pos += 1;
                    if let Some(next) = self.peek_char()
                        && next != '\n'
                    {
                        self.pos += next.len_utf8();
                    }
                    continue;
                }
                '[' => in_class = true,
                ']' => in_class = false,
                '/' if !in_class => {
                    self.pos += 1;
                    break;
                }
                _ => {}
            }
            self.pos += c.len_utf8();
        }
        while let Some(c) = self.peek_char() {
            if !is_identifier_part(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        self.token_value.push_str(&self.text[start..self.pos]);
        SyntaxKind::RegularExpressionLiteral
    }

    fn scan_punctuation(&mut self, ch: char) -> SyntaxKind {
        let rest = &self.text[self.pos..];
        for (text, kind) in PUNCTUATION {
            if rest.starts_with(text) {
                // `a ?.5 : b` is a conditional, not optional chaining
                if *kind == SyntaxKind::QuestionDotToken
                    && self.byte_at(2).is_some_and(|b| b.is_ascii_digit())
                {
                    continue;
                }
                self.pos += text.len();
                return *kind;
            }
        }
        self.pos += ch.len_utf8();
        SyntaxKind::Unknown
    }
}

fn is_identifier_start(c: char) -> bool {
    c == '$' || c == '_' || c.is_ascii_alphabetic() || (!c.is_ascii() && c.is_alphabetic())
}

fn is_identifier_part(c: char) -> bool {
    c == '$' || c == '_' || c.is_ascii_alphanumeric() || (!c.is_ascii() && c.is_alphanumeric())
}

/// Saved scanner position for look-ahead.
#[derive(Debug, Clone)]
pub struct ScannerSnapshot {
    pos: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    preceding_line_break: bool,
    unterminated: bool,
}

impl ScannerState {
    pub fn snapshot(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            full_start: self.full_start,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            preceding_line_break: self.preceding_line_break,
            unterminated: self.unterminated,
        }
    }

    pub fn restore(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.full_start = snapshot.full_start;
        self.token_start = snapshot.token_start;
        self.token = snapshot.token;
        self.token_value = snapshot.token_value;
        self.preceding_line_break = snapshot.preceding_line_break;
        self.unterminated = snapshot.unterminated;
    }
}
