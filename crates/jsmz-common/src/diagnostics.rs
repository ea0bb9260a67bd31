use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1002;
    pub const EXPECTED: u32 = 1005;
    pub const CANNOT_FIND_NAME: u32 = 2304;
    pub const CANNOT_FIND_MODULE: u32 = 2307;
    pub const FILE_NOT_FOUND: u32 = 6053;
    pub const JS_FILE_WITHOUT_ALLOW_JS: u32 = 6504;
}

pub mod diagnostic_messages {
    use super::{DiagnosticCategory, DiagnosticMessage, diagnostic_codes};

    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::UNTERMINATED_STRING_LITERAL,
        category: DiagnosticCategory::Error,
        message: "Unterminated string literal.",
    };
    pub const EXPECTED: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::EXPECTED,
        category: DiagnosticCategory::Error,
        message: "'{0}' expected.",
    };
    pub const CANNOT_FIND_NAME: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::CANNOT_FIND_NAME,
        category: DiagnosticCategory::Error,
        message: "Cannot find name '{0}'.",
    };
    pub const CANNOT_FIND_MODULE: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::CANNOT_FIND_MODULE,
        category: DiagnosticCategory::Error,
        message: "Cannot find module '{0}' or its corresponding type declarations.",
    };
    pub const FILE_NOT_FOUND: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::FILE_NOT_FOUND,
        category: DiagnosticCategory::Error,
        message: "File '{0}' not found.",
    };
    pub const JS_FILE_WITHOUT_ALLOW_JS: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::JS_FILE_WITHOUT_ALLOW_JS,
        category: DiagnosticCategory::Error,
        message: "File '{0}' is a JavaScript file. Did you mean to enable the 'allowJs' option?",
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
}

impl Diagnostic {
    pub fn error(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            message_text: message.into(),
            code,
            file: file.into(),
            start,
            length,
        }
    }

    /// Build a diagnostic from a message template, substituting `{0}`, `{1}`, ...
    pub fn from_message(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            category: message.category,
            message_text: format_message(message.message, args),
            code: message.code,
            file: file.into(),
            start,
            length,
        }
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}
