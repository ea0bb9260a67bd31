//! JavaScript scanner/tokenizer for the jsmz compiler layer.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token and node kinds
//! - `ScannerState` - Tokenizer state machine
//! - `skip_trivia` - Whitespace/comment skipping for diagnostic positions

mod scanner;
mod syntax_kind;

pub use scanner::{ScannerSnapshot, ScannerState, skip_trivia};
pub use syntax_kind::{SyntaxKind, keyword_kind};
