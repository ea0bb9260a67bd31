//! Common types and utilities for the jsmz compiler layer.
//!
//! This crate provides foundational types used across all jsmz crates:
//! - Script classification (`ScriptKind`, `Extension`)
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, message templates)
//! - Line/column mapping for byte offsets (`LineMap`, `Position`)
//! - Lexical path normalization used by module resolution

// Common types - script kinds and file extensions
pub mod common;
pub use common::{Extension, ScriptKind};

// Diagnostics shared by the parser, binder and program
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticMessage};

// Position types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};

// Path helpers
pub mod path;
pub use path::normalize_path;
