//! JavaScript parser and arena AST for the jsmz compiler layer.
//!
//! The parser is tolerant: it builds real nodes for the constructs the binder
//! and the legacy-module rewrite care about (variable statements, property
//! access, calls, assignments, array/object literals) and folds everything
//! else into skipped nodes that keep their source range.

pub mod parser;
pub use parser::{NodeIndex, NodeList, ParserState};
pub use parser::node::{Node, NodeArena, NodeData};

pub mod source_file;
pub use source_file::{SourceFile, parse_source_file};
