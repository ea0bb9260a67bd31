//! Arena AST and parser state.

pub mod base;
pub use base::{NodeIndex, NodeList};

pub mod node;
mod node_access;
mod node_arena;

pub mod node_flags {
    pub const NONE: u16 = 0;
    pub const LET: u16 = 1 << 0;
    pub const CONST: u16 = 1 << 1;
    /// `declare` modifier or ambient context
    pub const AMBIENT: u16 = 1 << 2;
    /// Created by a factory call rather than by the parser
    pub const SYNTHESIZED: u16 = 1 << 3;

    pub const BLOCK_SCOPED: u16 = LET | CONST;
}

mod state;
mod state_expressions;
mod state_statements;
pub use state::ParserState;
