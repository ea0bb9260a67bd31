//! Command-line driver for jsmz.
//!
//! The `jsmz` binary loads the command-line host module with legacy module
//! support installed before its main entry is defined, then prints what the
//! binder saw for every program file along with the program diagnostics.

pub mod args;
pub mod driver;
pub mod reporter;
pub mod tracing_config;
