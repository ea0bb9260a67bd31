//! Host compiler API for the jsmz legacy-module layer.
//!
//! `HostApi` is the table of replaceable entry points (assignment
//! classification, binding, script-kind and extension classification,
//! program construction). Everything that should be observable to an
//! installed override goes through that table.

pub mod api;
pub use api::{
    BindSourceFileFn, ClassifyAssignmentFn, CommandEntry, CreateProgramFn, EnsureScriptKindFn,
    ExtensionFromPathFn, HostApi, StartupHook,
};

pub mod entry;
pub use entry::EntryPoint;

pub mod error;
pub use error::HostError;

pub mod compiler_host;
pub use compiler_host::{
    CompilerHost, FileSystem, MemoryFileSystem, RealFileSystem, ResolveModuleNamesFn,
    ResolvedModule,
};

pub mod program;
pub use program::{
    CompilerOptions, CreateProgramOptions, Program, ProgramArgs, ProgramFile, create_program,
};

pub mod config;
pub use config::{JsmzConfig, load_config, parse_config};

pub mod command_line;
pub use command_line::{
    CommandLine, CommandLineModule, EXECUTE_COMMAND_LINE, FileReport, HostModule, ProgramReport,
};
