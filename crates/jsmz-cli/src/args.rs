use clap::{Parser, ValueEnum};
use jsmz_host::CommandLine;
use std::path::PathBuf;

/// CLI arguments for the jsmz binary.
#[derive(Parser, Debug)]
#[command(
    name = "jsmz",
    version,
    about = "Bind legacy JSM modules the way the host checker would see them"
)]
pub struct CliArgs {
    /// Path to a jsmzconfig.json file.
    #[arg(short = 'p', long = "project")]
    pub project: Option<PathBuf>,

    /// Allow JavaScript files (including .jsm) to be part of the program.
    #[arg(long = "allowJs", alias = "allow-js")]
    pub allow_js: bool,

    /// Compute declaration output paths for every program file.
    #[arg(long = "declaration", short = 'd')]
    pub declaration: bool,

    /// Run the host unmodified, without legacy module support.
    #[arg(long = "noPatch", alias = "no-patch")]
    pub no_patch: bool,

    /// Output format for the program report.
    #[arg(long, value_enum, ignore_case = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable color in text output. Defaults to whether stdout is a terminal.
    #[arg(long)]
    pub pretty: Option<bool>,

    /// Input files.
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl CliArgs {
    pub fn to_command_line(&self) -> CommandLine {
        CommandLine {
            files: self
                .files
                .iter()
                .map(|file| file.to_string_lossy().into_owned())
                .collect(),
            project: self
                .project
                .as_ref()
                .map(|project| project.to_string_lossy().into_owned()),
            allow_js: self.allow_js,
            declaration: self.declaration,
        }
    }
}
