//! Host modules and the command-line module.
//!
//! A host module runs a startup sequence against the host API. The
//! command-line module defines its `execute_command_line` entry and invokes
//! it right away, so anything that must affect the run has to be in place
//! before the entry is defined.

use crate::api::HostApi;
use crate::compiler_host::{CompilerHost, FileSystem};
use crate::config::load_config;
use crate::error::HostError;
use crate::program::{CompilerOptions, CreateProgramOptions, Program, ProgramArgs};
use jsmz_common::{Diagnostic, ScriptKind, normalize_path};
use serde::Serialize;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::debug;

pub const EXECUTE_COMMAND_LINE: &str = "execute_command_line";

pub trait HostModule {
    /// Run the module's startup sequence against `host`.
    fn load(&self, host: &mut HostApi) -> Result<(), HostError>;
}

#[derive(Debug, Clone, Default)]
pub struct CommandLine {
    pub files: Vec<String>,
    /// Config file, relative to the current directory
    pub project: Option<String>,
    /// Flags only switch options on; config values stay otherwise.
    pub allow_js: bool,
    pub declaration: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub file_name: String,
    pub script_kind: ScriptKind,
    pub locals: Vec<String>,
    pub exports: Vec<String>,
    pub declaration_output: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProgramReport {
    pub files: Vec<FileReport>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ProgramReport {
    pub fn from_program(program: &Program) -> ProgramReport {
        let files = program
            .files
            .iter()
            .map(|file| FileReport {
                file_name: file.source.file_name.clone(),
                script_kind: file.source.script_kind,
                locals: file.binder.local_names(),
                exports: file.binder.export_names(),
                declaration_output: file.declaration_output.clone(),
            })
            .collect();
        ProgramReport {
            files,
            diagnostics: program.diagnostics.clone(),
        }
    }

    pub fn file(&self, file_name: &str) -> Option<&FileReport> {
        self.files.iter().find(|file| file.file_name == file_name)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|diag| diag.is_error()).count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

/// Builds a program from a command line when loaded.
pub struct CommandLineModule {
    command_line: CommandLine,
    fs: Rc<dyn FileSystem>,
    current_directory: PathBuf,
    report: Rc<RefCell<Option<ProgramReport>>>,
}

impl CommandLineModule {
    pub fn new(
        command_line: CommandLine,
        fs: Rc<dyn FileSystem>,
        current_directory: impl Into<PathBuf>,
    ) -> CommandLineModule {
        CommandLineModule {
            command_line,
            fs,
            current_directory: current_directory.into(),
            report: Rc::new(RefCell::new(None)),
        }
    }

    /// Report of the last run, if the entry has executed.
    pub fn take_report(&self) -> Option<ProgramReport> {
        self.report.borrow_mut().take()
    }
}

impl HostModule for CommandLineModule {
    fn load(&self, host: &mut HostApi) -> Result<(), HostError> {
        let command_line = self.command_line.clone();
        let fs = Rc::clone(&self.fs);
        let cwd = self.current_directory.clone();
        let slot = Rc::clone(&self.report);

        host.define_entry(
            EXECUTE_COMMAND_LINE,
            Rc::new(move |api: &HostApi| -> Result<(), HostError> {
                let report = execute_command_line(api, &command_line, Rc::clone(&fs), &cwd)?;
                *slot.borrow_mut() = Some(report);
                Ok(())
            }),
        );
        host.invoke_entry(EXECUTE_COMMAND_LINE)
    }
}

pub fn execute_command_line(
    api: &HostApi,
    command_line: &CommandLine,
    fs: Rc<dyn FileSystem>,
    current_directory: &Path,
) -> Result<ProgramReport, HostError> {
    let host = CompilerHost::new(fs, current_directory);
    let mut options = CompilerOptions::default();
    let mut root_names: Vec<String> = command_line
        .files
        .iter()
        .map(|file| host.absolute_path(file).to_string_lossy().into_owned())
        .collect();

    if let Some(project) = &command_line.project {
        let config_path = host.absolute_path(project);
        let config = load_config(host.fs.as_ref(), &config_path)?;
        let config_dir = config_path
            .parent()
            .map_or_else(|| current_directory.to_path_buf(), normalize_path);
        options = config.resolve_compiler_options(&config_dir);
        root_names.extend(config.root_files(&config_dir));
    }

    options.allow_js |= command_line.allow_js;
    options.declaration |= command_line.declaration;
    debug!(roots = root_names.len(), ?options, "executing command line");

    let program = api.create_program(ProgramArgs::Options(CreateProgramOptions {
        root_names,
        options,
        host: Some(host),
    }))?;
    Ok(ProgramReport::from_program(&program))
}
