//! Program construction: load root files and their imports, parse and bind.

use crate::api::HostApi;
use crate::compiler_host::{CompilerHost, ResolvedModule};
use crate::error::HostError;
use jsmz_binder::BinderState;
use jsmz_common::diagnostics::diagnostic_messages;
use jsmz_common::{Diagnostic, ScriptKind};
use jsmz_parser::{SourceFile, parse_source_file};
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    pub allow_js: bool,
    /// Compute declaration output names
    pub declaration: bool,
    pub out_dir: Option<String>,
}

/// The single-argument form of program construction.
#[derive(Clone, Default)]
pub struct CreateProgramOptions {
    pub root_names: Vec<String>,
    pub options: CompilerOptions,
    pub host: Option<CompilerHost>,
}

/// Both call shapes of program construction.
#[derive(Clone)]
pub enum ProgramArgs {
    Options(CreateProgramOptions),
    Positional(Vec<String>, CompilerOptions, Option<CompilerHost>),
}

impl ProgramArgs {
    /// The compiler host, created over the real file system when the caller
    /// did not pass one.
    pub fn host_or_insert_default(&mut self) -> &mut CompilerHost {
        match self {
            ProgramArgs::Options(options) => options.host.get_or_insert_with(CompilerHost::real),
            ProgramArgs::Positional(_, _, host) => host.get_or_insert_with(CompilerHost::real),
        }
    }

    pub fn into_parts(self) -> (Vec<String>, CompilerOptions, Option<CompilerHost>) {
        match self {
            ProgramArgs::Options(options) => (options.root_names, options.options, options.host),
            ProgramArgs::Positional(root_names, options, host) => (root_names, options, host),
        }
    }
}

pub struct ProgramFile {
    pub source: SourceFile,
    pub binder: BinderState,
    pub declaration_output: Option<String>,
    pub resolved_modules: Vec<(String, Option<ResolvedModule>)>,
}

pub struct Program {
    pub root_names: Vec<String>,
    pub options: CompilerOptions,
    /// Files in load order: roots first, then imports breadth-first.
    pub files: Vec<ProgramFile>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Program {
    pub fn get_source_file(&self, file_name: &str) -> Option<&ProgramFile> {
        self.files
            .iter()
            .find(|file| file.source.file_name == file_name)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Host default program constructor.
pub fn create_program(api: &HostApi, args: ProgramArgs) -> Result<Program, HostError> {
    let (root_names, options, host) = args.into_parts();
    let host = host.unwrap_or_else(CompilerHost::real);

    let mut files = Vec::new();
    let mut diagnostics = Vec::new();
    let mut seen = FxHashSet::default();
    let mut queue: VecDeque<(String, bool)> = root_names
        .iter()
        .map(|name| (host.absolute_path(name).to_string_lossy().into_owned(), true))
        .collect();

    while let Some((file_name, is_root)) = queue.pop_front() {
        if !seen.insert(file_name.clone()) {
            continue;
        }

        let script_kind = api.ensure_script_kind(&file_name, ScriptKind::Unknown);
        if script_kind.is_js() && !options.allow_js {
            warn!(file = %file_name, "skipping JavaScript file without allowJs");
            if is_root {
                diagnostics.push(Diagnostic::from_message(
                    "",
                    0,
                    0,
                    &diagnostic_messages::JS_FILE_WITHOUT_ALLOW_JS,
                    &[&file_name],
                ));
            }
            continue;
        }

        let text = match host.read_file(&file_name) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                diagnostics.push(Diagnostic::from_message(
                    "",
                    0,
                    0,
                    &diagnostic_messages::FILE_NOT_FOUND,
                    &[&file_name],
                ));
                continue;
            }
            Err(source) => {
                return Err(HostError::ReadFile {
                    path: PathBuf::from(&file_name),
                    source,
                });
            }
        };

        let mut source = parse_source_file(&file_name, text, script_kind);

        let specifiers = source.module_specifiers();
        let module_names: Vec<String> = specifiers.iter().map(|(name, _)| name.clone()).collect();
        let resolutions = host.resolve_module_names(&module_names, &file_name);
        let mut resolved_modules = Vec::with_capacity(specifiers.len());
        for ((name, literal), resolved) in specifiers.into_iter().zip(resolutions) {
            match &resolved {
                Some(module) => {
                    queue.push_back((module.resolved_file_name.clone(), false));
                }
                None => {
                    let start = source.token_start(literal).unwrap_or(0);
                    let end = source.arena.get(literal).map_or(start, |node| node.end);
                    diagnostics.push(Diagnostic::from_message(
                        file_name.clone(),
                        start,
                        end.saturating_sub(start),
                        &diagnostic_messages::CANNOT_FIND_MODULE,
                        &[&name],
                    ));
                }
            }
            resolved_modules.push((name, resolved));
        }

        let binder = api.bind_source_file(&mut source);
        diagnostics.extend(source.parse_diagnostics.iter().cloned());
        diagnostics.extend(binder.diagnostics.iter().cloned());

        let declaration_output = if options.declaration {
            declaration_output_name(api, &file_name, &options)
        } else {
            None
        };

        files.push(ProgramFile {
            source,
            binder,
            declaration_output,
            resolved_modules,
        });
    }

    debug!(
        roots = root_names.len(),
        files = files.len(),
        diagnostics = diagnostics.len(),
        "created program"
    );

    Ok(Program {
        root_names,
        options,
        files,
        diagnostics,
    })
}

/// `<stem>.d.ts`, next to the file or under `out_dir`. Files without a
/// known extension, and declaration files, have no output.
fn declaration_output_name(
    api: &HostApi,
    file_name: &str,
    options: &CompilerOptions,
) -> Option<String> {
    let extension = api.extension_from_path(file_name)?;
    if extension.is_declaration() {
        return None;
    }
    let stem = Path::new(file_name).with_extension("");
    let base = match &options.out_dir {
        Some(out_dir) => Path::new(out_dir).join(stem.file_name()?),
        None => stem,
    };
    Some(format!("{}.d.ts", base.display()))
}
