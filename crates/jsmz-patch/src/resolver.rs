//! Module resolution by file existence.
//!
//! A specifier is joined onto the containing file's directory, made absolute
//! and normalized. The result resolves if the compiler host says the path
//! exists; there is no extension or `index` probing and no package lookup.

use jsmz_common::normalize_path;
use jsmz_host::{
    CompilerHost, CreateProgramFn, FileSystem, HostApi, HostError, Program, ProgramArgs,
    ResolveModuleNamesFn, ResolvedModule,
};
use std::path::Path;
use std::rc::Rc;
use tracing::{debug, trace};

pub fn resolve_module_name(
    fs: &dyn FileSystem,
    current_directory: &Path,
    module_name: &str,
    containing_file: &str,
) -> Option<ResolvedModule> {
    let directory = Path::new(containing_file)
        .parent()
        .unwrap_or_else(|| Path::new(""));
    let joined = directory.join(module_name);
    let absolute = if joined.is_absolute() {
        joined
    } else {
        current_directory.join(joined)
    };
    let candidate = normalize_path(&absolute);

    if fs.file_exists(&candidate) {
        let resolved_file_name = candidate.to_string_lossy().into_owned();
        trace!(module_name, resolved = %resolved_file_name, "resolved by existence");
        Some(ResolvedModule { resolved_file_name })
    } else {
        trace!(module_name, candidate = %candidate.display(), "no such file");
        None
    }
}

/// Positional: one result per name, in order.
pub fn resolve_module_names(
    fs: &dyn FileSystem,
    current_directory: &Path,
    module_names: &[String],
    containing_file: &str,
) -> Vec<Option<ResolvedModule>> {
    module_names
        .iter()
        .map(|name| resolve_module_name(fs, current_directory, name, containing_file))
        .collect()
}

/// Replace the host's resolution with [`resolve_module_names`] over the
/// host's own file system and current directory.
pub fn install_resolver(host: &mut CompilerHost) {
    let fs = Rc::clone(&host.fs);
    let current_directory = host.current_directory.clone();
    let resolve: Rc<ResolveModuleNamesFn> = Rc::new(
        move |module_names: &[String], containing_file: &str| -> Vec<Option<ResolvedModule>> {
            resolve_module_names(fs.as_ref(), &current_directory, module_names, containing_file)
        },
    );
    host.resolve_module_names = Some(resolve);
}

/// Every program gets the existence resolver, whichever call shape carried
/// the compiler host. A call without a host gets the default one.
pub fn create_program_override(previous: Rc<CreateProgramFn>) -> Rc<CreateProgramFn> {
    Rc::new(
        move |api: &HostApi, mut args: ProgramArgs| -> Result<Program, HostError> {
            let host = args.host_or_insert_default();
            install_resolver(host);
            debug!(cwd = %host.current_directory.display(), "installed existence resolver");
            previous(api, args)
        },
    )
}
