//! The host API object: entry points, patch marker and named command entries.

use crate::entry::EntryPoint;
use crate::error::HostError;
use crate::program::{Program, ProgramArgs, create_program};
use jsmz_binder::{
    AssignmentClassifier, AssignmentDeclarationKind, BinderState,
    get_special_property_assignment_kind,
};
use jsmz_common::{Extension, ScriptKind};
use jsmz_parser::{NodeArena, NodeIndex, SourceFile};
use rustc_hash::FxHashMap;
use std::path::Path;
use std::rc::Rc;
use tracing::debug;

pub type ClassifyAssignmentFn = dyn Fn(&NodeArena, NodeIndex) -> AssignmentDeclarationKind;
pub type BindSourceFileFn = dyn Fn(&HostApi, &mut SourceFile) -> BinderState;
pub type EnsureScriptKindFn = dyn Fn(&str, ScriptKind) -> ScriptKind;
pub type ExtensionFromPathFn = dyn Fn(&str) -> Option<Extension>;
pub type CreateProgramFn = dyn Fn(&HostApi, ProgramArgs) -> Result<Program, HostError>;

/// A named command a host module defines during startup.
pub type CommandEntry = Rc<dyn Fn(&HostApi) -> Result<(), HostError>>;

/// Runs once, right before the entry it was registered for is defined.
pub type StartupHook = Box<dyn FnOnce(&mut HostApi)>;

pub struct HostApi {
    pub special_assignment_kind: EntryPoint<ClassifyAssignmentFn>,
    pub binder: EntryPoint<BindSourceFileFn>,
    pub script_kind: EntryPoint<EnsureScriptKindFn>,
    pub extension: EntryPoint<ExtensionFromPathFn>,
    pub program: EntryPoint<CreateProgramFn>,
    patched: bool,
    entries: FxHashMap<String, CommandEntry>,
    startup_hooks: FxHashMap<String, StartupHook>,
}

impl Default for HostApi {
    fn default() -> Self {
        HostApi::new()
    }
}

impl HostApi {
    pub fn new() -> HostApi {
        HostApi {
            special_assignment_kind: EntryPoint::<ClassifyAssignmentFn>::new(
                "get_special_property_assignment_kind",
                Rc::new(get_special_property_assignment_kind),
            ),
            binder: EntryPoint::<BindSourceFileFn>::new(
                "bind_source_file",
                Rc::new(default_bind_source_file),
            ),
            script_kind: EntryPoint::<EnsureScriptKindFn>::new(
                "ensure_script_kind",
                Rc::new(default_ensure_script_kind),
            ),
            extension: EntryPoint::<ExtensionFromPathFn>::new(
                "extension_from_path",
                Rc::new(default_extension_from_path),
            ),
            program: EntryPoint::<CreateProgramFn>::new("create_program", Rc::new(create_program)),
            patched: false,
            entries: FxHashMap::default(),
            startup_hooks: FxHashMap::default(),
        }
    }

    // =========================================================================
    // Entry points
    // =========================================================================

    pub fn get_special_property_assignment_kind(
        &self,
        arena: &NodeArena,
        expr: NodeIndex,
    ) -> AssignmentDeclarationKind {
        (self.special_assignment_kind.current())(arena, expr)
    }

    pub fn bind_source_file(&self, file: &mut SourceFile) -> BinderState {
        (self.binder.current())(self, file)
    }

    pub fn ensure_script_kind(&self, file_name: &str, requested: ScriptKind) -> ScriptKind {
        (self.script_kind.current())(file_name, requested)
    }

    pub fn extension_from_path(&self, file_name: &str) -> Option<Extension> {
        (self.extension.current())(file_name)
    }

    pub fn create_program(&self, args: ProgramArgs) -> Result<Program, HostError> {
        (self.program.current())(self, args)
    }

    // =========================================================================
    // Patch marker
    // =========================================================================

    pub fn is_patched(&self) -> bool {
        self.patched
    }

    pub fn mark_patched(&mut self) {
        self.patched = true;
    }

    // =========================================================================
    // Named entries and startup hooks
    // =========================================================================

    /// Define a named command. A startup hook registered for `name` fires
    /// first, sees the host before the definition, and is dropped.
    pub fn define_entry(&mut self, name: &str, entry: CommandEntry) {
        if let Some(hook) = self.startup_hooks.remove(name) {
            debug!(entry = name, "running startup hook");
            hook(self);
        }
        self.entries.insert(name.to_string(), entry);
    }

    pub fn on_first_define(&mut self, name: &str, hook: StartupHook) {
        self.startup_hooks.insert(name.to_string(), hook);
    }

    pub fn has_startup_hook(&self, name: &str) -> bool {
        self.startup_hooks.contains_key(name)
    }

    pub fn has_entry(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn invoke_entry(&self, name: &str) -> Result<(), HostError> {
        let entry = self
            .entries
            .get(name)
            .cloned()
            .ok_or_else(|| HostError::MissingEntry(name.to_string()))?;
        entry(self)
    }
}

impl AssignmentClassifier for HostApi {
    fn classify_assignment(&self, arena: &NodeArena, expr: NodeIndex) -> AssignmentDeclarationKind {
        self.get_special_property_assignment_kind(arena, expr)
    }
}

fn default_bind_source_file(host: &HostApi, file: &mut SourceFile) -> BinderState {
    let mut binder = BinderState::new();
    binder.bind_source_file(file, host);
    binder
}

/// A requested kind wins; otherwise the file extension decides, and files
/// with unknown extensions are treated as TypeScript.
fn default_ensure_script_kind(file_name: &str, requested: ScriptKind) -> ScriptKind {
    if requested != ScriptKind::Unknown {
        return requested;
    }
    match ScriptKind::from_file_name(file_name) {
        ScriptKind::Unknown => ScriptKind::TS,
        kind => kind,
    }
}

fn default_extension_from_path(file_name: &str) -> Option<Extension> {
    Extension::from_path(Path::new(file_name))
}
