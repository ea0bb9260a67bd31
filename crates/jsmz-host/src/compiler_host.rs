//! Compiler host: file access and module name resolution.

use jsmz_common::normalize_path;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::trace;

/// File-system boundary of the host.
pub trait FileSystem {
    /// True only for files; a directory never counts as a module.
    fn file_exists(&self, path: &Path) -> bool;
    fn read_file(&self, path: &Path) -> io::Result<String>;
}

/// The process file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_file(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Files held in memory, keyed by normalized path.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: FxHashMap<PathBuf, String>,
}

impl MemoryFileSystem {
    pub fn new() -> MemoryFileSystem {
        MemoryFileSystem::default()
    }

    pub fn with_file(mut self, path: impl AsRef<Path>, text: impl Into<String>) -> Self {
        self.add_file(path, text);
        self
    }

    pub fn add_file(&mut self, path: impl AsRef<Path>, text: impl Into<String>) {
        self.files.insert(normalize_path(path.as_ref()), text.into());
    }
}

impl FileSystem for MemoryFileSystem {
    fn file_exists(&self, path: &Path) -> bool {
        self.files.contains_key(&normalize_path(path))
    }

    fn read_file(&self, path: &Path) -> io::Result<String> {
        self.files.get(&normalize_path(path)).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedModule {
    pub resolved_file_name: String,
}

/// Resolves each module name imported by `containing_file`, positionally.
pub type ResolveModuleNamesFn = dyn Fn(&[String], &str) -> Vec<Option<ResolvedModule>>;

/// Extensions probed by the default resolver, in order.
const PROBE_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".d.ts", ".js", ".jsx"];

#[derive(Clone)]
pub struct CompilerHost {
    pub fs: Rc<dyn FileSystem>,
    pub current_directory: PathBuf,
    /// Replaces the default resolution when set.
    pub resolve_module_names: Option<Rc<ResolveModuleNamesFn>>,
}

impl CompilerHost {
    pub fn new(fs: Rc<dyn FileSystem>, current_directory: impl Into<PathBuf>) -> CompilerHost {
        CompilerHost {
            fs,
            current_directory: current_directory.into(),
            resolve_module_names: None,
        }
    }

    /// Host over the process file system and working directory.
    pub fn real() -> CompilerHost {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        CompilerHost::new(Rc::new(RealFileSystem), cwd)
    }

    pub fn file_exists(&self, file_name: &str) -> bool {
        self.fs.file_exists(Path::new(file_name))
    }

    pub fn read_file(&self, file_name: &str) -> io::Result<String> {
        self.fs.read_file(Path::new(file_name))
    }

    /// `file_name` made absolute against the current directory and normalized.
    pub fn absolute_path(&self, file_name: &str) -> PathBuf {
        let path = Path::new(file_name);
        if path.is_absolute() {
            normalize_path(path)
        } else {
            normalize_path(&self.current_directory.join(path))
        }
    }

    pub fn resolve_module_names(
        &self,
        module_names: &[String],
        containing_file: &str,
    ) -> Vec<Option<ResolvedModule>> {
        if let Some(resolve) = &self.resolve_module_names {
            return resolve(module_names, containing_file);
        }
        module_names
            .iter()
            .map(|name| self.resolve_module_name(name, containing_file))
            .collect()
    }

    /// Relative specifiers only: the joined path, then with each probe
    /// extension appended, then `index` files inside it.
    fn resolve_module_name(&self, module_name: &str, containing_file: &str) -> Option<ResolvedModule> {
        if !is_relative_specifier(module_name) {
            trace!(module_name, "non-relative specifier; not resolved");
            return None;
        }
        let directory = Path::new(containing_file)
            .parent()
            .unwrap_or_else(|| Path::new(""));
        let base = normalize_path(&directory.join(module_name));
        let base_text = base.to_string_lossy().into_owned();
        let index_text = base.join("index").to_string_lossy().into_owned();

        let candidates = std::iter::once(base_text.clone())
            .chain(PROBE_EXTENSIONS.iter().map(|ext| format!("{base_text}{ext}")))
            .chain(PROBE_EXTENSIONS.iter().map(|ext| format!("{index_text}{ext}")));
        for candidate in candidates {
            if self.file_exists(&candidate) {
                trace!(module_name, resolved = %candidate, "resolved module");
                return Some(ResolvedModule {
                    resolved_file_name: candidate,
                });
            }
        }
        None
    }
}

fn is_relative_specifier(name: &str) -> bool {
    name == "." || name == ".." || name.starts_with("./") || name.starts_with("../")
}
