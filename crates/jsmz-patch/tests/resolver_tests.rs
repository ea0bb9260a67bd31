//! Existence-based module resolution.

use jsmz_common::ScriptKind;
use jsmz_common::diagnostics::diagnostic_codes;
use jsmz_host::{
    CompilerHost, CompilerOptions, CreateProgramOptions, HostApi, MemoryFileSystem, ProgramArgs,
    RealFileSystem, ResolvedModule,
};
use jsmz_patch::{install_resolver, patch, resolve_module_name, resolve_module_names};
use std::fs;
use std::path::Path;
use std::rc::Rc;

fn resolved(name: &str) -> Option<ResolvedModule> {
    Some(ResolvedModule {
        resolved_file_name: name.to_string(),
    })
}

#[test]
fn test_sibling_resolves_when_it_exists() {
    let fs = MemoryFileSystem::new().with_file("/a/b/d", "");
    let cwd = Path::new("/");
    assert_eq!(resolve_module_name(&fs, cwd, "./d", "/a/b/c.ts"), resolved("/a/b/d"));

    let empty = MemoryFileSystem::new();
    assert_eq!(resolve_module_name(&empty, cwd, "./d", "/a/b/c.ts"), None);
}

#[test]
fn test_no_extension_or_index_probing() {
    let fs = MemoryFileSystem::new()
        .with_file("/a/b/d.ts", "")
        .with_file("/a/b/e/index.js", "");
    let cwd = Path::new("/");
    assert_eq!(resolve_module_name(&fs, cwd, "./d", "/a/b/c.ts"), None);
    assert_eq!(resolve_module_name(&fs, cwd, "./e", "/a/b/c.ts"), None);
    assert_eq!(
        resolve_module_name(&fs, cwd, "./d.ts", "/a/b/c.ts"),
        resolved("/a/b/d.ts")
    );
}

#[test]
fn test_paths_are_joined_and_normalized() {
    let fs = MemoryFileSystem::new()
        .with_file("/a/x.jsm", "")
        .with_file("/z/y.jsm", "")
        .with_file("/work/b/bare.jsm", "");
    let cwd = Path::new("/work");

    assert_eq!(
        resolve_module_name(&fs, cwd, "../x.jsm", "/a/b/c.jsm"),
        resolved("/a/x.jsm")
    );
    assert_eq!(
        resolve_module_name(&fs, cwd, "./../../a/./x.jsm", "/a/b/c.jsm"),
        resolved("/a/x.jsm")
    );
    // Absolute specifiers ignore the containing directory.
    assert_eq!(
        resolve_module_name(&fs, cwd, "/z/y.jsm", "/a/b/c.jsm"),
        resolved("/z/y.jsm")
    );
    // Relative containing files resolve against the current directory, and
    // bare names are treated like relative ones.
    assert_eq!(
        resolve_module_name(&fs, cwd, "bare.jsm", "b/c.jsm"),
        resolved("/work/b/bare.jsm")
    );
}

#[test]
fn test_results_are_positional() {
    let fs = MemoryFileSystem::new().with_file("/m/one.jsm", "").with_file("/m/three.jsm", "");
    let names = vec![
        "./one.jsm".to_string(),
        "./two.jsm".to_string(),
        "./three.jsm".to_string(),
    ];
    assert_eq!(
        resolve_module_names(&fs, Path::new("/"), &names, "/m/main.jsm"),
        vec![resolved("/m/one.jsm"), None, resolved("/m/three.jsm")]
    );
    assert!(resolve_module_names(&fs, Path::new("/"), &[], "/m/main.jsm").is_empty());
}

#[test]
fn test_installed_resolver_uses_host_file_system() {
    let fs = MemoryFileSystem::new()
        .with_file("/m/dep.jsm", "")
        .with_file("/m/other.ts", "");
    let mut host = CompilerHost::new(Rc::new(fs), "/m");
    let names = vec!["./dep.jsm".to_string(), "./other".to_string()];

    assert_eq!(
        host.resolve_module_names(&names, "/m/main.jsm"),
        vec![resolved("/m/dep.jsm"), resolved("/m/other.ts")]
    );
    install_resolver(&mut host);
    assert_eq!(
        host.resolve_module_names(&names, "/m/main.jsm"),
        vec![resolved("/m/dep.jsm"), None]
    );
}

#[test]
fn test_real_file_system() {
    let dir = tempfile::tempdir().unwrap();
    let modules = dir.path().join("modules");
    fs::create_dir(&modules).unwrap();
    fs::write(modules.join("Dep.jsm"), "var dep;\n").unwrap();
    let containing = modules.join("Main.jsm");
    let containing = containing.to_str().unwrap();

    let found = resolve_module_name(&RealFileSystem, dir.path(), "./Dep.jsm", containing).unwrap();
    assert_eq!(Path::new(&found.resolved_file_name), modules.join("Dep.jsm"));
    assert_eq!(
        resolve_module_name(&RealFileSystem, dir.path(), "./Missing.jsm", containing),
        None
    );
}

#[test]
fn test_program_without_host_gets_default_host() {
    let dir = tempfile::tempdir().unwrap();
    let main = dir.path().join("Main.jsm");
    fs::write(&main, "import \"./Dep.jsm\";\nvar main;\n").unwrap();
    fs::write(dir.path().join("Dep.jsm"), "var dep;\nthis.EXPORTED_SYMBOLS = [\"dep\"];\n")
        .unwrap();

    let mut api = HostApi::new();
    patch(&mut api);
    let program = api
        .create_program(ProgramArgs::Options(CreateProgramOptions {
            root_names: vec![main.to_string_lossy().into_owned()],
            options: CompilerOptions {
                allow_js: true,
                ..CompilerOptions::default()
            },
            host: None,
        }))
        .unwrap();

    assert!(program.diagnostics.is_empty(), "{:?}", program.diagnostics);
    assert_eq!(program.files.len(), 2);
    let dep = &program.files[1];
    assert_eq!(dep.source.script_kind, ScriptKind::JS);
    assert_eq!(dep.binder.export_names(), vec!["dep"]);
}

#[test]
fn test_directories_do_not_resolve() {
    let dir = tempfile::tempdir().unwrap();
    let lib = dir.path().join("lib");
    fs::create_dir(&lib).unwrap();
    fs::write(lib.join("index.jsm"), "var index;\n").unwrap();
    let containing = dir.path().join("Main.jsm");
    let containing = containing.to_str().unwrap();

    assert_eq!(
        resolve_module_name(&RealFileSystem, dir.path(), "./lib", containing),
        None
    );
    assert!(
        resolve_module_name(&RealFileSystem, dir.path(), "./lib/index.jsm", containing).is_some()
    );

    let memory = MemoryFileSystem::new().with_file("/m/lib/index.jsm", "");
    assert_eq!(
        resolve_module_name(&memory, Path::new("/"), "./lib", "/m/Main.jsm"),
        None
    );
}

#[test]
fn test_positional_program_without_host_gets_existence_resolver() {
    let dir = tempfile::tempdir().unwrap();
    let main = dir.path().join("Main.jsm");
    fs::write(&main, "import \"./Helper\";\nvar main;\n").unwrap();
    fs::write(dir.path().join("Helper.ts"), "var helper;\n").unwrap();

    let mut api = HostApi::new();
    patch(&mut api);
    let program = api
        .create_program(ProgramArgs::Positional(
            vec![main.to_string_lossy().into_owned()],
            CompilerOptions {
                allow_js: true,
                ..CompilerOptions::default()
            },
            None,
        ))
        .unwrap();

    assert_eq!(program.files.len(), 1);
    assert_eq!(program.files[0].resolved_modules, vec![("./Helper".to_string(), None)]);
    assert_eq!(
        program.diagnostics.iter().map(|d| d.code).collect::<Vec<_>>(),
        vec![diagnostic_codes::CANNOT_FIND_MODULE]
    );
}
