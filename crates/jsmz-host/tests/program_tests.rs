//! Program construction over an in-memory file system.

use jsmz_common::diagnostics::diagnostic_codes;
use jsmz_host::{
    CompilerHost, CompilerOptions, CreateProgramOptions, HostApi, MemoryFileSystem, Program,
    ProgramArgs, ResolveModuleNamesFn, ResolvedModule,
};
use std::rc::Rc;

fn host(fs: MemoryFileSystem) -> CompilerHost {
    CompilerHost::new(Rc::new(fs), "/proj")
}

fn build(fs: MemoryFileSystem, roots: &[&str], options: CompilerOptions) -> Program {
    let api = HostApi::new();
    api.create_program(ProgramArgs::Options(CreateProgramOptions {
        root_names: roots.iter().map(|root| root.to_string()).collect(),
        options,
        host: Some(host(fs)),
    }))
    .unwrap()
}

fn file_names(program: &Program) -> Vec<&str> {
    program
        .files
        .iter()
        .map(|file| file.source.file_name.as_str())
        .collect()
}

fn codes(program: &Program) -> Vec<u32> {
    program.diagnostics.iter().map(|diag| diag.code).collect()
}

#[test]
fn test_imports_are_loaded_breadth_first() {
    let fs = MemoryFileSystem::new()
        .with_file("/proj/a.ts", "import { b } from \"./b\";\nimport \"./lib/c\";\n")
        .with_file("/proj/b.ts", "import \"./lib\";\n")
        .with_file("/proj/lib/c.d.ts", "declare var c: number;\n")
        .with_file("/proj/lib/index.ts", "var idx;\n");

    let program = build(fs, &["a.ts"], CompilerOptions::default());
    assert_eq!(
        file_names(&program),
        vec![
            "/proj/a.ts",
            "/proj/b.ts",
            "/proj/lib/c.d.ts",
            "/proj/lib/index.ts"
        ]
    );
    assert!(program.diagnostics.is_empty(), "{:?}", program.diagnostics);

    let a = program.get_source_file("/proj/a.ts").unwrap();
    assert_eq!(
        a.resolved_modules,
        vec![
            (
                "./b".to_string(),
                Some(ResolvedModule {
                    resolved_file_name: "/proj/b.ts".to_string()
                })
            ),
            (
                "./lib/c".to_string(),
                Some(ResolvedModule {
                    resolved_file_name: "/proj/lib/c.d.ts".to_string()
                })
            ),
        ]
    );
}

#[test]
fn test_shared_import_is_loaded_once() {
    let fs = MemoryFileSystem::new()
        .with_file("/proj/a.ts", "import \"./shared\";\n")
        .with_file("/proj/b.ts", "import \"./shared\";\n")
        .with_file("/proj/shared.ts", "var s;\n");
    let program = build(fs, &["a.ts", "b.ts"], CompilerOptions::default());
    assert_eq!(
        file_names(&program),
        vec!["/proj/a.ts", "/proj/b.ts", "/proj/shared.ts"]
    );
}

#[test]
fn test_unresolved_import_reports_at_specifier() {
    let fs = MemoryFileSystem::new()
        .with_file("/proj/a.ts", "import { a } from \"./missing\";\nimport \"pkg\";\n");
    let program = build(fs, &["a.ts"], CompilerOptions::default());

    assert_eq!(
        codes(&program),
        vec![
            diagnostic_codes::CANNOT_FIND_MODULE,
            diagnostic_codes::CANNOT_FIND_MODULE
        ]
    );
    let first = &program.diagnostics[0];
    assert_eq!(first.file, "/proj/a.ts");
    assert_eq!(first.start, 18);
    assert_eq!(first.length, 11);
    assert!(first.message_text.contains("'./missing'"));
    assert!(program.has_errors());
}

#[test]
fn test_missing_root_reports_file_not_found() {
    let program = build(MemoryFileSystem::new(), &["nope.ts"], CompilerOptions::default());
    assert_eq!(codes(&program), vec![diagnostic_codes::FILE_NOT_FOUND]);
    assert!(program.diagnostics[0].message_text.contains("/proj/nope.ts"));
    assert!(program.files.is_empty());
}

#[test]
fn test_javascript_requires_allow_js() {
    let fs = MemoryFileSystem::new()
        .with_file("/proj/a.js", "var a;\n")
        .with_file("/proj/b.ts", "import \"./c.js\";\n")
        .with_file("/proj/c.js", "var c;\n");

    let program = build(fs.clone(), &["a.js", "b.ts"], CompilerOptions::default());
    assert_eq!(codes(&program), vec![diagnostic_codes::JS_FILE_WITHOUT_ALLOW_JS]);
    assert_eq!(file_names(&program), vec!["/proj/b.ts"]);

    let options = CompilerOptions {
        allow_js: true,
        ..CompilerOptions::default()
    };
    let program = build(fs, &["a.js", "b.ts"], options);
    assert!(program.diagnostics.is_empty());
    assert_eq!(
        file_names(&program),
        vec!["/proj/a.js", "/proj/b.ts", "/proj/c.js"]
    );
}

#[test]
fn test_declaration_output_names() {
    let fs = MemoryFileSystem::new()
        .with_file("/proj/src/a.ts", "import \"./types\";\n")
        .with_file("/proj/src/types.d.ts", "declare var t: number;\n");

    let options = CompilerOptions {
        declaration: true,
        ..CompilerOptions::default()
    };
    let program = build(fs.clone(), &["src/a.ts"], options.clone());
    let outputs: Vec<Option<&str>> = program
        .files
        .iter()
        .map(|file| file.declaration_output.as_deref())
        .collect();
    assert_eq!(outputs, vec![Some("/proj/src/a.d.ts"), None]);

    let options = CompilerOptions {
        out_dir: Some("/proj/out".to_string()),
        ..options
    };
    let program = build(fs.clone(), &["src/a.ts"], options);
    assert_eq!(
        program.files[0].declaration_output.as_deref(),
        Some("/proj/out/a.d.ts")
    );

    let program = build(fs, &["src/a.ts"], CompilerOptions::default());
    assert!(program.files.iter().all(|file| file.declaration_output.is_none()));
}

#[test]
fn test_resolver_override_replaces_default() {
    let fs = MemoryFileSystem::new()
        .with_file("/proj/a.ts", "import \"anything\";\n")
        .with_file("/proj/target.ts", "var t;\n");
    let mut host = host(fs);
    let resolve: Rc<ResolveModuleNamesFn> = Rc::new(
        |names: &[String], containing: &str| -> Vec<Option<ResolvedModule>> {
            assert_eq!(containing, "/proj/a.ts");
            names
                .iter()
                .map(|_| {
                    Some(ResolvedModule {
                        resolved_file_name: "/proj/target.ts".to_string(),
                    })
                })
                .collect()
        },
    );
    host.resolve_module_names = Some(resolve);

    let api = HostApi::new();
    let program = api
        .create_program(ProgramArgs::Positional(
            vec!["/proj/a.ts".to_string()],
            CompilerOptions::default(),
            Some(host),
        ))
        .unwrap();
    assert_eq!(file_names(&program), vec!["/proj/a.ts", "/proj/target.ts"]);
    assert!(program.diagnostics.is_empty());
}

#[test]
fn test_program_args_accessors() {
    let fs = MemoryFileSystem::new();
    let mut args = ProgramArgs::Options(CreateProgramOptions {
        host: Some(host(fs)),
        ..CreateProgramOptions::default()
    });
    assert_eq!(
        args.host_or_insert_default().current_directory,
        std::path::PathBuf::from("/proj")
    );
    let (roots, options, host) = args.into_parts();
    assert!(roots.is_empty());
    assert_eq!(options, CompilerOptions::default());
    assert!(host.is_some());
}
