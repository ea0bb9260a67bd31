//! Entry-point wrapping, startup hooks and named entries on `HostApi`.

use jsmz_binder::AssignmentDeclarationKind;
use jsmz_common::{Extension, ScriptKind};
use jsmz_host::{
    ClassifyAssignmentFn, EnsureScriptKindFn, ExtensionFromPathFn, HostApi, HostError,
};
use jsmz_parser::{NodeArena, NodeIndex, parse_source_file};
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn test_default_entry_points() {
    let api = HostApi::new();
    assert_eq!(api.ensure_script_kind("/a.js", ScriptKind::Unknown), ScriptKind::JS);
    assert_eq!(api.ensure_script_kind("/a.jsm", ScriptKind::Unknown), ScriptKind::TS);
    assert_eq!(api.ensure_script_kind("/a.ts", ScriptKind::JSX), ScriptKind::JSX);
    assert_eq!(api.extension_from_path("/a.d.ts"), Some(Extension::Dts));
    assert_eq!(api.extension_from_path("/a.jsm"), None);
    assert!(!api.is_patched());
    assert_eq!(api.script_kind.depth(), 0);
    assert!(api.script_kind.previous().is_none());
}

#[test]
fn test_wrap_sees_previous_function_and_counts_depth() {
    let mut api = HostApi::new();
    api.extension.wrap(|previous| -> Rc<ExtensionFromPathFn> {
        Rc::new(move |file_name: &str| {
            if file_name.ends_with(".jsm") {
                Some(Extension::Js)
            } else {
                previous(file_name)
            }
        })
    });

    assert_eq!(api.extension.depth(), 1);
    assert_eq!(api.extension_from_path("/a.jsm"), Some(Extension::Js));
    assert_eq!(api.extension_from_path("/a.ts"), Some(Extension::Ts));
    assert_eq!((api.extension.original())("/a.jsm"), None);
    let previous = api.extension.previous().cloned().unwrap();
    assert_eq!(previous("/a.jsm"), None);

    api.extension.wrap(|previous| previous);
    assert_eq!(api.extension.depth(), 2);
    assert_eq!(api.extension.name(), "extension_from_path");
}

#[test]
fn test_script_kind_wrapper_can_defer_to_original() {
    let mut api = HostApi::new();
    api.script_kind.wrap(|previous| -> Rc<EnsureScriptKindFn> {
        Rc::new(move |file_name: &str, requested: ScriptKind| {
            if file_name.ends_with(".jsm") {
                ScriptKind::JS
            } else {
                previous(file_name, requested)
            }
        })
    });
    assert_eq!(api.ensure_script_kind("/m.jsm", ScriptKind::Unknown), ScriptKind::JS);
    assert_eq!(api.ensure_script_kind("/m.ts", ScriptKind::Unknown), ScriptKind::TS);
}

#[test]
fn test_binding_goes_through_installed_classifier() {
    let source = "var A = 1;\nthis.B = 2;\n";

    let api = HostApi::new();
    let mut file = parse_source_file("/a.js", source.to_string(), ScriptKind::Unknown);
    let binder = api.bind_source_file(&mut file);
    assert_eq!(binder.local_names(), vec!["A", "B"]);
    assert!(binder.exports.is_empty());

    // Treat every assignment as `exports.x = ...`.
    let mut api = HostApi::new();
    let calls = Rc::new(Cell::new(0u32));
    let seen = Rc::clone(&calls);
    api.special_assignment_kind
        .wrap(move |_| -> Rc<ClassifyAssignmentFn> {
            Rc::new(move |_: &NodeArena, _: NodeIndex| {
                seen.set(seen.get() + 1);
                AssignmentDeclarationKind::ExportsProperty
            })
        });
    let mut file = parse_source_file("/a.js", source.to_string(), ScriptKind::Unknown);
    let binder = api.bind_source_file(&mut file);
    assert_eq!(binder.export_names(), vec!["B"]);
    assert!(binder.is_commonjs_module);
    assert!(calls.get() >= 1);
}

#[test]
fn test_startup_hook_runs_once_before_definition() {
    let mut api = HostApi::new();
    let fired = Rc::new(Cell::new(0u32));
    let saw_entry = Rc::new(Cell::new(false));

    let fired_in_hook = Rc::clone(&fired);
    let saw_in_hook = Rc::clone(&saw_entry);
    api.on_first_define(
        "run",
        Box::new(move |host: &mut HostApi| {
            fired_in_hook.set(fired_in_hook.get() + 1);
            saw_in_hook.set(host.has_entry("run"));
            host.mark_patched();
        }),
    );
    assert!(api.has_startup_hook("run"));

    api.define_entry("run", Rc::new(|_: &HostApi| -> Result<(), HostError> { Ok(()) }));
    assert_eq!(fired.get(), 1);
    assert!(!saw_entry.get());
    assert!(api.is_patched());
    assert!(!api.has_startup_hook("run"));

    api.define_entry("run", Rc::new(|_: &HostApi| -> Result<(), HostError> { Ok(()) }));
    assert_eq!(fired.get(), 1);
}

#[test]
fn test_hook_for_other_entry_is_left_armed() {
    let mut api = HostApi::new();
    api.on_first_define("later", Box::new(|host: &mut HostApi| host.mark_patched()));
    api.define_entry("now", Rc::new(|_: &HostApi| -> Result<(), HostError> { Ok(()) }));
    assert!(!api.is_patched());
    assert!(api.has_startup_hook("later"));
}

#[test]
fn test_invoke_entry() {
    let mut api = HostApi::new();
    let err = api.invoke_entry("nothing").unwrap_err();
    assert!(matches!(err, HostError::MissingEntry(ref name) if name == "nothing"));

    let ran = Rc::new(Cell::new(false));
    let flag = Rc::clone(&ran);
    api.define_entry(
        "go",
        Rc::new(move |_: &HostApi| -> Result<(), HostError> {
            flag.set(true);
            Ok(())
        }),
    );
    api.invoke_entry("go").unwrap();
    assert!(ran.get());
}
