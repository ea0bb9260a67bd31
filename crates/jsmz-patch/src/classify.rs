//! `.jsm` classification: legacy modules are JavaScript.

use jsmz_common::{Extension, ScriptKind};
use jsmz_host::{EnsureScriptKindFn, ExtensionFromPathFn};
use std::rc::Rc;

pub const JSM_EXTENSION: &str = ".jsm";

#[inline]
pub fn is_jsm_file(file_name: &str) -> bool {
    file_name.ends_with(JSM_EXTENSION)
}

/// `.jsm` is `JS` whatever kind was requested; anything else goes to `previous`.
pub fn ensure_script_kind_override(previous: Rc<EnsureScriptKindFn>) -> Rc<EnsureScriptKindFn> {
    Rc::new(move |file_name: &str, requested: ScriptKind| {
        if is_jsm_file(file_name) {
            ScriptKind::JS
        } else {
            previous(file_name, requested)
        }
    })
}

pub fn extension_from_path_override(previous: Rc<ExtensionFromPathFn>) -> Rc<ExtensionFromPathFn> {
    Rc::new(move |file_name: &str| {
        if is_jsm_file(file_name) {
            Some(Extension::Js)
        } else {
            previous(file_name)
        }
    })
}
