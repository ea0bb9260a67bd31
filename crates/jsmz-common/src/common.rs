//! Script kinds and file extensions.
//!
//! Numeric values of `ScriptKind` match the host checker's enum so they can be
//! compared against values reported by external tooling.

use serde::Serialize;
use std::path::Path;

/// How a file's text is parsed and which language rules apply to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[repr(u8)]
pub enum ScriptKind {
    #[default]
    Unknown = 0,
    JS = 1,
    JSX = 2,
    TS = 3,
    TSX = 4,
    External = 5,
    JSON = 6,
    Deferred = 7,
}

impl ScriptKind {
    /// JavaScript files get CommonJS-style special assignment binding.
    pub const fn is_js(self) -> bool {
        matches!(self, ScriptKind::JS | ScriptKind::JSX)
    }

    /// Script kind implied by a file name, or `Unknown` for unrecognized extensions.
    pub fn from_file_name(file_name: &str) -> ScriptKind {
        match Extension::from_path(Path::new(file_name)) {
            Some(Extension::Js | Extension::Mjs | Extension::Cjs) => ScriptKind::JS,
            Some(Extension::Jsx) => ScriptKind::JSX,
            Some(
                Extension::Ts
                | Extension::Mts
                | Extension::Cts
                | Extension::Dts
                | Extension::DmTs
                | Extension::DCts,
            ) => ScriptKind::TS,
            Some(Extension::Tsx) => ScriptKind::TSX,
            Some(Extension::Json) => ScriptKind::JSON,
            None => ScriptKind::Unknown,
        }
    }
}

/// File extensions the host understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Extension {
    Ts,
    Tsx,
    Dts,
    DmTs,
    DCts,
    Js,
    Jsx,
    Mjs,
    Cjs,
    Mts,
    Cts,
    Json,
}

impl Extension {
    /// Parse extension from file path
    pub fn from_path(path: &Path) -> Option<Self> {
        let path_str = path.to_string_lossy();

        // Check compound extensions first
        if path_str.ends_with(".d.ts") {
            return Some(Extension::Dts);
        }
        if path_str.ends_with(".d.mts") {
            return Some(Extension::DmTs);
        }
        if path_str.ends_with(".d.cts") {
            return Some(Extension::DCts);
        }

        match path.extension().and_then(|e| e.to_str()) {
            Some("ts") => Some(Extension::Ts),
            Some("tsx") => Some(Extension::Tsx),
            Some("js") => Some(Extension::Js),
            Some("jsx") => Some(Extension::Jsx),
            Some("mjs") => Some(Extension::Mjs),
            Some("cjs") => Some(Extension::Cjs),
            Some("mts") => Some(Extension::Mts),
            Some("cts") => Some(Extension::Cts),
            Some("json") => Some(Extension::Json),
            _ => None,
        }
    }

    /// Get the extension string
    pub const fn as_str(self) -> &'static str {
        match self {
            Extension::Ts => ".ts",
            Extension::Tsx => ".tsx",
            Extension::Dts => ".d.ts",
            Extension::DmTs => ".d.mts",
            Extension::DCts => ".d.cts",
            Extension::Js => ".js",
            Extension::Jsx => ".jsx",
            Extension::Mjs => ".mjs",
            Extension::Cjs => ".cjs",
            Extension::Mts => ".mts",
            Extension::Cts => ".cts",
            Extension::Json => ".json",
        }
    }

    pub const fn is_declaration(self) -> bool {
        matches!(self, Extension::Dts | Extension::DmTs | Extension::DCts)
    }

    /// .mts, .mjs, .d.mts files are always ESM
    pub const fn forces_esm(self) -> bool {
        matches!(self, Extension::Mts | Extension::Mjs | Extension::DmTs)
    }

    /// .cts, .cjs, .d.cts files are always CommonJS
    pub const fn forces_cjs(self) -> bool {
        matches!(self, Extension::Cts | Extension::Cjs | Extension::DCts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compound_declaration_extensions_win() {
        assert_eq!(
            Extension::from_path(Path::new("lib.dom.d.ts")),
            Some(Extension::Dts)
        );
        assert_eq!(Extension::from_path(Path::new("a.ts")), Some(Extension::Ts));
        assert_eq!(Extension::from_path(Path::new("a.jsm")), None);
    }

    #[test]
    fn script_kind_from_file_name() {
        assert_eq!(ScriptKind::from_file_name("a.js"), ScriptKind::JS);
        assert_eq!(ScriptKind::from_file_name("a.d.ts"), ScriptKind::TS);
        assert_eq!(ScriptKind::from_file_name("a.jsm"), ScriptKind::Unknown);
        assert!(ScriptKind::JSX.is_js());
        assert!(!ScriptKind::TS.is_js());
    }
}
