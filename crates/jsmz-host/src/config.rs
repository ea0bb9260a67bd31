//! `jsmzconfig.json` loading.

use crate::compiler_host::FileSystem;
use crate::error::HostError;
use crate::program::CompilerOptions;
use jsmz_common::normalize_path;
use serde::{Deserialize, Deserializer};
use std::path::Path;

/// Custom deserializer for boolean options that accepts both bool and string values.
/// This handles configs containing `"allowJs": "true"` instead of `"allowJs": true`.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{s}'. Expected true, false, 'true', or 'false'"
            ))),
        },
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct JsmzConfig {
    #[serde(default)]
    pub compiler_options: Option<ConfigCompilerOptions>,
    #[serde(default)]
    pub files: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConfigCompilerOptions {
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub allow_js: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub declaration: Option<bool>,
    #[serde(default)]
    pub out_dir: Option<String>,
}

impl JsmzConfig {
    /// Options with paths resolved against the config file's directory.
    pub fn resolve_compiler_options(&self, config_dir: &Path) -> CompilerOptions {
        let Some(raw) = &self.compiler_options else {
            return CompilerOptions::default();
        };
        CompilerOptions {
            allow_js: raw.allow_js.unwrap_or(false),
            declaration: raw.declaration.unwrap_or(false),
            out_dir: raw.out_dir.as_ref().map(|dir| {
                normalize_path(&config_dir.join(dir))
                    .to_string_lossy()
                    .into_owned()
            }),
        }
    }

    pub fn root_files(&self, config_dir: &Path) -> Vec<String> {
        self.files
            .iter()
            .flatten()
            .map(|file| {
                normalize_path(&config_dir.join(file))
                    .to_string_lossy()
                    .into_owned()
            })
            .collect()
    }
}

/// Parse config text. Comments and trailing commas are accepted.
pub fn parse_config(source: &str) -> Result<JsmzConfig, serde_json::Error> {
    let stripped = strip_jsonc(source);
    let normalized = remove_trailing_commas(&stripped);
    serde_json::from_str(&normalized)
}

pub fn load_config(fs: &dyn FileSystem, path: &Path) -> Result<JsmzConfig, HostError> {
    let source = fs.read_file(path).map_err(|source| HostError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&source).map_err(|source| HostError::Config {
        path: path.to_path_buf(),
        source,
    })
}

fn strip_jsonc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape = false;
    let mut in_line_comment = false;
    let mut in_block_comment = false;

    while let Some(ch) = chars.next() {
        if in_line_comment {
            if ch == '\n' {
                in_line_comment = false;
                out.push(ch);
            }
            continue;
        }

        if in_block_comment {
            if ch == '*' && chars.peek() == Some(&'/') {
                chars.next();
                in_block_comment = false;
            } else if ch == '\n' {
                out.push(ch);
            }
            continue;
        }

        if in_string {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match (ch, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(ch);
            }
            ('/', Some('/')) => {
                chars.next();
                in_line_comment = true;
            }
            ('/', Some('*')) => {
                chars.next();
                in_block_comment = true;
            }
            _ => out.push(ch),
        }
    }

    out
}

fn remove_trailing_commas(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape = false;

    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        if ch == '"' {
            in_string = true;
        } else if ch == ',' {
            let next = chars.clone().find(|c| !c.is_whitespace());
            if matches!(next, Some('}' | ']')) {
                continue;
            }
        }
        out.push(ch);
    }

    out
}
