use colored::Colorize;
use jsmz_common::{Diagnostic, DiagnosticCategory, LineMap};
use jsmz_host::{FileReport, FileSystem, ProgramReport};
use rustc_hash::FxHashMap;
use std::fmt::Write as _;
use std::path::Path;
use std::rc::Rc;

/// Renders program reports as text, tsc style.
pub struct Reporter {
    color: bool,
    fs: Rc<dyn FileSystem>,
    sources: FxHashMap<String, String>,
    line_maps: FxHashMap<String, LineMap>,
}

impl Reporter {
    pub fn new(color: bool, fs: Rc<dyn FileSystem>) -> Self {
        Reporter {
            color,
            fs,
            sources: FxHashMap::default(),
            line_maps: FxHashMap::default(),
        }
    }

    /// Files first, then diagnostics, then the error count.
    pub fn render_report(&mut self, report: &ProgramReport) -> String {
        let mut out = String::new();
        for file in &report.files {
            out.push_str(&self.format_file(file));
            out.push('\n');
        }
        if !report.diagnostics.is_empty() {
            out.push('\n');
            out.push_str(&self.render(&report.diagnostics));
            out.push('\n');
        }
        match report.error_count() {
            0 => {}
            1 => out.push_str("\nFound 1 error.\n"),
            count => {
                let _ = writeln!(out, "\nFound {count} errors.");
            }
        }
        out
    }

    pub fn render(&mut self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    pub fn format_file(&self, file: &FileReport) -> String {
        let name = if self.color {
            file.file_name.bold().to_string()
        } else {
            file.file_name.clone()
        };
        let mut out = format!("{} ({:?})", name, file.script_kind);
        let _ = write!(out, "\n  locals: {}", file.locals.join(", "));
        let _ = write!(out, "\n  exports: {}", file.exports.join(", "));
        if let Some(declaration) = &file.declaration_output {
            let _ = write!(out, "\n  declaration: {declaration}");
        }
        out
    }

    pub fn format_diagnostic(&mut self, diagnostic: &Diagnostic) -> String {
        let location = self.format_location(&diagnostic.file, diagnostic.start);
        let category = self.format_category(diagnostic.category);
        let code = self.format_code(diagnostic.code);

        let mut output = String::new();
        if let Some(location) = location {
            output.push_str(&location);
        } else if !diagnostic.file.is_empty() {
            output.push_str(&diagnostic.file);
        } else {
            output.push_str("<unknown>");
        }

        output.push_str(" - ");
        output.push_str(&category);
        if !code.is_empty() {
            output.push(' ');
            output.push_str(&code);
        }
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);

        if let Some(snippet) =
            self.format_snippet(&diagnostic.file, diagnostic.start, diagnostic.length)
        {
            output.push_str(&snippet);
        }
        output
    }

    /// The offending line with the span underlined:
    ///
    /// ```text
    ///     2   import "./Missing.jsm";
    ///                ~~~~~~~~~~~~~~~
    /// ```
    fn format_snippet(&mut self, file: &str, start: u32, length: u32) -> Option<String> {
        if file.is_empty() || length == 0 {
            return None;
        }

        let (line_num, column) = self.position_for(file, start)?;
        let source = self.sources.get(file)?;
        let line_text = source.lines().nth((line_num - 1) as usize)?;
        let span_start = column - 1;
        let span_end = span_start + length;

        let mut underline = String::new();
        for (offset, ch) in line_text.char_indices() {
            let offset = offset as u32;
            if offset < span_start {
                underline.push_str(if ch == '\t' { "    " } else { " " });
            } else if offset < span_end {
                underline.push_str(if ch == '\t' { "~~~~" } else { "~" });
            } else {
                break;
            }
        }
        if !underline.contains('~') {
            underline.push('~');
        }

        let underline = if self.color {
            underline.red().to_string()
        } else {
            underline
        };
        Some(format!("\n  {line_num:>3}   {line_text}\n        {underline}"))
    }

    fn format_location(&mut self, file: &str, offset: u32) -> Option<String> {
        if file.is_empty() {
            return None;
        }
        let (line, column) = self.position_for(file, offset)?;
        Some(format!("{file}:{line}:{column}"))
    }

    /// One-based line and column.
    fn position_for(&mut self, file: &str, offset: u32) -> Option<(u32, u32)> {
        self.ensure_source(file)?;
        if !self.line_maps.contains_key(file) {
            let map = LineMap::build(self.sources.get(file)?);
            self.line_maps.insert(file.to_string(), map);
        }
        let position = self.line_maps.get(file)?.offset_to_position(offset);
        Some((position.line + 1, position.character + 1))
    }

    fn ensure_source(&mut self, file: &str) -> Option<()> {
        if !self.sources.contains_key(file) {
            let contents = self.fs.read_file(Path::new(file)).ok()?;
            self.sources.insert(file.to_string(), contents);
        }
        Some(())
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = match category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        };

        if !self.color {
            return label.to_string();
        }

        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        if code == 0 {
            return String::new();
        }
        let label = format!("TS{code}");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}
