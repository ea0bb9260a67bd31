use jsmz_cli::reporter::Reporter;
use jsmz_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use jsmz_common::{Diagnostic, ScriptKind};
use jsmz_host::{FileReport, MemoryFileSystem, ProgramReport};
use std::rc::Rc;

const BROKEN: &str = "var A;\nthis.EXPORTED_SYMBOLS = [\"A\", \"Missing\"];\n";

fn reporter() -> Reporter {
    let fs = MemoryFileSystem::new().with_file("/proj/Broken.jsm", BROKEN);
    Reporter::new(false, Rc::new(fs))
}

fn missing_name() -> Diagnostic {
    Diagnostic::from_message(
        "/proj/Broken.jsm",
        37,
        9,
        &diagnostic_messages::CANNOT_FIND_NAME,
        &["Missing"],
    )
}

#[test]
fn formats_location_code_and_snippet() {
    let output = reporter().format_diagnostic(&missing_name());
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(
        lines[0],
        "/proj/Broken.jsm:2:31 - error TS2304: Cannot find name 'Missing'."
    );
    assert_eq!(lines[1], "    2   this.EXPORTED_SYMBOLS = [\"A\", \"Missing\"];");
    assert_eq!(lines[2].trim_start(), "~~~~~~~~~");
    // The underline starts under the opening quote.
    assert_eq!(lines[2].find('~'), lines[1].find("\"Missing"));
}

#[test]
fn diagnostics_without_source_have_no_snippet() {
    let diagnostic = Diagnostic::error(
        "/proj/Gone.jsm",
        0,
        0,
        "File '/proj/Gone.jsm' not found.",
        diagnostic_codes::FILE_NOT_FOUND,
    );
    assert_eq!(
        reporter().format_diagnostic(&diagnostic),
        "/proj/Gone.jsm - error TS6053: File '/proj/Gone.jsm' not found."
    );

    let global = Diagnostic::error("", 0, 0, "Something global.", 0);
    assert_eq!(
        reporter().format_diagnostic(&global),
        "<unknown> - error: Something global."
    );
}

#[test]
fn renders_files_then_diagnostics() {
    let report = ProgramReport {
        files: vec![FileReport {
            file_name: "/proj/Broken.jsm".to_string(),
            script_kind: ScriptKind::JS,
            locals: vec!["A".to_string()],
            exports: vec!["A".to_string(), "Missing".to_string()],
            declaration_output: Some("/proj/Broken.d.ts".to_string()),
        }],
        diagnostics: vec![missing_name()],
    };

    let output = reporter().render_report(&report);
    assert!(output.starts_with(
        "/proj/Broken.jsm (JS)\n  locals: A\n  exports: A, Missing\n  declaration: /proj/Broken.d.ts\n\n/proj/Broken.jsm:2:31"
    ));
    assert!(output.ends_with("\nFound 1 error.\n"));
}

#[test]
fn clean_report_has_no_error_summary() {
    let report = ProgramReport {
        files: vec![FileReport {
            file_name: "/proj/A.ts".to_string(),
            script_kind: ScriptKind::TS,
            locals: Vec::new(),
            exports: Vec::new(),
            declaration_output: None,
        }],
        diagnostics: Vec::new(),
    };
    assert_eq!(
        reporter().render_report(&report),
        "/proj/A.ts (TS)\n  locals: \n  exports: \n"
    );
}
