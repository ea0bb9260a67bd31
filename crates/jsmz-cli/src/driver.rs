//! Runs the command-line host module, with or without the legacy module patch.

use crate::args::CliArgs;
use anyhow::{Context, Result, bail};
use jsmz_host::{
    CommandLineModule, EXECUTE_COMMAND_LINE, FileSystem, HostApi, HostModule, ProgramReport,
};
use std::path::Path;
use std::rc::Rc;
use tracing::info;

pub fn run(args: &CliArgs, fs: Rc<dyn FileSystem>, cwd: &Path) -> Result<ProgramReport> {
    if args.files.is_empty() && args.project.is_none() {
        bail!("no input files; pass files or --project");
    }

    let module = CommandLineModule::new(args.to_command_line(), fs, cwd);
    let mut api = HostApi::new();
    let loaded = if args.no_patch {
        module.load(&mut api)
    } else {
        jsmz_patch::load(&mut api, &module, Some(EXECUTE_COMMAND_LINE))
    };
    loaded.context("failed to execute command line")?;

    let report = module
        .take_report()
        .context("command line entry did not produce a report")?;
    info!(
        files = report.files.len(),
        errors = report.error_count(),
        patched = api.is_patched(),
        "program built"
    );
    Ok(report)
}
