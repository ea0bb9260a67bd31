use anyhow::{Context, Result};
use clap::Parser;
use jsmz_cli::args::{CliArgs, OutputFormat};
use jsmz_cli::reporter::Reporter;
use jsmz_cli::{driver, tracing_config};
use jsmz_host::{FileSystem, RealFileSystem};
use std::io::IsTerminal;
use std::process::ExitCode;
use std::rc::Rc;

fn main() -> Result<ExitCode> {
    // Only installs a subscriber when JSMZ_LOG or RUST_LOG is set.
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let fs: Rc<dyn FileSystem> = Rc::new(RealFileSystem);
    let report = driver::run(&args, Rc::clone(&fs), &cwd)?;

    match args.format {
        OutputFormat::Json => {
            let json = if args.pretty.unwrap_or(false) {
                serde_json::to_string_pretty(&report)
            } else {
                serde_json::to_string(&report)
            }
            .context("failed to serialize report")?;
            println!("{json}");
        }
        OutputFormat::Text => {
            let color = args
                .pretty
                .unwrap_or_else(|| std::io::stdout().is_terminal());
            let mut reporter = Reporter::new(color, fs);
            print!("{}", reporter.render_report(&report));
        }
    }

    Ok(if report.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
