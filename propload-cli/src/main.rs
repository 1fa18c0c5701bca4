//! CLI entrypoint for `propload`.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use propload_cli::{app, cli::Args, logging};

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = logging::init(args.is_verbose) {
        report_failure(&err);
        return ExitCode::FAILURE;
    }
    match app::run(&args) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "propload failed");
            ExitCode::FAILURE
        }
    }
}

fn report_failure(err: &dyn std::error::Error) {
    // Logging is not available yet; stderr is the last resort.
    drop(writeln!(std::io::stderr().lock(), "propload: {err}"));
}
