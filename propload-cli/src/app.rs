//! Run pipeline behind the `propload` binary.
//!
//! Gather settings, capture the environment, run the files, publish to the
//! configured sinks, print the report and finally hand over to the trailing
//! command, if any.

use std::ffi::OsString;
use std::process::{Command, ExitCode, ExitStatus};

use propload::figment::providers::Serialized;
use propload::{LoaderSettings, ProcessEnvSink, PropertiesFileSink, PropertySink, RunReport};

use crate::cli::Args;
use crate::error::CliError;
use crate::output;

/// Execute one `propload` invocation.
///
/// # Errors
///
/// Returns [`CliError::Settings`] for invalid settings, [`CliError::Output`]
/// or [`CliError::Json`] when the report cannot be written,
/// [`CliError::Diagnostics`] under `--strict` when the run recorded failures,
/// and [`CliError::Spawn`] when the trailing command cannot be started.
pub fn run(args: &Args) -> Result<ExitCode, CliError> {
    let settings = gather_settings(args)?;
    let env = settings.snapshot();
    let mut report = settings.run(&env);
    publish(&settings, &mut report);
    output::write_report(&report, args.format)?;
    if args.is_strict
        && let Some(err) = report.diagnostics_error()
    {
        return Err(CliError::Diagnostics(err));
    }
    run_command(&args.command)
}

/// Merge the command-line overrides over the file and environment layers.
///
/// # Errors
///
/// Returns [`CliError::Settings`] when gathering or validation fails.
pub fn gather_settings(args: &Args) -> Result<LoaderSettings, CliError> {
    let figment = LoaderSettings::figment(args.config.as_deref())?
        .merge(Serialized::defaults(args.overrides()));
    Ok(LoaderSettings::from_figment(&figment)?)
}

/// File sinks enabled by `settings`: project, then session.
fn file_sinks(settings: &LoaderSettings) -> Vec<PropertiesFileSink> {
    let project = settings
        .project_file
        .as_ref()
        .filter(|_| settings.fill_project_property)
        .map(|path| PropertiesFileSink::new("project", path.clone()));
    let session = settings
        .session_file
        .as_ref()
        .map(|path| PropertiesFileSink::new("session", path.clone()));
    project.into_iter().chain(session).collect()
}

fn publish(settings: &LoaderSettings, report: &mut RunReport) {
    let mut process = ProcessEnvSink::new();
    let mut files = file_sinks(settings);
    let mut sinks: Vec<&mut dyn PropertySink> = vec![&mut process];
    sinks.extend(files.iter_mut().map(|sink| sink as &mut dyn PropertySink));
    report.publish(&mut sinks);
}

fn run_command(command: &[OsString]) -> Result<ExitCode, CliError> {
    let Some((program, rest)) = command.split_first() else {
        return Ok(ExitCode::SUCCESS);
    };
    tracing::debug!(program = %program.to_string_lossy(), "starting command");
    let status = Command::new(program)
        .args(rest)
        .status()
        .map_err(|source| CliError::Spawn {
            program: program.to_string_lossy().into_owned(),
            source,
        })?;
    tracing::debug!(%status, "command finished");
    Ok(exit_code(status))
}

/// Forward the child's exit code; signals and out-of-range codes map to
/// failure.
fn exit_code(status: ExitStatus) -> ExitCode {
    status
        .code()
        .and_then(|code| u8::try_from(code).ok())
        .map_or(ExitCode::FAILURE, ExitCode::from)
}
