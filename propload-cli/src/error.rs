//! Error types for the `propload` binary.

use std::sync::Arc;

use propload::PropsError;
use thiserror::Error;

/// Errors that stop the `propload` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Settings could not be gathered or failed validation.
    #[error("invalid settings: {0}")]
    Settings(#[from] Arc<PropsError>),

    /// `--strict` was given and the run recorded failures.
    #[error("run recorded failures: {0}")]
    Diagnostics(#[source] PropsError),

    /// The report could not be serialised as JSON.
    #[error("failed to render JSON report: {0}")]
    Json(#[from] serde_json::Error),

    /// The report could not be written to stdout.
    #[error("failed to write report: {0}")]
    Output(#[source] std::io::Error),

    /// The trailing command could not be started.
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        /// Program named by the trailing command.
        program: String,
        /// Underlying spawn failure.
        #[source]
        source: std::io::Error,
    },

    /// A global tracing subscriber was already installed.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
