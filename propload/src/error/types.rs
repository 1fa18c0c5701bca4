//! Primary error enum for property loading flows.

use camino::Utf8PathBuf;
use figment::Error as FigmentError;
use thiserror::Error;

use super::aggregate::AggregatedErrors;

/// Errors that can occur while loading and publishing properties.
///
/// None of these abort a run on their own; the engine records them as
/// diagnostics and keeps going. Only settings failures ([`Self::Gathering`]
/// and [`Self::Validation`]) stop a host before the run starts.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PropsError {
    /// A properties file exists but could not be opened or read.
    #[error("Could not open properties file '{path}': {source}")]
    File {
        /// Path that triggered the failure.
        path: Utf8PathBuf,
        /// Underlying error reported by the filesystem.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A properties file was read but its contents are malformed.
    #[error("Malformed properties file '{path}' at line {line}: {message}")]
    Syntax {
        /// Path of the malformed file.
        path: Utf8PathBuf,
        /// One-based natural line number where the logical line started.
        line: usize,
        /// Human-readable explanation of the syntax problem.
        message: String,
    },

    /// A sink refused or failed to store a property.
    #[error("Failed to write '{key}' to the {sink} sink: {message}")]
    Sink {
        /// Name of the sink that failed.
        sink: String,
        /// Property key being written.
        key: String,
        /// Human-readable explanation of the failure.
        message: String,
    },

    /// Error while gathering settings from providers.
    #[error("Failed to gather settings: {0}")]
    Gathering(#[from] Box<FigmentError>),

    /// Validation failures when building settings.
    #[error("Validation failed for '{key}': {message}")]
    Validation {
        /// Settings key that failed validation.
        key: String,
        /// Human-readable explanation of the validation failure.
        message: String,
    },

    /// Multiple errors were recorded during a single run.
    #[error("multiple property errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}
