//! Command-line interface definitions for `propload`.

use std::collections::BTreeMap;
use std::ffi::OsString;

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use serde::Serialize;

/// Formats for the report written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Escaped `key=value` lines, aggregates included.
    Properties,
    /// A JSON object with `properties` and `aggregates`.
    Json,
    /// `export` lines for POSIX shells.
    Shell,
    /// Only the aggregate string with spaces.
    Args,
    /// Nothing; useful when a trailing command owns stdout.
    Silent,
}

impl ReportFormat {
    /// Returns the CLI-friendly string for this format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Properties => "properties",
            Self::Json => "json",
            Self::Shell => "shell",
            Self::Args => "args",
            Self::Silent => "silent",
        }
    }
}

/// Parsed CLI arguments for `propload`.
#[derive(Debug, Parser)]
#[command(name = "propload")]
#[command(about = "Load properties files, resolve placeholders and publish -D argument strings")]
#[command(version)]
pub struct Args {
    /// Properties file to load (repeat to load several, in order).
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub files: Vec<Utf8PathBuf>,
    /// Base key for the aggregate strings.
    #[arg(long, value_name = "NAME")]
    pub all_properties_name: Option<String>,
    /// Also publish to the project properties file.
    #[arg(long = "fill-project-property")]
    pub should_fill_project_property: bool,
    /// Destination of the project properties file.
    #[arg(long, value_name = "PATH")]
    pub project_file: Option<Utf8PathBuf>,
    /// Destination of the session properties file.
    #[arg(long, value_name = "PATH")]
    pub session_file: Option<Utf8PathBuf>,
    /// Extra definition visible to placeholders (repeatable).
    #[arg(short = 'D', value_name = "KEY=VALUE", value_parser = parse_define)]
    pub defines: Vec<(String, String)>,
    /// TOML settings file; defaults to `propload.toml` when present.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
    /// Report written to stdout.
    #[arg(long, value_enum, default_value_t = ReportFormat::Properties)]
    pub format: ReportFormat,
    /// Exit with a failure status when the run recorded failures.
    #[arg(long = "strict")]
    pub is_strict: bool,
    /// Log at debug level.
    #[arg(short = 'v', long = "verbose")]
    pub is_verbose: bool,
    /// Command to run once properties are published.
    #[arg(last = true, value_name = "COMMAND")]
    pub command: Vec<OsString>,
}

impl Args {
    /// Settings supplied on the command line, layered over every other
    /// source.
    #[must_use]
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            files: self.files.clone(),
            all_properties_name: self.all_properties_name.clone(),
            fill_project_property: self.should_fill_project_property.then_some(true),
            project_file: self.project_file.clone(),
            session_file: self.session_file.clone(),
            defines: self.defines.iter().cloned().collect(),
        }
    }
}

/// Command-line values that replace lower layers only when given.
#[derive(Debug, Default, Serialize)]
pub struct SettingsOverrides {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    files: Vec<Utf8PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    all_properties_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fill_project_property: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    project_file: Option<Utf8PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_file: Option<Utf8PathBuf>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    defines: BTreeMap<String, String>,
}

/// Parse a `-D` definition. A bare `KEY` defines an empty value.
fn parse_define(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw.split_once('=').unwrap_or((raw, ""));
    if key.trim().is_empty() {
        return Err(format!("definition `{raw}` has an empty key"));
    }
    Ok((key.to_owned(), value.to_owned()))
}
