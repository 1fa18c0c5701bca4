//! Run settings gathered from layered sources.
//!
//! Layers merge in this order, later layers winning:
//!
//! 1. built-in defaults ([`LoaderSettings::default`]);
//! 2. a TOML settings file;
//! 3. `PROPLOAD_`-prefixed environment variables;
//! 4. whatever the host merges on top (typically command-line flags).

mod list_env;

use std::collections::BTreeMap;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

pub use list_env::ListEnv;

use crate::{EnvironmentSnapshot, PropsError, PropsResult, RunReport, run_files};

/// Default base key for the aggregate strings.
pub const DEFAULT_ALL_PROPERTIES_NAME: &str = "loaded.properties";

/// Prefix for environment variables read as settings.
pub const ENV_PREFIX: &str = "PROPLOAD_";

/// Settings file picked up from the working directory when present.
pub const DEFAULT_SETTINGS_FILE: &str = "propload.toml";

/// Settings for one load run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderSettings {
    /// Properties files, processed in order.
    pub files: Vec<Utf8PathBuf>,
    /// Base key for the aggregate strings.
    pub all_properties_name: String,
    /// Also publish to the project properties sink.
    pub fill_project_property: bool,
    /// Destination of the project properties sink.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_file: Option<Utf8PathBuf>,
    /// Destination of the session properties sink, enabled when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_file: Option<Utf8PathBuf>,
    /// Extra definitions layered over the environment snapshot.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub defines: BTreeMap<String, String>,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            all_properties_name: DEFAULT_ALL_PROPERTIES_NAME.to_owned(),
            fill_project_property: false,
            project_file: None,
            session_file: None,
            defines: BTreeMap::new(),
        }
    }
}

impl LoaderSettings {
    /// Build the layered figment: defaults, the settings file, then the
    /// environment.
    ///
    /// An explicit `settings_file` must exist. Without one,
    /// [`DEFAULT_SETTINGS_FILE`] in the working directory is used when
    /// present.
    ///
    /// # Errors
    ///
    /// Returns [`PropsError::File`] when the settings file cannot be read or
    /// is not valid TOML.
    pub fn figment(settings_file: Option<&Utf8Path>) -> PropsResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(data) = read_settings_file(settings_file)? {
            figment = figment.merge(Toml::string(&data));
        }
        Ok(figment.merge(ListEnv::prefixed(ENV_PREFIX).list_key("files")))
    }

    /// Extract and validate settings from `figment`.
    ///
    /// # Examples
    ///
    /// ```
    /// use figment::{Figment, providers::Serialized};
    /// use propload::LoaderSettings;
    ///
    /// let figment = Figment::from(Serialized::defaults(LoaderSettings {
    ///     files: vec!["app.properties".into()],
    ///     ..LoaderSettings::default()
    /// }));
    /// let settings = LoaderSettings::from_figment(&figment).unwrap();
    /// assert_eq!(settings.all_properties_name, "loaded.properties");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`PropsError::Gathering`] when extraction fails and
    /// [`PropsError::Validation`] when the settings are inconsistent.
    pub fn from_figment(figment: &Figment) -> PropsResult<Self> {
        let settings: Self = figment
            .extract()
            .map_err(|err| Arc::new(PropsError::gathering(err)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check the settings for missing or inconsistent values.
    ///
    /// # Errors
    ///
    /// Returns [`PropsError::Validation`] naming the offending key.
    pub fn validate(&self) -> PropsResult<()> {
        if self.files.is_empty() {
            return Err(Arc::new(PropsError::validation(
                "files",
                "at least one properties file is required",
            )));
        }
        if self.all_properties_name.trim().is_empty() {
            return Err(Arc::new(PropsError::validation(
                "all_properties_name",
                "must contain visible characters",
            )));
        }
        if self.fill_project_property && self.project_file.is_none() {
            return Err(Arc::new(PropsError::validation(
                "project_file",
                "required when fill_project_property is enabled",
            )));
        }
        Ok(())
    }

    /// Capture the process environment with [`Self::defines`] layered on top.
    #[must_use]
    pub fn snapshot(&self) -> EnvironmentSnapshot {
        EnvironmentSnapshot::capture().with_definitions(self.defines.clone())
    }

    /// Run the configured files against `env`.
    #[must_use]
    pub fn run(&self, env: &EnvironmentSnapshot) -> RunReport {
        run_files(&self.files, &self.all_properties_name, env)
    }
}

fn read_settings_file(explicit: Option<&Utf8Path>) -> PropsResult<Option<String>> {
    let (path, required) = match explicit {
        Some(path) => (path, true),
        None => (Utf8Path::new(DEFAULT_SETTINGS_FILE), false),
    };
    if !required && !path.is_file() {
        return Ok(None);
    }
    let data = std::fs::read_to_string(path).map_err(|err| PropsError::file_arc(path, err))?;
    // Validate first so parse failures carry the settings file path.
    toml::from_str::<toml::Value>(&data).map_err(|err| PropsError::file_arc(path, err))?;
    tracing::debug!(path = %path, "read settings file");
    Ok(Some(data))
}
