//! Shared scenario state for the behavioural tests.

use camino::Utf8PathBuf;
use propload::{LoaderSettings, MemorySink, PropsError, RunReport};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use std::sync::Arc;
use test_helpers::fixtures::PropertiesDir;

/// State shared by the loading scenarios.
#[derive(Debug, Default, ScenarioState)]
pub struct LoadContext {
    /// Directory holding the scenario's properties files.
    pub workspace: Slot<PropertiesDir>,
    /// Input paths in the order they were declared.
    pub files: Slot<Vec<Utf8PathBuf>>,
    /// Definitions that make up the environment snapshot.
    pub defines: Slot<Vec<(String, String)>>,
    /// Report of the last run.
    pub report: Slot<RunReport>,
    /// Project sink filled by the publish step.
    pub project: Slot<MemorySink>,
}

/// State shared by the settings scenarios.
#[derive(Debug, Default, ScenarioState)]
pub struct SettingsContext {
    /// Contents of `propload.toml`, when the scenario writes one.
    pub settings_file: Slot<String>,
    /// Environment variables set while gathering.
    pub env: Slot<Vec<(String, String)>>,
    /// Outcome of the last gathering.
    pub result: Slot<Result<LoaderSettings, Arc<PropsError>>>,
}

/// Provides a loading context backed by a fresh temporary directory.
#[fixture]
pub fn load_context() -> LoadContext {
    let ctx = LoadContext::default();
    ctx.workspace.set(
        PropertiesDir::new().unwrap_or_else(|err| panic!("create properties dir: {err}")),
    );
    ctx
}

/// Provides a clean settings context.
#[fixture]
pub fn settings_context() -> SettingsContext {
    SettingsContext::default()
}
