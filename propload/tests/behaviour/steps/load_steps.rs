//! Steps that write properties files, run the loader and inspect the report.

use anyhow::{Context, Result, anyhow, ensure};
use camino::Utf8PathBuf;
use propload::{EnvironmentSnapshot, MemorySink, PropertySink, RunReport, run_files};
use rstest_bdd_macros::{given, then, when};

use super::unescape_lines;
use crate::fixtures::LoadContext;

fn workspace_path(ctx: &LoadContext, name: &str) -> Result<Utf8PathBuf> {
    ctx.workspace
        .with_ref(|dir| dir.path(name))
        .ok_or_else(|| anyhow!("workspace should be set"))
}

fn push_file(ctx: &LoadContext, path: Utf8PathBuf) {
    let mut files = ctx.files.take().unwrap_or_default();
    files.push(path);
    ctx.files.set(files);
}

fn with_report<T>(ctx: &LoadContext, f: impl FnOnce(&RunReport) -> T) -> Result<T> {
    ctx.report
        .with_ref(f)
        .ok_or_else(|| anyhow!("properties have not been loaded"))
}

#[given("a properties file \"{name}\" containing \"{body}\"")]
fn properties_file(load_context: &LoadContext, name: String, body: String) -> Result<()> {
    let path = workspace_path(load_context, &name)?;
    std::fs::write(&path, unescape_lines(&body)).with_context(|| format!("write {path}"))?;
    push_file(load_context, path);
    Ok(())
}

#[given("a missing properties file \"{name}\"")]
fn missing_properties_file(load_context: &LoadContext, name: String) -> Result<()> {
    let path = workspace_path(load_context, &name)?;
    ensure!(!path.exists(), "{path} should not exist");
    push_file(load_context, path);
    Ok(())
}

#[given("the environment defines \"{key}\" as \"{value}\"")]
fn environment_defines(load_context: &LoadContext, key: String, value: String) {
    let mut defines = load_context.defines.take().unwrap_or_default();
    defines.push((key, value));
    load_context.defines.set(defines);
}

#[when("the properties are loaded")]
fn load_properties(load_context: &LoadContext) {
    let files = load_context.files.take().unwrap_or_default();
    let env: EnvironmentSnapshot = load_context
        .defines
        .take()
        .unwrap_or_default()
        .into_iter()
        .collect();
    load_context
        .report
        .set(run_files(&files, "loaded.properties", &env));
}

#[when("the report is published to a project sink")]
fn publish_to_project(load_context: &LoadContext) -> Result<()> {
    let mut report = load_context
        .report
        .take()
        .ok_or_else(|| anyhow!("properties have not been loaded"))?;
    let mut project = MemorySink::new("project");
    report.publish(&mut [&mut project as &mut dyn PropertySink]);
    load_context.report.set(report);
    load_context.project.set(project);
    Ok(())
}

#[then("property \"{key}\" is \"{value}\"")]
fn property_is(load_context: &LoadContext, key: String, value: String) -> Result<()> {
    let actual = with_report(load_context, |report| {
        report.properties.get(&key).map(str::to_owned)
    })?;
    ensure!(
        actual.as_deref() == Some(value.as_str()),
        "property {key} was {actual:?}; expected {value}"
    );
    Ok(())
}

#[then("property \"{key}\" is absent")]
fn property_is_absent(load_context: &LoadContext, key: String) -> Result<()> {
    let present = with_report(load_context, |report| report.properties.contains_key(&key))?;
    ensure!(!present, "property {key} should be absent");
    Ok(())
}

#[then("the aggregate is \"{value}\"")]
fn aggregate_is(load_context: &LoadContext, value: String) -> Result<()> {
    let actual = with_report(load_context, |report| {
        report
            .aggregates
            .as_ref()
            .map(|aggregates| aggregates.with_spaces.clone())
    })?;
    ensure!(
        actual.as_deref() == Some(value.as_str()),
        "aggregate was {actual:?}; expected {value}"
    );
    Ok(())
}

#[then("no aggregate is produced")]
fn no_aggregate(load_context: &LoadContext) -> Result<()> {
    let produced = with_report(load_context, |report| report.aggregates.is_some())?;
    ensure!(!produced, "no aggregate expected");
    Ok(())
}

#[then("{count:usize} diagnostics are recorded")]
fn diagnostics_recorded(load_context: &LoadContext, count: usize) -> Result<()> {
    let actual = with_report(load_context, |report| report.diagnostics.len())?;
    ensure!(actual == count, "recorded {actual} diagnostics; expected {count}");
    Ok(())
}

#[then("the project sink holds \"{key}\" as \"{value}\"")]
fn project_sink_holds(load_context: &LoadContext, key: String, value: String) -> Result<()> {
    let actual = load_context
        .project
        .with_ref(|sink| sink.properties().get(&key).map(str::to_owned))
        .ok_or_else(|| anyhow!("nothing was published"))?;
    ensure!(
        actual.as_deref() == Some(value.as_str()),
        "project sink held {actual:?} for {key}; expected {value}"
    );
    Ok(())
}
