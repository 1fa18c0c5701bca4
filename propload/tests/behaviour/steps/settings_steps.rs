//! Steps that gather layered settings inside a `figment::Jail`.

use anyhow::{Result, anyhow, ensure};
use camino::Utf8PathBuf;
use propload::{LoaderSettings, PropsError};
use rstest_bdd_macros::{given, then, when};

use super::unescape_lines;
use crate::fixtures::SettingsContext;

fn gathered(ctx: &SettingsContext) -> Result<LoaderSettings> {
    let result = ctx
        .result
        .get()
        .ok_or_else(|| anyhow!("settings have not been gathered"))?;
    result.map_err(|err| anyhow!("gathering failed: {err}"))
}

#[given("a settings file containing \"{body}\"")]
fn settings_file(settings_context: &SettingsContext, body: String) {
    settings_context.settings_file.set(unescape_lines(&body));
}

#[given("the environment variable \"{name}\" is \"{value}\"")]
fn environment_variable(settings_context: &SettingsContext, name: String, value: String) {
    let mut env = settings_context.env.take().unwrap_or_default();
    env.push((name, value));
    settings_context.env.set(env);
}

#[when("the settings are gathered")]
fn gather_settings(settings_context: &SettingsContext) -> Result<()> {
    let settings_file = settings_context.settings_file.take();
    let env = settings_context.env.take().unwrap_or_default();
    let mut result = None;
    figment::Jail::try_with(|j| {
        if let Some(contents) = &settings_file {
            j.create_file("propload.toml", contents)?;
        }
        for (name, value) in &env {
            j.set_env(name, value);
        }
        result = Some(
            LoaderSettings::figment(None)
                .and_then(|figment| LoaderSettings::from_figment(&figment)),
        );
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    let outcome = result.ok_or_else(|| anyhow!("gathering did not produce a result"))?;
    settings_context.result.set(outcome);
    Ok(())
}

#[then("the settings list files \"{files}\"")]
fn settings_list_files(settings_context: &SettingsContext, files: String) -> Result<()> {
    let settings = gathered(settings_context)?;
    let want: Vec<Utf8PathBuf> = files.split(',').map(Utf8PathBuf::from).collect();
    ensure!(
        settings.files == want,
        "unexpected files {:?}; expected {want:?}",
        settings.files
    );
    Ok(())
}

#[then("the all properties name is \"{name}\"")]
fn all_properties_name_is(settings_context: &SettingsContext, name: String) -> Result<()> {
    let settings = gathered(settings_context)?;
    ensure!(
        settings.all_properties_name == name,
        "unexpected name {}; expected {name}",
        settings.all_properties_name
    );
    Ok(())
}

#[then("gathering fails on key \"{key}\"")]
fn gathering_fails(settings_context: &SettingsContext, key: String) -> Result<()> {
    let result = settings_context
        .result
        .get()
        .ok_or_else(|| anyhow!("settings have not been gathered"))?;
    let err = result
        .err()
        .ok_or_else(|| anyhow!("gathering should have failed"))?;
    ensure!(
        matches!(err.as_ref(), PropsError::Validation { key: k, .. } if *k == key),
        "unexpected error {err}"
    );
    Ok(())
}
