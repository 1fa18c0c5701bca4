//! Shared helpers for `propload` binary tests.

use std::ffi::OsStr;
use std::process::{Command, Output};

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};

/// Variables that would leak settings into the binary under test.
const SETTINGS_VARS: [&str; 6] = [
    "PROPLOAD_FILES",
    "PROPLOAD_ALL_PROPERTIES_NAME",
    "PROPLOAD_FILL_PROJECT_PROPERTY",
    "PROPLOAD_PROJECT_FILE",
    "PROPLOAD_SESSION_FILE",
    "PROPLOAD_DEFINES",
];

/// Resolve the compiled `propload` binary from test environment variables.
pub(crate) fn propload_exe() -> Result<Utf8PathBuf> {
    ["CARGO_BIN_EXE_propload", "NEXTEST_BIN_EXE_propload"]
        .into_iter()
        .find_map(|var| std::env::var(var).ok())
        .map(Utf8PathBuf::from)
        .ok_or_else(|| anyhow!("propload binary path not found in environment"))
}

/// Build a `propload` command running in `cwd` with no inherited settings.
pub(crate) fn propload(cwd: &Utf8Path) -> Result<Command> {
    let mut cmd = Command::new(propload_exe()?);
    cmd.current_dir(cwd).env("RUST_LOG", "warn");
    for var in SETTINGS_VARS {
        cmd.env_remove(var);
    }
    Ok(cmd)
}

/// Run `cmd` with `args` and capture its output.
pub(crate) fn run<I, S>(mut cmd: Command, args: I) -> Result<Output>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    cmd.args(args).output().context("run propload")
}

/// Stdout of `output` as UTF-8.
pub(crate) fn stdout(output: &Output) -> Result<String> {
    String::from_utf8(output.stdout.clone()).context("stdout is not UTF-8")
}

/// Stderr of `output`, lossily decoded for assertion messages.
pub(crate) fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
