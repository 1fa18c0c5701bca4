//! Report writers for `propload`.

use std::io::{self, Write};

use camino::Utf8PathBuf;
use propload::{Aggregates, PropertyMap, RunReport, write_properties};
use serde::Serialize;

use crate::cli::ReportFormat;
use crate::error::CliError;

#[derive(Serialize)]
struct JsonReport<'a> {
    properties: &'a PropertyMap,
    aggregates: Option<&'a Aggregates>,
    missing: &'a [Utf8PathBuf],
    diagnostics: Vec<String>,
}

/// Write `report` to stdout in `format`.
///
/// # Errors
///
/// Returns [`CliError::Output`] when stdout cannot be written and
/// [`CliError::Json`] when JSON serialisation fails.
pub fn write_report(report: &RunReport, format: ReportFormat) -> Result<(), CliError> {
    tracing::debug!(format = format.as_str(), "writing report");
    let mut stdout = io::stdout().lock();
    render(report, format, &mut stdout)?;
    stdout.flush().map_err(CliError::Output)
}

/// Render `report` in `format` into `out`.
///
/// # Errors
///
/// Returns [`CliError::Output`] when `out` cannot be written and
/// [`CliError::Json`] when JSON serialisation fails.
pub fn render<W: Write>(
    report: &RunReport,
    format: ReportFormat,
    out: &mut W,
) -> Result<(), CliError> {
    match format {
        ReportFormat::Properties => {
            write_properties(&published(report), out).map_err(CliError::Output)
        }
        ReportFormat::Json => render_json(report, out),
        ReportFormat::Shell => render_shell(&published(report), out).map_err(CliError::Output),
        ReportFormat::Args => match &report.aggregates {
            Some(aggregates) => {
                writeln!(out, "{}", aggregates.with_spaces).map_err(CliError::Output)
            }
            None => Ok(()),
        },
        ReportFormat::Silent => Ok(()),
    }
}

/// Properties followed by the aggregate keys, as the sinks receive them.
fn published(report: &RunReport) -> PropertyMap {
    let mut map = report.properties.clone();
    if let Some(aggregates) = &report.aggregates {
        map.extend(aggregates.pairs());
    }
    map
}

fn render_json<W: Write>(report: &RunReport, out: &mut W) -> Result<(), CliError> {
    let payload = JsonReport {
        properties: &report.properties,
        aggregates: report.aggregates.as_ref(),
        missing: &report.missing,
        diagnostics: report.diagnostics.iter().map(ToString::to_string).collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &payload)?;
    writeln!(out).map_err(CliError::Output)
}

fn render_shell<W: Write>(map: &PropertyMap, out: &mut W) -> io::Result<()> {
    for (key, value) in map.iter() {
        writeln!(out, "export {}={}", shell_name(key), shell_quote(value))?;
    }
    Ok(())
}

/// Map a property key onto a shell variable name: characters outside
/// `[A-Za-z0-9_]` become `_` and a leading digit gains a `_` prefix.
fn shell_name(key: &str) -> String {
    let mut name: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests panic to surface unexpected failures")]
mod tests {
    use super::{render, shell_name, shell_quote};
    use crate::cli::ReportFormat;
    use propload::{EnvironmentSnapshot, PropertyEntry, RunReport, resolve_entries};
    use rstest::{fixture, rstest};

    #[fixture]
    fn report() -> RunReport {
        let entries = [
            PropertyEntry::new("app.name", "demo app"),
            PropertyEntry::new("port", "8080"),
        ];
        let (resolved, state) = resolve_entries(&entries, &EnvironmentSnapshot::empty());
        RunReport {
            properties: resolved.into_iter().map(|p| (p.key, p.value)).collect(),
            aggregates: state.finish("loaded.properties"),
            ..RunReport::default()
        }
    }

    fn rendered(report: &RunReport, format: ReportFormat) -> String {
        let mut out = Vec::new();
        render(report, format, &mut out).expect("render report");
        String::from_utf8(out).expect("UTF-8 report")
    }

    #[rstest]
    fn properties_format_lists_aggregates_after_properties(report: RunReport) {
        assert_eq!(
            rendered(&report, ReportFormat::Properties),
            concat!(
                "app.name=demo app\n",
                "port=8080\n",
                "loaded.properties=-Dapp.name\\=demo app -Dport\\=8080\n",
                "loaded.properties.nospace=-Dapp.name\\=demo_app -Dport\\=8080\n",
            )
        );
    }

    #[rstest]
    fn args_format_prints_the_aggregate_only(report: RunReport) {
        assert_eq!(
            rendered(&report, ReportFormat::Args),
            "-Dapp.name=demo app -Dport=8080\n"
        );
    }

    #[test]
    fn args_format_is_empty_without_aggregates() {
        assert_eq!(rendered(&RunReport::default(), ReportFormat::Args), "");
    }

    #[rstest]
    fn json_format_nests_properties_and_aggregates(report: RunReport) {
        let value: serde_json::Value =
            serde_json::from_str(&rendered(&report, ReportFormat::Json)).expect("valid JSON");
        assert_eq!(value["properties"]["port"], "8080");
        assert_eq!(value["aggregates"]["no_spaces"], "-Dapp.name=demo_app -Dport=8080");
        assert_eq!(value["missing"], serde_json::json!([]));
    }

    #[rstest]
    fn shell_format_exports_sanitised_names(report: RunReport) {
        let shell = rendered(&report, ReportFormat::Shell);
        assert!(shell.contains("export app_name='demo app'\n"), "{shell}");
        assert!(
            shell.contains("export loaded_properties_nospace='-Dapp.name=demo_app -Dport=8080'\n"),
            "{shell}"
        );
    }

    #[rstest]
    #[case::dotted("sys.y", "sys_y")]
    #[case::leading_digit("1st", "_1st")]
    #[case::empty("", "_")]
    fn shell_names_are_valid_identifiers(#[case] key: &str, #[case] expected: &str) {
        assert_eq!(shell_name(key), expected);
    }

    #[test]
    fn single_quotes_are_closed_and_reopened() {
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }
}
