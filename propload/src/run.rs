//! Single-pass load, resolve and aggregate run.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};

use crate::{
    AggregateState, Aggregates, EnvironmentSnapshot, PropertyEntry, PropertyMap, PropertySink,
    PropsError, ResolvedProperty, load_all, publish, resolve,
};

/// Everything a run produced.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Final mapping; later duplicates overwrite earlier values.
    pub properties: PropertyMap,
    /// Aggregate strings, absent when no property was processed.
    pub aggregates: Option<Aggregates>,
    /// Input paths skipped because they do not exist.
    pub missing: Vec<Utf8PathBuf>,
    /// Non-fatal failures recorded while loading or publishing.
    pub diagnostics: Vec<Arc<PropsError>>,
}

impl RunReport {
    /// Publish the mapping and aggregates to `sinks`, recording failures as
    /// diagnostics.
    pub fn publish(&mut self, sinks: &mut [&mut dyn PropertySink]) {
        let failures = publish(&self.properties, self.aggregates.as_ref(), sinks);
        self.diagnostics.extend(failures);
    }

    /// Fold the recorded diagnostics into one error, if there were any.
    #[must_use]
    pub fn diagnostics_error(&self) -> Option<PropsError> {
        PropsError::try_aggregate(self.diagnostics.iter().cloned())
    }
}

/// Resolve `entries` in order into a mapping and aggregate state.
///
/// Every entry is resolved against the same frozen `env`, so earlier entries
/// never influence later placeholders.
///
/// # Examples
///
/// ```
/// use propload::{EnvironmentSnapshot, PropertyEntry, resolve_entries};
///
/// let env = EnvironmentSnapshot::empty();
/// let entries = [PropertyEntry::new("x", "1"), PropertyEntry::new("x", "2")];
/// let (resolved, state) = resolve_entries(&entries, &env);
/// assert_eq!(resolved.len(), 2);
/// let aggregates = state.finish("loaded.properties").unwrap();
/// assert_eq!(aggregates.with_spaces, "-Dx=1 -Dx=2");
/// ```
pub fn resolve_entries<'e, I>(
    entries: I,
    env: &EnvironmentSnapshot,
) -> (Vec<ResolvedProperty>, AggregateState)
where
    I: IntoIterator<Item = &'e PropertyEntry>,
{
    let mut state = AggregateState::default();
    let resolved = entries
        .into_iter()
        .map(|entry| {
            let value = resolve(&entry.raw_value, env).to_owned();
            tracing::debug!(key = %entry.key, value = %value, "loading property");
            state.push(&entry.key, &value);
            ResolvedProperty {
                key: entry.key.clone(),
                value,
            }
        })
        .collect();
    (resolved, state)
}

/// Load `paths` in order and resolve every entry against `env`.
///
/// Missing and failing files are skipped; the run always completes.
///
/// # Examples
///
/// ```rust,no_run
/// use propload::{EnvironmentSnapshot, run_files};
///
/// let report = run_files(
///     ["app.properties"],
///     "loaded.properties",
///     &EnvironmentSnapshot::capture(),
/// );
/// if let Some(aggregates) = &report.aggregates {
///     println!("{}", aggregates.with_spaces);
/// }
/// ```
pub fn run_files<I, P>(paths: I, all_properties_name: &str, env: &EnvironmentSnapshot) -> RunReport
where
    I: IntoIterator<Item = P>,
    P: AsRef<Utf8Path>,
{
    tracing::info!("starting loading properties from files");
    let outcome = load_all(paths);
    let (resolved, state) = resolve_entries(outcome.entries(), env);
    let mut properties = PropertyMap::new();
    for ResolvedProperty { key, value } in resolved {
        properties.insert(key, value);
    }
    let aggregates = state.finish(all_properties_name);
    if let Some(aggregates) = &aggregates {
        tracing::info!(
            key = %aggregates.base_key,
            value = %aggregates.with_spaces,
            no_space_key = %aggregates.no_space_key(),
            "setting aggregate properties"
        );
    }
    RunReport {
        properties,
        aggregates,
        missing: outcome.missing,
        diagnostics: outcome.errors,
    }
}
