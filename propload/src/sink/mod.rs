//! Destinations that receive published properties.
//!
//! The engine itself never touches global state: it returns a
//! [`RunReport`](crate::RunReport) and the host decides which sinks receive
//! it. A sink failing for one key never stops other keys or other sinks.

mod file;
mod memory;
mod process_env;

use std::sync::Arc;

pub use file::PropertiesFileSink;
pub use memory::MemorySink;
pub use process_env::ProcessEnvSink;

use crate::{Aggregates, PropertyMap, PropsError, PropsResult};

/// A key/value store that resolved properties can be written into.
pub trait PropertySink {
    /// Short name used in diagnostics, such as `process` or `session`.
    fn name(&self) -> &str;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`PropsError::Sink`] when the sink cannot hold the pair.
    fn set_property(&mut self, key: &str, value: &str) -> PropsResult<()>;

    /// Persist buffered writes. Sinks that write through need not override
    /// this.
    ///
    /// # Errors
    ///
    /// Returns [`PropsError::Sink`] when persisting fails.
    fn flush(&mut self) -> PropsResult<()> {
        Ok(())
    }
}

/// Write `properties` followed by the aggregate keys into every sink.
///
/// Returns the failures encountered; each is also logged at error level.
///
/// # Examples
///
/// ```
/// use propload::{MemorySink, PropertyMap, PropertySink, publish};
///
/// let properties: PropertyMap = [("x", "1")].into_iter().collect();
/// let mut project = MemorySink::new("project");
/// let failures = publish(&properties, None, &mut [&mut project as &mut dyn PropertySink]);
/// assert!(failures.is_empty());
/// assert_eq!(project.properties().get("x"), Some("1"));
/// ```
pub fn publish(
    properties: &PropertyMap,
    aggregates: Option<&Aggregates>,
    sinks: &mut [&mut dyn PropertySink],
) -> Vec<Arc<PropsError>> {
    let mut failures = Vec::new();
    for sink in sinks.iter_mut() {
        for (key, value) in properties.iter() {
            record(sink.set_property(key, value), &mut failures);
        }
        if let Some(aggregates) = aggregates {
            for (key, value) in aggregates.pairs() {
                record(sink.set_property(&key, value), &mut failures);
            }
        }
        record(sink.flush(), &mut failures);
        tracing::debug!(sink = sink.name(), "published properties");
    }
    failures
}

fn record(result: PropsResult<()>, failures: &mut Vec<Arc<PropsError>>) {
    if let Err(err) = result {
        tracing::error!(error = %err, "failed to publish property");
        failures.push(err);
    }
}
