//! Frozen lookup source for placeholder resolution.

use std::collections::BTreeMap;

/// Immutable mapping captured once before any properties file is processed.
///
/// Resolution reads from the snapshot only, so values published during a run
/// never influence later placeholders in the same run.
///
/// # Examples
///
/// ```
/// use propload::EnvironmentSnapshot;
///
/// let env = EnvironmentSnapshot::from_iter([("sys.y", "override")]);
/// assert_eq!(env.get("sys.y"), Some("override"));
/// assert_eq!(env.get("missing"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentSnapshot {
    values: BTreeMap<String, String>,
}

impl EnvironmentSnapshot {
    /// An empty snapshot.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Capture the current process environment.
    ///
    /// Entries whose key or value is not valid UTF-8 are skipped.
    #[must_use]
    pub fn capture() -> Self {
        let values = std::env::vars_os()
            .filter_map(|(raw_key, raw_value)| {
                match (raw_key.into_string(), raw_value.into_string()) {
                    (Ok(k), Ok(v)) => Some((k, v)),
                    (name, _) => {
                        tracing::debug!(
                            key = ?name.unwrap_or_else(|raw| raw.to_string_lossy().into_owned()),
                            "skipping non UTF-8 environment entry"
                        );
                        None
                    }
                }
            })
            .collect();
        Self { values }
    }

    /// Layer `definitions` over the snapshot, replacing existing keys.
    #[must_use]
    pub fn with_definitions<I, K, V>(mut self, definitions: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.values.extend(
            definitions
                .into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
        self
    }

    /// Look up `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Number of captured entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the snapshot holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for EnvironmentSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::empty().with_definitions(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::EnvironmentSnapshot;
    use serial_test::serial;

    #[test]
    fn definitions_override_captured_values() {
        let env = EnvironmentSnapshot::from_iter([("a", "1"), ("b", "2")])
            .with_definitions([("a", "3")]);
        assert_eq!(env.get("a"), Some("3"));
        assert_eq!(env.get("b"), Some("2"));
        assert_eq!(env.len(), 2);
    }

    #[test]
    #[serial]
    fn capture_is_frozen_after_creation() {
        let _guard = test_helpers::env::set_var("PROPLOAD_SNAPSHOT_PROBE", "before");
        let env = EnvironmentSnapshot::capture();
        let _later = test_helpers::env::set_var("PROPLOAD_SNAPSHOT_PROBE", "after");
        assert_eq!(env.get("PROPLOAD_SNAPSHOT_PROBE"), Some("before"));
    }
}
