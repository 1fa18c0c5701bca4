//! Property pairs and the insertion-ordered map that holds them.

use std::collections::HashMap;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// One logical line parsed from a properties file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEntry {
    /// Property key with escapes already decoded.
    pub key: String,
    /// Value exactly as written in the file, before placeholder resolution.
    pub raw_value: String,
}

impl PropertyEntry {
    /// Build an entry from any string-like key and value.
    #[must_use]
    pub fn new(key: impl Into<String>, raw_value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            raw_value: raw_value.into(),
        }
    }
}

/// A property after placeholder resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedProperty {
    /// Property key.
    pub key: String,
    /// Resolved value.
    pub value: String,
}

/// Insertion-ordered string map with last-write-wins semantics.
///
/// Overwriting an existing key replaces its value but keeps the position of
/// the first insertion, matching how a properties set behaves when a key is
/// declared twice.
///
/// # Examples
///
/// ```
/// use propload::PropertyMap;
///
/// let mut map = PropertyMap::new();
/// map.insert("a", "1");
/// map.insert("b", "2");
/// map.insert("a", "3");
/// let pairs: Vec<_> = map.iter().collect();
/// assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMap {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl PropertyMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `key`, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let owned_key = key.into();
        let owned_value = value.into();
        if let Some(slot) = self
            .index
            .get(&owned_key)
            .and_then(|&position| self.entries.get_mut(position))
        {
            return Some(std::mem::replace(&mut slot.1, owned_value));
        }
        self.index.insert(owned_key.clone(), self.entries.len());
        self.entries.push((owned_key, owned_value));
        None
    }

    /// Look up the value stored for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .and_then(|&position| self.entries.get(position))
            .map(|(_, value)| value.as_str())
    }

    /// Whether `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Number of distinct keys.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    #[must_use = "iterators should be consumed"]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate over the keys in insertion order.
    #[must_use = "iterators should be consumed"]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Convert the map into raw entries, preserving order.
    #[must_use]
    pub fn into_entries(self) -> Vec<PropertyEntry> {
        self.entries
            .into_iter()
            .map(|(key, raw_value)| PropertyEntry { key, raw_value })
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for PropertyMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for PropertyMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl Serialize for PropertyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
