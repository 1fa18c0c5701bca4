//! Append-only `-Dkey=value` aggregate strings.

use serde::Serialize;

/// Suffix of the key holding the underscore-substituted aggregate.
pub const NO_SPACE_SUFFIX: &str = ".nospace";

/// Running `-Dkey=value` logs built in resolution order.
///
/// Every resolved entry contributes a fragment, including entries whose key
/// is later overwritten, so the strings are a log rather than a map.
///
/// # Examples
///
/// ```
/// use propload::AggregateState;
///
/// let mut state = AggregateState::default();
/// state.push("x", "1");
/// state.push("title", "a b");
/// let aggregates = state.finish("loaded.properties").unwrap();
/// assert_eq!(aggregates.with_spaces, "-Dx=1 -Dtitle=a b");
/// assert_eq!(aggregates.no_spaces, "-Dx=1 -Dtitle=a_b");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateState {
    with_spaces: String,
    no_spaces: String,
}

impl AggregateState {
    /// Append the fragment for one resolved property.
    pub fn push(&mut self, key: &str, value: &str) {
        for (buffer, rendered) in [
            (&mut self.with_spaces, value.to_owned()),
            (&mut self.no_spaces, value.replace(' ', "_")),
        ] {
            buffer.push_str(" -D");
            buffer.push_str(key);
            buffer.push('=');
            buffer.push_str(&rendered);
        }
    }

    /// Trim both logs and pair them with `base_key`.
    ///
    /// Returns `None` when nothing but whitespace was accumulated.
    #[must_use]
    pub fn finish(self, base_key: &str) -> Option<Aggregates> {
        let with_spaces = self.with_spaces.trim();
        if with_spaces.is_empty() {
            return None;
        }
        Some(Aggregates {
            base_key: base_key.to_owned(),
            with_spaces: with_spaces.to_owned(),
            no_spaces: self.no_spaces.trim().to_owned(),
        })
    }
}

/// Final aggregate strings together with the keys they publish under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Aggregates {
    /// Key for the space-preserving aggregate.
    pub base_key: String,
    /// `-Dkey=value` fragments joined by spaces.
    pub with_spaces: String,
    /// Same fragments with spaces inside values replaced by `_`.
    pub no_spaces: String,
}

impl Aggregates {
    /// Key for the underscore-substituted aggregate.
    #[must_use]
    pub fn no_space_key(&self) -> String {
        format!("{}{NO_SPACE_SUFFIX}", self.base_key)
    }

    /// Both aggregates as `(key, value)` pairs in publishing order.
    #[must_use]
    pub fn pairs(&self) -> [(String, &str); 2] {
        [
            (self.base_key.clone(), self.with_spaces.as_str()),
            (self.no_space_key(), self.no_spaces.as_str()),
        ]
    }
}
