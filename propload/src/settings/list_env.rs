//! Environment provider that reads selected keys as comma-separated lists.
//!
//! Wraps `figment::providers::Env` so `PROPLOAD_FILES=a.properties,b.properties`
//! deserialises into a list. Unlike generic list detection, the listed keys
//! are always split, so a single path still becomes a one-element list.
//! Other keys are parsed the way [`Env`] parses them.

use figment::providers::Env;
use figment::{
    Profile, Provider,
    error::Error,
    util::nest,
    value::{Dict, Map, Value},
};
use uncased::UncasedStr;

/// Environment provider with list support for named keys.
#[derive(Clone)]
pub struct ListEnv {
    /// Inner environment provider that performs the actual variable access.
    inner: Env,
    /// Keys, after prefix stripping, that are always read as lists.
    list_keys: Vec<String>,
}

impl ListEnv {
    /// Create a provider reading variables that start with `prefix`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use propload::ListEnv;
    /// let env = ListEnv::prefixed("PROPLOAD_").list_key("files");
    /// let _ = env;
    /// ```
    #[must_use]
    pub fn prefixed(prefix: &str) -> Self {
        Self {
            inner: Env::prefixed(prefix),
            list_keys: Vec::new(),
        }
    }

    /// Always read `key` as a comma-separated list.
    #[must_use]
    pub fn list_key(mut self, key: &str) -> Self {
        self.list_keys.push(key.to_owned());
        self
    }

    fn is_list_key(&self, key: &UncasedStr) -> bool {
        self.list_keys.iter().any(|list_key| key == list_key.as_str())
    }

    fn parse_list(raw: &str) -> Value {
        raw.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| Value::from(item.to_owned()))
            .collect::<Vec<_>>()
            .into()
    }

    fn parse_scalar(raw: &str) -> Value {
        let trimmed = raw.trim();
        trimmed
            .parse()
            .unwrap_or_else(|_| Value::from(trimmed.to_owned()))
    }
}

impl Provider for ListEnv {
    fn metadata(&self) -> figment::Metadata {
        self.inner.metadata()
    }

    fn profile(&self) -> Option<Profile> {
        Some(self.inner.profile.clone())
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();
        for (k, v) in self.inner.iter() {
            let value = if self.is_list_key(&k) {
                Self::parse_list(&v)
            } else {
                Self::parse_scalar(&v)
            };
            let Some(nested) = nest(k.as_str(), value).into_dict() else {
                return Err(Error::from(format!(
                    "environment key `{k}` produced a non-object value"
                )));
            };
            dict.extend(nested);
        }
        Ok(self.inner.profile.collect(dict))
    }
}
