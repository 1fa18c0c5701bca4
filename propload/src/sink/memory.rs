//! In-memory sink for embedding applications and tests.

use crate::{PropertyMap, PropsResult};

use super::PropertySink;

/// Sink that collects published properties into a [`PropertyMap`].
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    name: String,
    properties: PropertyMap,
}

impl MemorySink {
    /// Create an empty sink reported under `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: PropertyMap::new(),
        }
    }

    /// Properties stored so far.
    #[must_use]
    pub const fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    /// Consume the sink, returning its properties.
    #[must_use]
    pub fn into_properties(self) -> PropertyMap {
        self.properties
    }
}

impl PropertySink for MemorySink {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_property(&mut self, key: &str, value: &str) -> PropsResult<()> {
        self.properties.insert(key, value);
        Ok(())
    }
}
