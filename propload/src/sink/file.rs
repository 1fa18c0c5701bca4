//! Sink persisting properties to a `.properties` file.

use std::io::Write;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};

use crate::file::helpers::parent_or_dot;
use crate::file::write_properties;
use crate::{PropertyMap, PropsError, PropsResult};

use super::PropertySink;

/// Sink that buffers properties and writes them as properties text on
/// [`flush`](PropertySink::flush).
///
/// The file is replaced on each flush and its parent directory is created
/// when missing.
#[derive(Debug, Clone)]
pub struct PropertiesFileSink {
    name: String,
    path: Utf8PathBuf,
    properties: PropertyMap,
}

impl PropertiesFileSink {
    /// Create a sink named `name` that writes to `path`.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            properties: PropertyMap::new(),
        }
    }

    /// Destination path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn failure(&self, err: &std::io::Error) -> Arc<PropsError> {
        Arc::new(PropsError::sink(
            self.name.as_str(),
            self.path.as_str(),
            err.to_string(),
        ))
    }

    fn open_parent(&self) -> std::io::Result<(Dir, String)> {
        let parent = parent_or_dot(&self.path);
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| std::io::Error::other("cannot determine file name for sink path"))?;
        Dir::create_ambient_dir_all(parent, ambient_authority())?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
        Ok((dir, file_name.to_owned()))
    }
}

impl PropertySink for PropertiesFileSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_property(&mut self, key: &str, value: &str) -> PropsResult<()> {
        self.properties.insert(key, value);
        Ok(())
    }

    fn flush(&mut self) -> PropsResult<()> {
        let (dir, file_name) = self.open_parent().map_err(|err| self.failure(&err))?;
        let mut file = dir
            .open_with(
                &file_name,
                OpenOptions::new().write(true).create(true).truncate(true),
            )
            .map_err(|err| self.failure(&err))?;
        write_properties(&self.properties, &mut file).map_err(|err| self.failure(&err))?;
        file.flush().map_err(|err| self.failure(&err))?;
        tracing::info!(
            sink = %self.name,
            path = %self.path,
            properties = self.properties.len(),
            "wrote properties file"
        );
        Ok(())
    }
}
