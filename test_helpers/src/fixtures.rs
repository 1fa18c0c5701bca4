//! Temporary directories populated with properties files.
//!
//! # Examples
//!
//! ```
//! use test_helpers::fixtures::PropertiesDir;
//!
//! let dir = PropertiesDir::new()?;
//! let path = dir.write("app.properties", "x=1\n")?;
//! assert_eq!(dir.read("app.properties")?, "x=1\n");
//! assert!(path.starts_with(dir.root()));
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A temporary directory removed when dropped.
#[derive(Debug)]
pub struct PropertiesDir {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl PropertiesDir {
    /// Create an empty directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created or its path is
    /// not UTF-8.
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create temporary directory")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow!("non-UTF-8 temporary path: {}", path.display()))?;
        Ok(Self { _dir: dir, root })
    }

    /// Root of the directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Path of `name` inside the directory, whether or not it exists.
    #[must_use]
    pub fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// Write `contents` to `name`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error when the file or its parents cannot be written.
    pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) -> Result<Utf8PathBuf> {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        std::fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(path)
    }

    /// Read `name` back as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read.
    pub fn read(&self, name: &str) -> Result<String> {
        let path = self.path(name);
        std::fs::read_to_string(&path).with_context(|| format!("read {path}"))
    }
}
