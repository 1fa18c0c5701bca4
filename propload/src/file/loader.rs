//! Loading of properties files with per-file failure isolation.

use std::io::Read;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::File};

use crate::{PropertyEntry, PropertyMap, PropsError, PropsResult};

use super::helpers::is_not_found;
use super::parser::parse_properties;

/// Entries contributed by one successfully loaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    /// Path as supplied by the caller.
    pub path: Utf8PathBuf,
    /// Entries in declaration order, one per distinct key.
    pub entries: Vec<PropertyEntry>,
}

/// Result of loading an ordered list of properties files.
///
/// Missing files and failing files never stop the remaining files from
/// loading; they are recorded here instead.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    /// Files that loaded, in input order.
    pub files: Vec<LoadedFile>,
    /// Paths skipped because they do not exist.
    pub missing: Vec<Utf8PathBuf>,
    /// Failures for files that exist but could not be opened, read or parsed.
    pub errors: Vec<Arc<PropsError>>,
}

impl LoadOutcome {
    /// Iterate over every loaded entry in file-then-line order.
    #[must_use = "iterators should be consumed"]
    pub fn entries(&self) -> impl Iterator<Item = &PropertyEntry> {
        self.files.iter().flat_map(|file| file.entries.iter())
    }
}

/// Load a single properties file.
///
/// Returns `Ok(None)` when the file does not exist. The file handle is
/// released before this function returns on every path.
///
/// # Examples
///
/// ```rust,no_run
/// use camino::Utf8Path;
/// use propload::load_properties_file;
///
/// # fn run() -> propload::PropsResult<()> {
/// if let Some(map) = load_properties_file(Utf8Path::new("app.properties"))? {
///     for (key, value) in map.iter() {
///         println!("{key}={value}");
///     }
/// }
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`PropsError::File`] when the file exists but cannot be opened or
/// read (including when it is a directory or not valid UTF-8), and
/// [`PropsError::Syntax`] when its contents are malformed.
pub fn load_properties_file(path: &Utf8Path) -> PropsResult<Option<PropertyMap>> {
    let Some(text) = read_file(path)? else {
        return Ok(None);
    };
    parse_properties(&text).map(Some).map_err(|err| {
        Arc::new(PropsError::Syntax {
            path: path.to_path_buf(),
            line: err.line,
            message: err.message,
        })
    })
}

fn read_file(path: &Utf8Path) -> PropsResult<Option<String>> {
    let mut file = match File::open_ambient(path, ambient_authority()) {
        Ok(file) => file,
        Err(err) if is_not_found(&err) => return Ok(None),
        Err(err) => return Err(PropsError::file_arc(path, err)),
    };
    let metadata = file.metadata().map_err(|err| PropsError::file_arc(path, err))?;
    if metadata.is_dir() {
        return Err(PropsError::file_arc(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path is a directory"),
        ));
    }
    let mut text = String::new();
    file.read_to_string(&mut text)
        .map_err(|err| PropsError::file_arc(path, err))?;
    drop(file);
    tracing::debug!(path = %path, "closed properties file");
    Ok(Some(text))
}

/// Load every path in order, skipping missing files and isolating failures.
///
/// Missing files produce an info notice; files that fail to open, read or
/// parse produce an error notice and contribute nothing.
///
/// # Examples
///
/// ```rust,no_run
/// use propload::load_all;
///
/// let outcome = load_all(["defaults.properties", "local.properties"]);
/// for entry in outcome.entries() {
///     println!("{}={}", entry.key, entry.raw_value);
/// }
/// ```
pub fn load_all<I, P>(paths: I) -> LoadOutcome
where
    I: IntoIterator<Item = P>,
    P: AsRef<Utf8Path>,
{
    let mut outcome = LoadOutcome::default();
    for candidate in paths {
        let path = candidate.as_ref();
        match load_properties_file(path) {
            Ok(Some(map)) => {
                tracing::info!(path = %path, properties = map.len(), "loading data from file");
                outcome.files.push(LoadedFile {
                    path: path.to_path_buf(),
                    entries: map.into_entries(),
                });
            }
            Ok(None) => {
                tracing::info!(path = %path, "data was not loaded as file does not exist");
                outcome.missing.push(path.to_path_buf());
            }
            Err(err) => {
                tracing::error!(path = %path, error = %err, "could not load properties file");
                outcome.errors.push(err);
            }
        }
    }
    outcome
}
