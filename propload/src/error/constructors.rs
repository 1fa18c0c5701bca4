//! Constructors and aggregation helpers for `PropsError`.

use std::error::Error;
use std::sync::Arc;

use camino::Utf8Path;
use figment::Error as FigmentError;

use super::{AggregatedErrors, PropsError};

impl PropsError {
    /// Tries to build a [`PropsError`] from an iterator of errors.
    ///
    /// The iterator is consumed eagerly. It returns:
    /// * `None` when no errors are supplied;
    /// * the inner error when a single [`Arc`] is uniquely owned;
    /// * [`Self::Aggregate`] holding that single [`Arc`] when it is already
    ///   shared; and
    /// * [`Self::Aggregate`] combining every error for two or more inputs.
    #[must_use]
    pub fn try_aggregate<I, E>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        let mut arcs: Vec<Arc<Self>> = errors.into_iter().map(Into::into).collect();
        if arcs.is_empty() {
            return None;
        }
        Some(if arcs.len() == 1 {
            let last = arcs.pop()?;
            match Arc::try_unwrap(last) {
                Ok(err) => err,
                Err(shared) => Self::Aggregate(Box::new(AggregatedErrors::new(vec![shared]))),
            }
        } else {
            Self::Aggregate(Box::new(AggregatedErrors::new(arcs)))
        })
    }

    /// Construct a gathering error from a [`figment::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use propload::PropsError;
    /// let e = PropsError::gathering(figment::Error::from("boom"));
    /// assert!(matches!(e, PropsError::Gathering(_)));
    /// ```
    #[must_use]
    pub fn gathering(source: FigmentError) -> Self {
        Self::Gathering(Box::new(source))
    }

    /// Construct a validation error for a settings key.
    #[must_use]
    pub fn validation(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Construct a sink failure for `key`.
    #[must_use]
    pub fn sink(
        sink: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Sink {
            sink: sink.into(),
            key: key.into(),
            message: message.into(),
        }
    }

    /// Construct a file error for `path`, shared behind an [`Arc`].
    pub fn file_arc(path: &Utf8Path, err: impl Into<Box<dyn Error + Send + Sync>>) -> Arc<Self> {
        Arc::new(Self::File {
            path: path.to_path_buf(),
            source: err.into(),
        })
    }
}
