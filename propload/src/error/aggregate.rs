//! Container for several `PropsError` values recorded by one run.

use std::{error::Error, fmt, sync::Arc};

use super::PropsError;

/// Collection of [`PropsError`]s recorded during a single run.
///
/// # Examples
///
/// ```
/// use propload::PropsError;
/// let e = PropsError::try_aggregate(vec![
///     PropsError::sink("process", "a=b", "bad key"),
///     PropsError::sink("session", "c", "disk full"),
/// ]);
/// if let Some(PropsError::Aggregate(agg)) = e {
///     assert_eq!(agg.len(), 2);
/// }
/// ```
#[derive(Debug)]
pub struct AggregatedErrors(Vec<Arc<PropsError>>);

impl AggregatedErrors {
    /// Create a new aggregation from a vector of errors.
    #[must_use]
    pub const fn new(errors: Vec<Arc<PropsError>>) -> Self {
        Self(errors)
    }

    /// Number of errors in the aggregation.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the aggregation holds no errors.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {e}", i + 1)?;
        }
        Ok(())
    }
}

impl Error for AggregatedErrors {}
