//! Error types produced while loading, resolving, and publishing properties.

mod aggregate;
mod constructors;
mod types;

pub use aggregate::AggregatedErrors;
pub use types::PropsError;

/// Result alias used by fallible `propload` operations.
///
/// Errors are shared behind an [`Arc`](std::sync::Arc) so a single failure
/// can be logged, recorded as a run diagnostic, and returned to the caller
/// without cloning the underlying source.
pub type PropsResult<T> = Result<T, std::sync::Arc<PropsError>>;
