//! Logging setup for the `propload` binary.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::CliError;

/// Install a `fmt` subscriber writing to stderr.
///
/// `RUST_LOG` is honoured and defaults to `info` when unset. `verbose` adds a
/// `debug` directive on top.
///
/// # Errors
///
/// Returns [`CliError::Logging`] when a global subscriber is already set.
pub fn init(verbose: bool) -> Result<(), CliError> {
    let spec = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter(&spec, verbose))
        .try_init()
        .map_err(|err| CliError::Logging(err.to_string()))
}

fn filter(spec: &str, verbose: bool) -> EnvFilter {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(spec);
    if verbose {
        filter.add_directive(LevelFilter::DEBUG.into())
    } else {
        filter
    }
}
