//! Sink writing into the process environment.

use std::sync::Arc;

use crate::{PropsError, PropsResult};

use super::PropertySink;

const NAME: &str = "process";

/// Sink that exports each property as a process environment variable.
///
/// Child processes spawned afterwards inherit the published values.
///
/// # Safety
///
/// Although this type is safe to use, it mutates process-wide state. Publish
/// before spawning threads that read the environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvSink;

impl ProcessEnvSink {
    /// Create the sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn check(key: &str, value: &str) -> Result<(), &'static str> {
        if key.is_empty() {
            return Err("environment variable names must not be empty");
        }
        if key.contains('=') {
            return Err("environment variable names must not contain '='");
        }
        if key.contains('\0') || value.contains('\0') {
            return Err("environment variables must not contain NUL");
        }
        Ok(())
    }
}

impl PropertySink for ProcessEnvSink {
    fn name(&self) -> &str {
        NAME
    }

    fn set_property(&mut self, key: &str, value: &str) -> PropsResult<()> {
        Self::check(key, value).map_err(|message| Arc::new(PropsError::sink(NAME, key, message)))?;
        // SAFETY: publishing happens on the run's single thread before any
        // child process is spawned.
        unsafe { std::env::set_var(key, value) };
        Ok(())
    }
}
