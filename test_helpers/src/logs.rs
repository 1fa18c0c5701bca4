//! Capture of `tracing` events emitted while a closure runs.
//!
//! The subscriber is installed for the current thread only, so tests running
//! in parallel do not see each other's events.
//!
//! # Examples
//!
//! ```
//! use test_helpers::logs;
//!
//! let ((), captured) = logs::capture(|| tracing::warn!(key = "x", "odd value"));
//! assert!(captured.has_event("WARN", "odd value"));
//! assert!(!captured.has_event("ERROR", "odd value"));
//! ```

use std::io;
use std::sync::Arc;

use parking_lot::Mutex;

/// Formatted events recorded by [`capture`], one per line.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Everything recorded so far.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    /// Whether an event at `level` (`"INFO"`, `"WARN"`, ...) mentions
    /// `needle`.
    #[must_use]
    pub fn has_event(&self, level: &str, needle: &str) -> bool {
        self.contents()
            .lines()
            .any(|line| line.trim_start().starts_with(level) && line.contains(needle))
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a thread-local subscriber recording every event.
#[must_use]
pub fn capture<R>(f: impl FnOnce() -> R) -> (R, CapturedLogs) {
    let captured = CapturedLogs::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, captured)
}
