//! Helpers for safely mutating environment variables in tests.
//!
//! Each mutation holds a global re-entrant mutex and returns an RAII guard
//! that restores the previous state when dropped, removing the variable if
//! it was previously absent. Guards stacked on the same key restore in LIFO
//! order. Use [`lock`] when a test needs exclusive access across several
//! operations.
//!
//! # Examples
//!
//! ```
//! use test_helpers::env;
//!
//! let _g = env::set_var("PROPLOAD_DOC_KEY", "VALUE");
//! // `PROPLOAD_DOC_KEY` is set for the duration of the guard.
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Wrapper around `std::env::set_var`.
///
/// # Safety
///
/// Callers must hold `ENV_MUTEX`.
unsafe fn env_set_var(key: &str, value: &OsStr) {
    unsafe { env::set_var(key, value) };
}

/// Wrapper around `std::env::remove_var`.
///
/// # Safety
///
/// Callers must hold `ENV_MUTEX`.
unsafe fn env_remove_var(key: &str) {
    unsafe { env::remove_var(key) };
}

fn mutate<F>(key: String, mutator: F, _held: &ReentrantMutexGuard<'static, ()>) -> EnvVarGuard
where
    F: FnOnce(&str),
{
    let original = env::var_os(&key);
    mutator(&key);
    EnvVarGuard { key, original }
}

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _held = ENV_MUTEX.lock();
        match self.original.take() {
            // SAFETY: `ENV_MUTEX` is held.
            Some(value) => unsafe { env_set_var(&self.key, &value) },
            // SAFETY: `ENV_MUTEX` is held.
            None => unsafe { env_remove_var(&self.key) },
        }
    }
}

/// RAII guard that serialises environment access for its lifetime.
///
/// # Examples
///
/// ```
/// use test_helpers::env;
///
/// let lock = env::lock();
/// let _a = lock.set_var("PROPLOAD_DOC_A", "1");
/// let _b = lock.remove_var("PROPLOAD_DOC_B");
/// ```
#[must_use = "dropping releases the environment lock"]
pub struct EnvVarLock {
    guard: ReentrantMutexGuard<'static, ()>,
}

impl EnvVarLock {
    /// Set an environment variable while holding the lock.
    pub fn set_var<K, V>(&self, key: K, value: V) -> EnvVarGuard
    where
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        // SAFETY: the lock is held by `self`.
        mutate(key.into(), |k| unsafe { env_set_var(k, value.as_ref()) }, &self.guard)
    }

    /// Remove an environment variable while holding the lock.
    pub fn remove_var<K>(&self, key: K) -> EnvVarGuard
    where
        K: Into<String>,
    {
        // SAFETY: the lock is held by `self`.
        mutate(key.into(), |k| unsafe { env_remove_var(k) }, &self.guard)
    }
}

/// Set an environment variable and return a guard restoring its prior value.
///
/// # Examples
///
/// ```
/// use test_helpers::env;
/// let _g = env::set_var("PROPLOAD_DOC_FOO", "bar");
/// assert!(matches!(std::env::var("PROPLOAD_DOC_FOO"), Ok(ref v) if v == "bar"));
/// ```
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    lock().set_var(key, value)
}

/// Remove an environment variable and return a guard restoring its prior
/// value.
///
/// # Examples
///
/// ```
/// use test_helpers::env;
/// let _g = env::remove_var("PROPLOAD_DOC_FOO");
/// assert!(std::env::var("PROPLOAD_DOC_FOO").is_err());
/// ```
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    lock().remove_var(key)
}

/// Acquire the global environment lock for the lifetime of the guard.
pub fn lock() -> EnvVarLock {
    EnvVarLock {
        guard: ENV_MUTEX.lock(),
    }
}

/// Run a closure while holding the global environment lock.
///
/// # Examples
///
/// ```
/// use test_helpers::env;
///
/// let seen = env::with_lock(|| std::env::var_os("PATH").is_some());
/// let _ = seen;
/// ```
pub fn with_lock<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _held = ENV_MUTEX.lock();
    f()
}
