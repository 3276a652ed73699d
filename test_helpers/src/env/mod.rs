//! Serialised mutation of process environment variables.
//!
//! Every mutation takes a global re-entrant lock and returns a guard that
//! restores the previous value (or removes the variable) when dropped.
//! Guards for the same key restore in LIFO order. When a test needs several
//! variables to change together, [`scope`] holds the lock for its whole
//! lifetime so no other helper can interleave.
//!
//! ```
//! use test_helpers::env;
//!
//! let _g = env::set_var("PROPSTACK_DOC_KEY", "value");
//! assert_eq!(std::env::var("PROPSTACK_DOC_KEY").as_deref(), Ok("value"));
//! ```

use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

static ENV_LOCK: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Restores one environment variable when dropped.
#[must_use = "dropping restores the prior value"]
pub struct EnvGuard {
    key: String,
    previous: Option<OsString>,
}

impl fmt::Debug for EnvGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvGuard")
            .field("key", &self.key)
            .field("had_previous", &self.previous.is_some())
            .finish()
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        let _lock = ENV_LOCK.lock();
        match self.previous.take() {
            // SAFETY: environment writes from this crate hold `ENV_LOCK`.
            Some(value) => unsafe { env::set_var(&self.key, value) },
            // SAFETY: as above.
            None => unsafe { env::remove_var(&self.key) },
        }
    }
}

fn replace(key: String, value: Option<&OsStr>) -> EnvGuard {
    let _lock = ENV_LOCK.lock();
    let previous = env::var_os(&key);
    match value {
        // SAFETY: environment writes from this crate hold `ENV_LOCK`.
        Some(v) => unsafe { env::set_var(&key, v) },
        // SAFETY: as above.
        None => unsafe { env::remove_var(&key) },
    }
    EnvGuard { key, previous }
}

/// Set `key` to `value` until the guard is dropped.
pub fn set_var(key: impl Into<String>, value: impl AsRef<OsStr>) -> EnvGuard {
    replace(key.into(), Some(value.as_ref()))
}

/// Remove `key` until the guard is dropped.
pub fn remove_var(key: impl Into<String>) -> EnvGuard {
    replace(key.into(), None)
}

/// Holds the environment lock and a set of guards.
///
/// Guards are restored before the lock is released.
#[must_use = "dropping restores the variables and releases the lock"]
pub struct EnvScope {
    guards: Vec<EnvGuard>,
    _lock: ReentrantMutexGuard<'static, ()>,
}

impl fmt::Debug for EnvScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvScope")
            .field("guards", &self.guards)
            .finish_non_exhaustive()
    }
}

impl EnvScope {
    /// Set another variable inside the scope.
    pub fn set(&mut self, key: impl Into<String>, value: impl AsRef<OsStr>) -> &mut Self {
        self.guards.push(set_var(key, value));
        self
    }

    /// Remove another variable inside the scope.
    pub fn remove(&mut self, key: impl Into<String>) -> &mut Self {
        self.guards.push(remove_var(key));
        self
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        while let Some(guard) = self.guards.pop() {
            drop(guard);
        }
    }
}

/// Take the environment lock and apply `vars` while holding it.
///
/// ```
/// use test_helpers::env;
///
/// let _scope = env::scope([("PROPSTACK_DOC_A", "1"), ("PROPSTACK_DOC_B", "2")]);
/// assert_eq!(std::env::var("PROPSTACK_DOC_B").as_deref(), Ok("2"));
/// ```
pub fn scope<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> EnvScope
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    let lock = ENV_LOCK.lock();
    let guards = vars
        .into_iter()
        .map(|(key, value)| set_var(key, value))
        .collect();
    EnvScope {
        guards,
        _lock: lock,
    }
}
