//! Live adapter over the process environment.

use std::borrow::Cow;
use std::env;

use super::{Liveness, Origin, Source};
use crate::KeyNotFound;

/// Reads environment variables at lookup time.
///
/// [`EnvSource::raw`] looks keys up verbatim. [`EnvSource::prefixed`] maps a
/// dotted key onto a conventional variable name: `db.host` with prefix
/// `APP_` becomes `APP_DB_HOST`. Variables whose value is not valid Unicode
/// are treated as absent.
#[derive(Clone, Debug)]
pub struct EnvSource {
    prefix: Option<String>,
    origin: Origin,
}

impl EnvSource {
    /// Look keys up as variable names without any mapping.
    #[must_use]
    pub const fn raw() -> Self {
        Self {
            prefix: None,
            origin: Origin::Environment { prefix: None },
        }
    }

    /// Map keys onto upper-case variable names starting with `prefix`.
    #[must_use]
    pub fn prefixed(prefix: impl Into<String>) -> Self {
        let owned: String = prefix.into();
        Self {
            origin: Origin::Environment {
                prefix: Some(owned.clone()),
            },
            prefix: Some(owned),
        }
    }

    /// The variable name consulted for `key`.
    #[must_use]
    pub fn var_name<'k>(&self, key: &'k str) -> Cow<'k, str> {
        let Some(prefix) = self.prefix.as_deref() else {
            return Cow::Borrowed(key);
        };
        let mapped: String = key
            .chars()
            .map(|c| match c {
                '.' | '-' => '_',
                other => other.to_ascii_uppercase(),
            })
            .collect();
        Cow::Owned(format!("{prefix}{mapped}"))
    }

    fn read(&self, key: &str) -> Option<String> {
        let name = self.var_name(key);
        // `std::env` rejects these names; they can never be set.
        if name.is_empty() || name.contains(['=', '\0']) {
            return None;
        }
        env::var(name.as_ref()).ok()
    }
}

impl Source for EnvSource {
    fn has(&self, key: &str) -> bool {
        self.read(key).is_some()
    }

    fn get(&self, key: &str) -> Result<Cow<'_, str>, KeyNotFound> {
        self.read(key)
            .map(Cow::Owned)
            .ok_or_else(|| KeyNotFound::new(key))
    }

    fn origin(&self) -> &Origin {
        &self.origin
    }

    fn liveness(&self) -> Liveness {
        Liveness::Live
    }
}
