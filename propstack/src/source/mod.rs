//! Source adapters: uniform key to string lookups over one origin each.
//!
//! Every adapter states whether it captured its data when it was created
//! ([`Liveness::Snapshot`]) or reads an external store on every lookup
//! ([`Liveness::Live`]). The resolver does not cache lookups, so live
//! sources are observed at query time even after the stack is frozen.

use std::borrow::Cow;
use std::fmt;

use camino::Utf8PathBuf;
use url::Url;

use crate::KeyNotFound;

mod env;
mod map;
mod properties;
mod provider;
mod shared;

pub use env::EnvSource;
pub use map::MapSource;
pub use properties::PropertiesSource;
pub use provider::ProviderSource;
pub use shared::SharedMapSource;

/// A provider of string values keyed by string names.
///
/// Implementations must be cheap to query: the resolver calls [`Source::has`]
/// for every layer it scans.
pub trait Source: Send + Sync + fmt::Debug {
    /// Returns `true` when the source defines `key`.
    fn has(&self, key: &str) -> bool;

    /// Returns the value of `key`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyNotFound`] when [`Source::has`] would return `false`.
    fn get(&self, key: &str) -> Result<Cow<'_, str>, KeyNotFound>;

    /// Where the source's data comes from.
    fn origin(&self) -> &Origin;

    /// Whether values are captured eagerly or read on each lookup.
    fn liveness(&self) -> Liveness {
        Liveness::Snapshot
    }

    /// Number of keys held, for sources that know it.
    fn size_hint(&self) -> Option<usize> {
        None
    }
}

/// Lookup behaviour of a source after it has been pushed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Liveness {
    /// Data was captured when the source was created.
    Snapshot,
    /// Data is read from an external store on every lookup.
    Live,
}

/// Provenance of a source.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Origin {
    /// Values supplied programmatically.
    Memory,
    /// Properties text supplied inline as bytes or a string.
    Inline,
    /// A properties file on disk, as named by the caller.
    File(Utf8PathBuf),
    /// Properties data fetched from a URL.
    Url(Url),
    /// Properties data read from a byte stream.
    Stream,
    /// The process environment.
    Environment {
        /// Prefix prepended to mapped variable names, if any.
        prefix: Option<String>,
    },
    /// A `figment` provider, by its metadata name.
    Provider(String),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("in-memory map"),
            Self::Inline => f.write_str("inline data"),
            Self::File(path) => write!(f, "file <{path}>"),
            Self::Url(url) => write!(f, "url <{url}>"),
            Self::Stream => f.write_str("input stream"),
            Self::Environment { prefix: None } => f.write_str("environment"),
            Self::Environment {
                prefix: Some(prefix),
            } => write!(f, "environment (prefix `{prefix}`)"),
            Self::Provider(name) => write!(f, "provider `{name}`"),
        }
    }
}
