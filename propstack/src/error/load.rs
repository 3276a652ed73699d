//! Setup-time failures raised by the `push_from_*` loaders.

use thiserror::Error;

use crate::source::Origin;

/// A source could not be read, decoded or parsed.
///
/// The stack that attempted the load is left untouched, so the caller may
/// retry or skip the source.
#[derive(Debug, Error)]
#[error("failed to load properties from {origin}: {cause}")]
pub struct SourceLoadError {
    origin: Box<Origin>,
    #[source]
    cause: LoadCause,
}

impl SourceLoadError {
    /// Construct a load error for `origin`.
    #[must_use]
    pub fn new(origin: Origin, cause: LoadCause) -> Self {
        Self {
            origin: Box::new(origin),
            cause,
        }
    }

    /// Where the failed source came from.
    #[must_use]
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// The underlying failure.
    #[must_use]
    pub const fn cause(&self) -> &LoadCause {
        &self.cause
    }

    /// Consume the error, returning the origin and the cause.
    #[must_use]
    pub fn into_parts(self) -> (Origin, LoadCause) {
        (*self.origin, self.cause)
    }
}

/// Underlying reason a source failed to load.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadCause {
    /// Reading the bytes failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The data is not valid UTF-8.
    #[error("data is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// The properties text is malformed.
    #[error("line {line}: {message}")]
    Parse {
        /// One-based line number where the malformed entry starts.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// The URL scheme has no loader.
    #[error("unsupported url scheme `{scheme}`")]
    UnsupportedScheme {
        /// Scheme of the rejected URL.
        scheme: String,
    },

    /// A `file:` URL that does not name a path on this host.
    #[error("url does not name a local file")]
    NotLocalFile,

    /// A `figment` provider failed to produce its data.
    #[error(transparent)]
    Provider(Box<figment::Error>),

    /// Fetching a remote URL failed.
    #[cfg(feature = "http")]
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl LoadCause {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
