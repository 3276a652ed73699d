//! Top-level error returned by the factory.

use thiserror::Error;

use super::{BindError, SourceLoadError};

/// Result alias used across the crate's public API.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that prevent a configuration object from being produced.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A source failed to load during setup.
    #[error(transparent)]
    Load(#[from] SourceLoadError),

    /// An accessor of the named shape failed to bind.
    #[error("cannot build configuration `{shape}`: {source}")]
    Bind {
        /// Identity of the shape being constructed.
        shape: &'static str,
        /// The failure reported by the binder, unchanged.
        #[source]
        source: Box<BindError>,
    },
}

impl ConfigError {
    /// Tag a binder failure with the shape that owns the accessor.
    #[must_use]
    pub fn bind(shape: &'static str, source: BindError) -> Self {
        Self::Bind {
            shape,
            source: Box::new(source),
        }
    }

    /// Returns the binder failure when this is a [`ConfigError::Bind`].
    #[must_use]
    pub fn bind_error(&self) -> Option<&BindError> {
        match self {
            Self::Bind { source, .. } => Some(source.as_ref()),
            Self::Load(_) => None,
        }
    }

    /// Returns the shape identity when this is a [`ConfigError::Bind`].
    #[must_use]
    pub const fn shape(&self) -> Option<&'static str> {
        match self {
            Self::Bind { shape, .. } => Some(*shape),
            Self::Load(_) => None,
        }
    }
}
