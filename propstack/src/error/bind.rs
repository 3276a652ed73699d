//! Binding-time failures and the per-source absence signal.

use thiserror::Error;

/// Returned by [`Source::get`](crate::Source::get) for a key the source does
/// not define.
///
/// The resolver turns this into absence; it never reaches binding callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("key `{key}` is not defined by this source")]
pub struct KeyNotFound {
    /// The key that was requested.
    pub key: String,
}

impl KeyNotFound {
    /// Construct the signal for `key`.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Failure binding a single accessor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum BindError {
    /// A value (or declared default) could not be converted to the target
    /// type.
    #[error("cannot convert `{key}` value {value:?} to {target}: {reason}")]
    TypeCoercion {
        /// Key whose value failed to convert.
        key: String,
        /// Raw value as resolved.
        value: String,
        /// Name of the target type.
        target: &'static str,
        /// Why the conversion failed.
        reason: String,
    },

    /// No layer defines the key and the accessor declares no fallback.
    #[error("missing required configuration `{key}`")]
    MissingRequired {
        /// Primary key of the accessor.
        key: String,
    },

    /// The accessor allows null but the target type cannot represent it.
    #[error("`{key}` allows null but {target} has no null representation")]
    NullNotRepresentable {
        /// Primary key of the accessor.
        key: String,
        /// Name of the target type.
        target: &'static str,
    },

    /// Expanding `${...}` references revisited a key.
    #[error("interpolation of `{key}` loops: {chain}")]
    InterpolationCycle {
        /// Key whose value started the expansion.
        key: String,
        /// Reference chain, joined with ` -> `.
        chain: String,
    },
}

impl BindError {
    /// Key named by the error.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::TypeCoercion { key, .. }
            | Self::MissingRequired { key }
            | Self::NullNotRepresentable { key, .. }
            | Self::InterpolationCycle { key, .. } => key,
        }
    }

    /// Report the error against `primary` instead of the key that matched.
    pub(crate) fn reported_as(mut self, primary: &str) -> Self {
        match &mut self {
            Self::TypeCoercion { key, .. }
            | Self::MissingRequired { key }
            | Self::NullNotRepresentable { key, .. }
            | Self::InterpolationCycle { key, .. } => primary.clone_into(key),
        }
        self
    }
}
