//! Error types for the `propstack` binary.

use propstack::{BindError, ConfigError, SourceLoadError};
use thiserror::Error;

/// Errors surfaced by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// A layer could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Expanding a value's references failed.
    #[error(transparent)]
    Interpolation(#[from] BindError),

    /// Writing output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl From<SourceLoadError> for CliError {
    fn from(err: SourceLoadError) -> Self {
        Self::Config(err.into())
    }
}
