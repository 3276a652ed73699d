//! `--layer` specifications.

use std::fmt;
use std::str::FromStr;

use camino::Utf8PathBuf;
use propstack::source::EnvSource;
use propstack::{LayerStack, SourceLoadError};
use thiserror::Error;
use url::Url;

const URL_SCHEMES: [&str; 3] = ["file:", "http:", "https:"];

/// One source named on the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayerSpec {
    /// `env`: the environment, keys used verbatim as variable names.
    Env,
    /// `env:PREFIX`: the environment with prefixed, upper-cased names.
    EnvPrefixed(String),
    /// `set:KEY=VALUE`: a single inline value.
    Set {
        /// Key to define.
        key: String,
        /// Its value.
        value: String,
    },
    /// A `file:`, `http:` or `https:` URL.
    Url(Url),
    /// Any other argument is a filesystem path.
    File(Utf8PathBuf),
}

/// A `--layer` argument that cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid layer `{spec}`: {reason}")]
pub struct LayerSpecError {
    spec: String,
    reason: String,
}

impl LayerSpecError {
    fn new(spec: &str, reason: impl fmt::Display) -> Self {
        Self {
            spec: spec.to_owned(),
            reason: reason.to_string(),
        }
    }
}

impl FromStr for LayerSpec {
    type Err = LayerSpecError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        if spec == "env" {
            return Ok(Self::Env);
        }
        if let Some(prefix) = spec.strip_prefix("env:") {
            if prefix.is_empty() {
                return Err(LayerSpecError::new(spec, "prefix must not be empty"));
            }
            return Ok(Self::EnvPrefixed(prefix.to_owned()));
        }
        if let Some(assignment) = spec.strip_prefix("set:") {
            let (key, value) = assignment
                .split_once('=')
                .ok_or_else(|| LayerSpecError::new(spec, "expected set:KEY=VALUE"))?;
            if key.is_empty() {
                return Err(LayerSpecError::new(spec, "key must not be empty"));
            }
            return Ok(Self::Set {
                key: key.to_owned(),
                value: value.to_owned(),
            });
        }
        if URL_SCHEMES.iter().any(|scheme| spec.starts_with(scheme)) {
            return Url::parse(spec)
                .map(Self::Url)
                .map_err(|err| LayerSpecError::new(spec, err));
        }
        if spec.is_empty() {
            return Err(LayerSpecError::new(spec, "path must not be empty"));
        }
        Ok(Self::File(Utf8PathBuf::from(spec)))
    }
}

impl LayerSpec {
    /// Push the layer this specification names onto `stack`.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceLoadError`] when a file or URL cannot be loaded.
    pub fn push_onto(&self, stack: &mut LayerStack) -> Result<(), SourceLoadError> {
        match self {
            Self::Env => {
                stack.push_env();
            }
            Self::EnvPrefixed(prefix) => {
                stack.push(EnvSource::prefixed(prefix.as_str()));
            }
            Self::Set { key, value } => {
                stack.push_map([(key.as_str(), value.as_str())]);
            }
            Self::Url(url) => {
                stack.push_from_url(url)?;
            }
            Self::File(path) => {
                stack.push_from_file(path)?;
            }
        }
        Ok(())
    }
}
