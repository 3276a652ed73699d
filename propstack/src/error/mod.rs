//! Error types produced while loading sources and binding configuration.

mod bind;
mod load;
mod types;

pub use bind::{BindError, KeyNotFound};
pub use load::{LoadCause, SourceLoadError};
pub use types::{ConfigError, ConfigResult};
