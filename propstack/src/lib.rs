//! Layered properties configuration resolved into typed structs.
//!
//! Sources are pushed onto a [`LayerStack`]; the most recently pushed layer
//! wins for any key defined in several layers. Building the stack freezes it
//! into an immutable [`Resolver`], and a [`ConfigFactory`] binds declared
//! [`ConfigShape`]s against that resolver, falling back to the defaults
//! declared on each accessor.
//!
//! ```rust
//! use propstack::{ConfigFactory, ConfigShape, LayerStack};
//!
//! #[derive(Debug, ConfigShape)]
//! struct ServerConfig {
//!     #[propstack(key = "server.host", default = "localhost")]
//!     host: String,
//!     #[propstack(key = "server.port", default = "8080")]
//!     port: u16,
//!     #[propstack(key = "server.banner")]
//!     banner: Option<String>,
//! }
//!
//! let mut stack = LayerStack::new();
//! stack.push_map([("server.port", "9000")]);
//! stack.push_from_str("server.host = example.org\n")?;
//!
//! let factory = ConfigFactory::new(stack.build());
//! let config = factory.get::<ServerConfig>()?;
//! assert_eq!(config.host, "example.org");
//! assert_eq!(config.port, 9000);
//! assert_eq!(config.banner, None);
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

extern crate self as propstack;

#[cfg(feature = "derive")]
pub use propstack_macros::ConfigShape;

mod bind;
mod cache;
mod error;
mod factory;
mod resolver;
mod shape;
pub mod source;
mod stack;
mod value;

pub use bind::{Accessor, AccessorInfo, Binder, bind};
pub use cache::BindingCache;
pub use error::{BindError, ConfigError, ConfigResult, KeyNotFound, LoadCause, SourceLoadError};
pub use factory::ConfigFactory;
pub use resolver::{Resolved, Resolver};
pub use shape::ConfigShape;
pub use source::{Liveness, Origin, Source};
pub use stack::LayerStack;
pub use value::{CoercionFailure, ConfigValue};

#[doc(hidden)]
pub mod __private {
    //! Re-exports used by code generated from `#[derive(ConfigShape)]`.
    pub use crate::bind::{Accessor, AccessorInfo, Binder};
    pub use crate::error::BindError;
    pub use crate::shape::ConfigShape;
}
