//! Test helpers shared across the workspace.
//!
//! - [`env`]: guards that mutate process environment variables under a
//!   global lock and restore them on drop.
//! - [`properties`]: temporary properties files with path and URL accessors.
//! - [`jail`]: a `figment::Jail` wrapper returning `anyhow::Result`.

pub mod env;
pub mod jail;
pub mod properties;
