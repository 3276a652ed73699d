//! Library half of the `propstack` binary.
//!
//! Parsing lives in [`cli`], layer specifications in [`layer`], and
//! [`run`] executes a parsed command against caller-supplied writers so it
//! can be driven from tests.

pub mod cli;
mod commands;
pub mod error;
pub mod layer;
pub mod logging;

pub use commands::{Outcome, run};
