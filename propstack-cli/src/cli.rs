//! Command-line interface definitions for `propstack`.

use clap::{ArgAction, Parser, Subcommand};

use crate::layer::LayerSpec;

/// Parsed CLI arguments.
#[derive(Debug, Parser)]
#[command(name = "propstack")]
#[command(about = "Resolve keys against layered properties sources")]
#[command(version)]
pub struct Args {
    /// Source to push, lowest priority first: `env`, `env:PREFIX`,
    /// `set:KEY=VALUE`, a `file:`/`http:`/`https:` URL or a path.
    #[arg(short, long = "layer", value_name = "SPEC")]
    pub layers: Vec<LayerSpec>,
    /// Print raw values without expanding `${...}` references.
    #[arg(long)]
    pub no_interpolation: bool,
    /// Increase log verbosity (repeatable).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print `KEY=VALUE` for each key; exits with status 1 if any is absent.
    Get {
        /// Keys to resolve.
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Show every layer defining each key, highest priority first.
    Explain {
        /// Keys to explain.
        #[arg(required = true)]
        keys: Vec<String>,
    },
}
