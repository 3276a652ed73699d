//! Execution of parsed commands.

use std::io::Write;

use propstack::{LayerStack, Resolver};
use tracing::debug;

use crate::cli::{Args, Command};
use crate::error::CliError;

/// Result of a command that ran to completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Every requested key was defined.
    Complete,
    /// These keys were not defined by any layer.
    Missing(Vec<String>),
}

/// Build the layer stack described by `args` and run its command, writing
/// results to `out`.
///
/// # Errors
///
/// Returns a [`CliError`] when a layer fails to load, a value's references
/// loop or `out` cannot be written.
pub fn run(args: &Args, out: &mut impl Write) -> Result<Outcome, CliError> {
    let resolver = build_resolver(args)?;
    let missing = match &args.command {
        Command::Get { keys } => get(&resolver, keys, out)?,
        Command::Explain { keys } => explain(&resolver, keys, out)?,
    };
    Ok(if missing.is_empty() {
        Outcome::Complete
    } else {
        Outcome::Missing(missing)
    })
}

fn build_resolver(args: &Args) -> Result<Resolver, CliError> {
    let mut stack = LayerStack::new().with_interpolation(!args.no_interpolation);
    for spec in &args.layers {
        debug!(?spec, "pushing command-line layer");
        spec.push_onto(&mut stack)?;
    }
    Ok(stack.build())
}

fn get(resolver: &Resolver, keys: &[String], out: &mut impl Write) -> Result<Vec<String>, CliError> {
    let mut missing = Vec::new();
    for key in keys {
        match resolver.lookup_interpolated(key)? {
            Some(value) => writeln!(out, "{key}={value}")?,
            None => missing.push(key.clone()),
        }
    }
    if !missing.is_empty() {
        writeln!(out, "# not defined: {}", missing.join(", "))?;
    }
    Ok(missing)
}

fn explain(
    resolver: &Resolver,
    keys: &[String],
    out: &mut impl Write,
) -> Result<Vec<String>, CliError> {
    let mut missing = Vec::new();
    for key in keys {
        writeln!(out, "{key}")?;
        let hits = resolver.explain(key);
        if hits.is_empty() {
            writeln!(out, "  not defined")?;
            missing.push(key.clone());
        }
        for (rank, hit) in hits.iter().enumerate() {
            let marker = if rank == 0 { "" } else { " (shadowed)" };
            writeln!(
                out,
                "  [{}] {}: {}{marker}",
                hit.layer, hit.origin, hit.value
            )?;
        }
    }
    Ok(missing)
}
