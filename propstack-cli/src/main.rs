//! CLI entrypoint for `propstack`.

use std::io::{self, Write as _};
use std::process::ExitCode;

use clap::Parser;
use propstack_cli::cli::Args;
use propstack_cli::error::CliError;
use propstack_cli::{Outcome, logging, run};

fn main() -> Result<ExitCode, CliError> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut stdout = io::stdout().lock();
    let outcome = run(&args, &mut stdout)?;
    stdout.flush()?;
    Ok(match outcome {
        Outcome::Complete => ExitCode::SUCCESS,
        Outcome::Missing(_) => ExitCode::FAILURE,
    })
}
