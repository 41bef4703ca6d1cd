//! wirekit - Entry Point
//!
//! Loads kernel settings, initializes logging and runs one subcommand.
//! Exits non-zero with a single descriptive error when bootstrap fails.

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use wirekit::cli::{Cli, execute};
use wirekit_infrastructure::logging::init_logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = cli.settings().and_then(|settings| {
        init_logging(&settings.logging)?;
        debug!(command = ?cli.command, environment = %settings.environment, "Running command");
        execute(cli.command, settings)
    });

    match result {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
