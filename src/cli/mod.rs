//! CLI module
//!
//! Provides the command-line interface:
//! - start: boot the HTTP server and serve until interrupted

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{load_config, run_command, start};
pub use errors::{CliError, CliResult};

/// Parse arguments and dispatch to the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli)
}
