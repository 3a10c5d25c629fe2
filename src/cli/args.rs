//! CLI argument definitions using clap
//!
//! Commands:
//! - mockrest start [--config <path>] [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// mockrest - a minimal mock-backed users REST service
#[derive(Parser, Debug)]
#[command(name = "mockrest")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Start {
        /// Path to configuration file; defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_start() {
        let cli = Cli::try_parse_from(["mockrest", "start"]).unwrap();
        let Command::Start { config, port } = cli.command;
        assert!(config.is_none());
        assert!(port.is_none());
    }

    #[test]
    fn test_parse_start_with_flags() {
        let cli =
            Cli::try_parse_from(["mockrest", "start", "--config", "mockrest.json", "--port", "8080"])
                .unwrap();
        let Command::Start { config, port } = cli.command;
        assert_eq!(config.unwrap().to_str().unwrap(), "mockrest.json");
        assert_eq!(port, Some(8080));
    }

    #[test]
    fn test_missing_subcommand_fails() {
        assert!(Cli::try_parse_from(["mockrest"]).is_err());
    }
}
