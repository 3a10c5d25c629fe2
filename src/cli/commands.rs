//! CLI command implementations
//!
//! Loading and validating configuration happens here; the server itself
//! never touches the filesystem.

use std::fs;
use std::path::Path;

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::Logger;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Dispatch a parsed CLI invocation
pub fn run_command(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Start { config, port } => start(config.as_deref(), port),
    }
}

/// Load configuration from an optional JSON file, falling back to defaults.
pub fn load_config(path: Option<&Path>) -> CliResult<HttpServerConfig> {
    let Some(path) = path else {
        return Ok(HttpServerConfig::default());
    };

    let content = fs::read_to_string(path)
        .map_err(|e| CliError::config_error(format!("failed to read config: {}", e)))?;

    let config: HttpServerConfig = serde_json::from_str(&content)
        .map_err(|e| CliError::config_error(format!("invalid config JSON: {}", e)))?;

    validate(&config)?;

    Ok(config)
}

fn validate(config: &HttpServerConfig) -> CliResult<()> {
    if config.host.is_empty() {
        return Err(CliError::config_error("host must not be empty"));
    }
    if config.port == 0 {
        return Err(CliError::config_error("port must be > 0"));
    }
    Ok(())
}

/// Boot the tokio runtime and serve until interrupted
pub fn start(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let mut config = load_config(config_path)?;
    if let Some(port) = port {
        config.port = port;
    }

    Logger::info("boot", &[("addr", &config.socket_addr())]);

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("failed to start runtime: {}", e)))?;

    runtime
        .block_on(HttpServer::with_config(config).start())
        .map_err(|e| CliError::boot_failed(format!("server error: {}", e)))
}
