// Storylog - Anonymized logging for generated bedtime stories
// Copyright (c) 2025 Storylog Contributors
// Licensed under the MIT License

use clap::Parser;
use std::path::Path;
use std::process;
use storylog::cli::Cli;
use storylog::config::{load_config, LoggingConfig};
use storylog::logging::init_logging;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // File logging and the default level come from the config file when it
    // loads; the CLI flag wins over both.
    let file_config = if Path::new(&cli.config).exists() {
        load_config(&cli.config).ok()
    } else {
        None
    };
    let (config_level, logging_config) = match file_config {
        Some(config) => (Some(config.application.log_level), config.logging),
        None => (None, LoggingConfig::default()),
    };
    let log_level = cli
        .log_level
        .clone()
        .or(config_level)
        .unwrap_or_else(|| "info".to_string());

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Storylog");

    let exit_code = match cli.execute().await {
        Ok(code) => code,
        Err(e) => {
            storylog::log_error_with_context!(&e, "Command execution failed");
            eprintln!("Error: {e:#}");
            5
        }
    };

    // process::exit skips destructors, so flush file logs first
    drop(guard);
    process::exit(exit_code);
}
