//! Log command implementation
//!
//! This module implements the `log` command: anonymize one generated story
//! and write it to the configured log store.

use crate::cli::commands::input::StoryInputArgs;
use crate::config::load_config;
use crate::core::logger::StoryLogger;
use clap::Args;
use std::sync::Arc;

/// Arguments for the log command
#[derive(Args, Debug)]
pub struct LogArgs {
    #[command(flatten)]
    pub input: StoryInputArgs,
}

impl LogArgs {
    /// Execute the log command
    ///
    /// Exit codes: 0 stored, 1 not stored, 2 configuration error.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting log command");

        let config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        let request = self.input.load_request()?;

        let logger = match StoryLogger::from_config(&config).await {
            Ok(logger) => Arc::new(logger),
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to create log store");
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        if !logger.has_store() {
            eprintln!("⚠️  No log store configured (log_store.target = \"disabled\")");
        }

        let stored = logger.dispatch(request).await.unwrap_or(false);

        if stored {
            println!("✅ Story log stored ({})", config.log_store.target);
            Ok(0)
        } else {
            println!("❌ Story log was not stored; see log output for details");
            Ok(1)
        }
    }
}
