//! Anonymize command implementation
//!
//! Prints the outbound record for one story without storing it. Useful for
//! checking exactly what would leave the process.

use crate::cli::commands::input::StoryInputArgs;
use crate::config::{load_config, StorylogConfig};
use crate::core::logger::StoryLogger;
use clap::Args;
use std::path::Path;

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    #[command(flatten)]
    pub input: StoryInputArgs,

    /// Pretty-print the record
    #[arg(long)]
    pub pretty: bool,
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    ///
    /// A missing configuration file is not an error here; defaults apply.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = if Path::new(config_path).exists() {
            match load_config(config_path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Configuration error: {e}");
                    return Ok(2);
                }
            }
        } else {
            tracing::debug!(config_path = %config_path, "No configuration file, using defaults");
            StorylogConfig::default()
        };

        let request = self.input.load_request()?;

        let logger = StoryLogger::new(None, config.application.engine_version.clone())
            .with_leak_policy(config.anonymization.leak_policy);

        let record = match logger.prepare(&request) {
            Ok(record) => record,
            Err(e) => {
                tracing::error!(error = %e, "Failed to anonymize story");
                eprintln!("❌ {e}");
                return Ok(1);
            }
        };

        let output = if self.pretty {
            serde_json::to_string_pretty(&record)?
        } else {
            serde_json::to_string(&record)?
        };
        println!("{output}");

        Ok(0)
    }
}
