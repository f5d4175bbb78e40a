//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Storylog using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Storylog - anonymized story logging
#[derive(Parser, Debug)]
#[command(name = "storylog")]
#[command(version, about, long_about = None)]
#[command(author = "Storylog Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "storylog.toml", env = "STORYLOG_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "STORYLOG_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Anonymize a story and write it to the configured log store
    Log(commands::log::LogArgs),

    /// Print the anonymized record for a story without storing it
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Cli {
    /// Execute the selected command and return the process exit code
    pub async fn execute(&self) -> anyhow::Result<i32> {
        match &self.command {
            Commands::Log(args) => args.execute(&self.config).await,
            Commands::Anonymize(args) => args.execute(&self.config).await,
            Commands::ValidateConfig(args) => args.execute(&self.config).await,
            Commands::Init(args) => args.execute().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_log() {
        let cli = Cli::parse_from(["storylog", "log", "--input", "form.json", "--story", "story.json"]);
        assert_eq!(cli.config, "storylog.toml");
        match cli.command {
            Commands::Log(args) => {
                assert_eq!(args.input.input.to_str(), Some("form.json"));
                assert!(args.input.flags.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_anonymize_pretty() {
        let cli = Cli::parse_from([
            "storylog", "anonymize", "-i", "form.json", "-s", "story.json", "--pretty",
            "--flags", "{\"beta\":true}",
        ]);
        match cli.command {
            Commands::Anonymize(args) => {
                assert!(args.pretty);
                assert_eq!(args.input.flags.as_deref(), Some("{\"beta\":true}"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["storylog", "--config", "custom.toml", "validate-config"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["storylog", "--log-level", "debug", "init"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test]
    fn test_cli_log_requires_inputs() {
        assert!(Cli::try_parse_from(["storylog", "log"]).is_err());
    }
}
