//! Configuration management for Storylog.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Storylog uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `STORYLOG_*` environment overrides
//! - Default values for every section
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use storylog::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("storylog.toml")?;
//!
//! println!("Log store: {}", config.log_store.target);
//! println!("Engine version: {}", config.application.engine_version);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and engine version
//! - [`AnonymizationConfig`](crate::anonymization::AnonymizationConfig) - Leak policy
//! - [`LogStoreConfig`] - Target selection plus [`SupabaseConfig`],
//!   [`PostgreSQLConfig`] and [`JsonlConfig`]
//! - [`LoggingConfig`] - Local log files
//!
//! # Example Configuration
//!
//! ```toml
//! environment = "production"
//!
//! [application]
//! log_level = "info"
//! engine_version = "1.0"
//!
//! [log_store]
//! target = "supabase"
//!
//! [log_store.supabase]
//! url = "https://your-project.supabase.co"
//! api_key = "${SUPABASE_ANON_KEY}"
//! table = "gunapad_logs"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, Environment, JsonlConfig, LogStoreConfig, LogStoreTarget, LoggingConfig,
    PostgreSQLConfig, StorylogConfig, SupabaseConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
