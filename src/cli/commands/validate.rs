//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Storylog configuration file.

use crate::adapters::create_log_store;
use crate::config::load_config;
use crate::config::schema::LogStoreTarget;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Also check that the log store is reachable
    #[arg(long)]
    pub check_connection: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Exit codes: 0 valid, 2 invalid, 3 log store unreachable.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Environment: {:?}", config.environment);
        println!("  Log Level: {}", config.application.log_level);
        println!("  Engine Version: {}", config.application.engine_version);
        println!("  Leak Policy: {:?}", config.anonymization.leak_policy);
        println!("  Log Store: {}", config.log_store.target);

        match config.log_store.target {
            LogStoreTarget::Supabase => {
                if let Some(ref supabase) = config.log_store.supabase {
                    println!("  Supabase URL: {}", supabase.url);
                    println!("  Supabase Table: {}", supabase.table);
                }
            }
            LogStoreTarget::PostgreSQL => {
                if let Some(ref pg_config) = config.log_store.postgresql {
                    use secrecy::ExposeSecret;
                    let conn_str: &str = pg_config.connection_string.expose_secret().as_ref();
                    println!(
                        "  PostgreSQL Connection: {}",
                        conn_str.rsplit('@').next().unwrap_or("***")
                    );
                    println!("  PostgreSQL Table: {}", pg_config.table);
                }
            }
            LogStoreTarget::Jsonl => {
                if let Some(ref jsonl) = config.log_store.jsonl {
                    println!("  JSONL Path: {}", jsonl.path);
                }
            }
            LogStoreTarget::Disabled => {
                println!("  ⚠️  Stories will not be logged");
            }
        }
        println!();

        if !self.check_connection {
            return Ok(0);
        }

        let Some(store) = create_log_store(&config).await? else {
            println!("ℹ️  No log store to check");
            return Ok(0);
        };

        match store.test_connection().await {
            Ok(()) => {
                println!("✅ Log store reachable ({})", store.name());
                Ok(0)
            }
            Err(e) => {
                tracing::error!(store = store.name(), error = %e, "Log store connection check failed");
                println!("❌ Log store unreachable");
                println!("   Error: {e}");
                Ok(3)
            }
        }
    }
}
