//! Log store factory
//!
//! This module creates the log store selected by configuration.

use crate::adapters::jsonl::JsonlLogStore;
use crate::adapters::postgresql::{PostgreSQLClient, PostgresLogStore};
use crate::adapters::store::traits::LogStore;
use crate::adapters::supabase::SupabaseLogStore;
use crate::config::schema::{LogStoreTarget, StorylogConfig};
use crate::domain::{Result, StorylogError};
use std::sync::Arc;

/// Create a log store based on the configuration
///
/// Returns `Ok(None)` when the target is `disabled`. The caller then treats
/// every handoff as a failed write.
///
/// # Errors
///
/// Returns a configuration error if the selected backend's section is
/// missing or its client cannot be created.
pub async fn create_log_store(
    config: &StorylogConfig,
) -> Result<Option<Arc<dyn LogStore + Send + Sync>>> {
    let store_config = &config.log_store;

    match store_config.target {
        LogStoreTarget::Disabled => {
            tracing::debug!("Log store disabled");
            Ok(None)
        }
        LogStoreTarget::Supabase => {
            let supabase = store_config
                .supabase
                .as_ref()
                .ok_or_else(|| missing_section(LogStoreTarget::Supabase))?;

            tracing::info!(table = %supabase.table, "Creating Supabase log store");
            let store = SupabaseLogStore::new(supabase)?;

            Ok(Some(Arc::new(store) as Arc<dyn LogStore + Send + Sync>))
        }
        LogStoreTarget::PostgreSQL => {
            let pg_config = store_config
                .postgresql
                .as_ref()
                .ok_or_else(|| missing_section(LogStoreTarget::PostgreSQL))?;

            tracing::info!(table = %pg_config.table, "Creating PostgreSQL log store");
            let client = PostgreSQLClient::new(pg_config)?;

            Ok(Some(
                Arc::new(PostgresLogStore::new(client)) as Arc<dyn LogStore + Send + Sync>
            ))
        }
        LogStoreTarget::Jsonl => {
            let jsonl = store_config
                .jsonl
                .as_ref()
                .ok_or_else(|| missing_section(LogStoreTarget::Jsonl))?;

            tracing::info!(path = %jsonl.path, "Creating JSON Lines log store");

            Ok(Some(
                Arc::new(JsonlLogStore::new(&jsonl.path)) as Arc<dyn LogStore + Send + Sync>
            ))
        }
    }
}

fn missing_section(target: LogStoreTarget) -> StorylogError {
    StorylogError::Configuration(format!(
        "log_store.{target} configuration is required when target = '{target}'"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{secret_string, JsonlConfig, SupabaseConfig};

    #[tokio::test]
    async fn test_disabled_yields_none() {
        let config = StorylogConfig::default();
        assert!(create_log_store(&config).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_section_is_error() {
        let mut config = StorylogConfig::default();
        config.log_store.target = LogStoreTarget::Jsonl;

        let err = create_log_store(&config).await.err().unwrap();
        assert!(err.to_string().contains("log_store.jsonl"));
    }

    #[tokio::test]
    async fn test_selects_backend() {
        let mut config = StorylogConfig::default();
        config.log_store.jsonl = Some(JsonlConfig {
            path: "logs/stories.jsonl".to_string(),
        });
        config.log_store.supabase = Some(SupabaseConfig {
            url: "https://abc.supabase.co".to_string(),
            api_key: secret_string("anon-key"),
            table: "gunapad_logs".to_string(),
            timeout_seconds: 5,
        });

        config.log_store.target = LogStoreTarget::Jsonl;
        let store = create_log_store(&config).await.unwrap().unwrap();
        assert_eq!(store.name(), "jsonl");

        config.log_store.target = LogStoreTarget::Supabase;
        let store = create_log_store(&config).await.unwrap().unwrap();
        assert_eq!(store.name(), "supabase");
    }
}
