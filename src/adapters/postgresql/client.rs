//! PostgreSQL client implementation
//!
//! This module provides the pooled connection used by [`PostgresLogStore`](super::PostgresLogStore).

use crate::config::schema::{validate_table_name, PostgreSQLConfig};
use crate::domain::{LogStoreError, Result, StorylogError};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod, Runtime};
use secrecy::ExposeSecret;
use std::time::Duration;
use tokio_postgres::NoTls;

/// PostgreSQL client for Storylog
///
/// Wraps a deadpool connection pool. The pool connects lazily, so creating
/// a client never touches the network.
pub struct PostgreSQLClient {
    /// Connection pool
    pool: Pool,

    /// Destination table
    table: String,

    /// Host/database part of the connection string, for diagnostics
    safe_target: String,
}

impl PostgreSQLClient {
    /// Create a new PostgreSQL client
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string cannot be parsed, the table
    /// name is not a plain identifier, or the pool cannot be built.
    pub fn new(config: &PostgreSQLConfig) -> Result<Self> {
        validate_table_name("log_store.postgresql.table", &config.table)
            .map_err(StorylogError::Configuration)?;

        let conn_str: &str = config.connection_string.expose_secret().as_ref();
        let pg_config: tokio_postgres::Config = conn_str.parse().map_err(|e| {
            StorylogError::Configuration(format!("Invalid PostgreSQL connection string: {e}"))
        })?;

        let manager = Manager::from_config(
            pg_config,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );

        let timeout = Some(Duration::from_secs(config.connection_timeout_seconds));
        let pool = Pool::builder(manager)
            .max_size(config.max_connections)
            .runtime(Runtime::Tokio1)
            .wait_timeout(timeout)
            .create_timeout(timeout)
            .recycle_timeout(timeout)
            .build()
            .map_err(|e| {
                StorylogError::Configuration(format!("Failed to create connection pool: {e}"))
            })?;

        Ok(Self {
            pool,
            table: config.table.clone(),
            safe_target: connection_string_safe(conn_str),
        })
    }

    /// Destination table name
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Connection string with credentials removed
    pub fn connection_string_safe(&self) -> &str {
        &self.safe_target
    }

    /// Get a connection from the pool
    ///
    /// # Errors
    ///
    /// Returns an error if a connection cannot be obtained.
    pub async fn get_connection(&self) -> Result<deadpool_postgres::Object> {
        self.pool.get().await.map_err(|e| {
            LogStoreError::ConnectionFailed(format!(
                "Failed to get connection to {}: {e}",
                self.safe_target
            ))
            .into()
        })
    }

    /// Test the connection to PostgreSQL
    ///
    /// # Errors
    ///
    /// Returns an error if no connection can be made or `SELECT 1` fails.
    pub async fn test_connection(&self) -> Result<()> {
        let client = self.get_connection().await?;

        client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| LogStoreError::ConnectionFailed(format!("Connection test failed: {e}")))?;

        tracing::info!(target_db = %self.safe_target, "PostgreSQL connection test successful");
        Ok(())
    }

    /// Create the log table if it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the DDL statement fails.
    pub async fn ensure_table(&self) -> Result<()> {
        let client = self.get_connection().await?;

        client
            .batch_execute(&create_table_sql(&self.table))
            .await
            .map_err(|e| {
                LogStoreError::InsertFailed(format!("Failed to create table {}: {e}", self.table))
            })?;

        tracing::debug!(table = %self.table, "PostgreSQL log table ready");
        Ok(())
    }

    /// Insert one JSON payload
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    pub async fn insert_payload(&self, payload: &serde_json::Value) -> Result<u64> {
        let client = self.get_connection().await?;

        client
            .execute(&insert_sql(&self.table), &[payload])
            .await
            .map_err(|e| LogStoreError::InsertFailed(format!("Insert failed: {e}")).into())
    }
}

/// DDL for the log table
///
/// `table` must already be validated as a plain identifier.
pub(crate) fn create_table_sql(table: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {table} (\n    \
         id BIGSERIAL PRIMARY KEY,\n    \
         created_at TIMESTAMPTZ NOT NULL DEFAULT now(),\n    \
         payload JSONB NOT NULL\n)"
    )
}

pub(crate) fn insert_sql(table: &str) -> String {
    format!("INSERT INTO {table} (payload) VALUES ($1)")
}

fn connection_string_safe(conn_str: &str) -> String {
    conn_str
        .rsplit_once('@')
        .map(|(_, host)| format!("postgresql://***@{host}"))
        .unwrap_or_else(|| "postgresql://***".to_string())
}
