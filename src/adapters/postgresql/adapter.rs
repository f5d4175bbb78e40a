//! PostgreSQL adapter implementing the log store trait

use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::adapters::store::LogStore;
use crate::anonymization::OutboundRecord;
use crate::domain::Result;
use async_trait::async_trait;
use tokio::sync::OnceCell;

/// PostgreSQL implementation of [`LogStore`]
///
/// Each record becomes one row whose `payload` column holds the record as
/// JSONB. The table is created on first use.
pub struct PostgresLogStore {
    client: PostgreSQLClient,
    table_ready: OnceCell<()>,
}

impl PostgresLogStore {
    /// Create a new PostgreSQL log store
    pub fn new(client: PostgreSQLClient) -> Self {
        Self {
            client,
            table_ready: OnceCell::new(),
        }
    }

    async fn ensure_table(&self) -> Result<()> {
        self.table_ready
            .get_or_try_init(|| self.client.ensure_table())
            .await?;
        Ok(())
    }
}

#[async_trait]
impl LogStore for PostgresLogStore {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    async fn insert(&self, record: &OutboundRecord) -> Result<()> {
        self.ensure_table().await?;

        let payload = record.to_json()?;
        self.client.insert_payload(&payload).await?;

        tracing::debug!(table = %self.client.table(), "PostgreSQL insert complete");
        Ok(())
    }

    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await?;
        self.ensure_table().await
    }
}
