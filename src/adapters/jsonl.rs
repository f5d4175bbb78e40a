//! JSON Lines file log store
//!
//! Appends one serialized record per line. Suited to local development and
//! to deployments that ship log files elsewhere.

use crate::adapters::store::LogStore;
use crate::anonymization::OutboundRecord;
use crate::domain::{LogStoreError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Log store writing to a local `.jsonl` file
pub struct JsonlLogStore {
    path: PathBuf,
    // Serializes appends from concurrent dispatches
    write_lock: Mutex<()>,
}

impl JsonlLogStore {
    /// Create a store appending to `path`
    ///
    /// The file and its parent directories are created on first insert.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// File this store appends to
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LogStore for JsonlLogStore {
    fn name(&self) -> &'static str {
        "jsonl"
    }

    async fn insert(&self, record: &OutboundRecord) -> Result<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                LogStoreError::ConnectionFailed(format!(
                    "Failed to create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                LogStoreError::ConnectionFailed(format!(
                    "Failed to open {}: {e}",
                    self.path.display()
                ))
            })?;

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| LogStoreError::InsertFailed(format!("Failed to append record: {e}")))?;
        file.flush()
            .await
            .map_err(|e| LogStoreError::InsertFailed(format!("Failed to flush record: {e}")))?;

        Ok(())
    }
}
