//! In-process log store
//!
//! Keeps records in memory. Used for dry runs and tests.

use crate::adapters::store::LogStore;
use crate::anonymization::OutboundRecord;
use crate::domain::Result;
use async_trait::async_trait;
use std::sync::Mutex;

/// Log store that keeps every record in a `Vec`
#[derive(Default)]
pub struct MemoryLogStore {
    records: Mutex<Vec<OutboundRecord>>,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the stored records
    pub fn records(&self) -> Vec<OutboundRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LogStore for MemoryLogStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, record: &OutboundRecord) -> Result<()> {
        let mut records = self
            .records
            .lock()
            .map_err(|e| crate::domain::StorylogError::Other(format!("Store lock poisoned: {e}")))?;
        records.push(record.clone());
        Ok(())
    }
}
