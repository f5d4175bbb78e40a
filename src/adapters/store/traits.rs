//! Log store abstraction traits
//!
//! This module defines the trait that log store adapters must implement
//! to receive outbound records.

use crate::anonymization::OutboundRecord;
use crate::domain::Result;
use async_trait::async_trait;

/// Persistence collaborator for anonymized story records
///
/// Implementations receive records that have already been anonymized and
/// verified; they never see real names outside `record.mapping`.
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Short backend name used in log events
    fn name(&self) -> &'static str;

    /// Persist a single outbound record
    ///
    /// # Errors
    ///
    /// Returns [`LogStoreError`](crate::domain::LogStoreError) wrapped in
    /// `StorylogError::Store` if the backend is unreachable or rejects the
    /// record.
    async fn insert(&self, record: &OutboundRecord) -> Result<()>;

    /// Check that the backend is reachable
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached.
    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }
}
