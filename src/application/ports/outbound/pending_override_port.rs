use async_trait::async_trait;

use crate::domain::value_objects::PendingOverride;

#[derive(Debug, thiserror::Error)]
pub enum OverrideStoreError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Stored override value {0} is out of range")]
    CorruptValue(i64),
}

/// Persistence for the single world-scoped pending override.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PendingOverrideStore: Send + Sync {
    async fn get(&self) -> Result<PendingOverride, OverrideStoreError>;
    async fn set(&self, value: PendingOverride) -> Result<(), OverrideStoreError>;
    /// Read the pending value and reset it to 0 in one atomic step.
    async fn consume_and_reset(&self) -> Result<PendingOverride, OverrideStoreError>;
}
