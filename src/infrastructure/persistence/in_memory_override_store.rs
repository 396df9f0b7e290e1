use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::ports::outbound::{OverrideStoreError, PendingOverrideStore};
use crate::domain::value_objects::PendingOverride;

/// Process-local override store; the value does not survive a restart.
#[derive(Default)]
pub struct InMemoryOverrideStore {
    value: Mutex<PendingOverride>,
}

impl InMemoryOverrideStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PendingOverrideStore for InMemoryOverrideStore {
    async fn get(&self) -> Result<PendingOverride, OverrideStoreError> {
        Ok(*self.value.lock().await)
    }

    async fn set(&self, value: PendingOverride) -> Result<(), OverrideStoreError> {
        *self.value.lock().await = value;
        Ok(())
    }

    async fn consume_and_reset(&self) -> Result<PendingOverride, OverrideStoreError> {
        let mut value = self.value.lock().await;
        Ok(std::mem::take(&mut *value))
    }
}
