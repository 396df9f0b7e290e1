//! Pending override service - the only gateway to the override store
//!
//! Reads never fail: a persistence error is logged and reported as "no
//! override", so a broken store degrades to ordinary rolls.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::application::ports::outbound::{OverrideStoreError, PendingOverrideStore};
use crate::domain::value_objects::PendingOverride;

pub struct PendingOverrideService {
    store: Arc<dyn PendingOverrideStore>,
    /// Serializes writes and consumption so no task sees a half-consumed value
    gate: Mutex<()>,
}

impl PendingOverrideService {
    pub fn new(store: Arc<dyn PendingOverrideStore>) -> Self {
        Self {
            store,
            gate: Mutex::new(()),
        }
    }

    /// Current pending value, or none if the store cannot be read.
    pub async fn get(&self) -> PendingOverride {
        match self.store.get().await {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to read pending d20 override: {}", e);
                PendingOverride::NONE
            }
        }
    }

    /// Overwrite the pending value. Callers clamp before calling.
    pub async fn set(&self, value: PendingOverride) -> Result<(), OverrideStoreError> {
        let _guard = self.gate.lock().await;
        self.store.set(value).await.inspect_err(|e| {
            tracing::error!("Failed to store pending d20 override: {}", e);
        })
    }

    pub async fn reset(&self) -> Result<(), OverrideStoreError> {
        self.set(PendingOverride::NONE).await
    }

    /// Take the pending value, leaving none behind.
    pub async fn consume_and_reset(&self) -> PendingOverride {
        let _guard = self.gate.lock().await;
        match self.store.consume_and_reset().await {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to consume pending d20 override: {}", e);
                PendingOverride::NONE
            }
        }
    }
}
