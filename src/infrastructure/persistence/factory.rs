//! Override store factory - Creates the store backend selected by configuration

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::application::ports::outbound::{OverrideStoreError, PendingOverrideStore};
use crate::domain::value_objects::PendingOverride;
use crate::infrastructure::config::OverrideStoreConfig;
use crate::infrastructure::persistence::{InMemoryOverrideStore, SqliteOverrideStore};

/// Enum wrapper for store backends to enable runtime selection
pub enum OverrideStoreBackend {
    Memory(InMemoryOverrideStore),
    Sqlite(SqliteOverrideStore),
}

#[async_trait]
impl PendingOverrideStore for OverrideStoreBackend {
    async fn get(&self) -> Result<PendingOverride, OverrideStoreError> {
        match self {
            OverrideStoreBackend::Memory(s) => s.get().await,
            OverrideStoreBackend::Sqlite(s) => s.get().await,
        }
    }

    async fn set(&self, value: PendingOverride) -> Result<(), OverrideStoreError> {
        match self {
            OverrideStoreBackend::Memory(s) => s.set(value).await,
            OverrideStoreBackend::Sqlite(s) => s.set(value).await,
        }
    }

    async fn consume_and_reset(&self) -> Result<PendingOverride, OverrideStoreError> {
        match self {
            OverrideStoreBackend::Memory(s) => s.consume_and_reset().await,
            OverrideStoreBackend::Sqlite(s) => s.consume_and_reset().await,
        }
    }
}

/// Create the configured override store
pub async fn create_override_store(
    config: &OverrideStoreConfig,
    world_id: &str,
) -> Result<Arc<OverrideStoreBackend>> {
    match config.backend.as_str() {
        "memory" => Ok(Arc::new(OverrideStoreBackend::Memory(
            InMemoryOverrideStore::new(),
        ))),
        "sqlite" => {
            // Ensure data directory exists
            if let Some(parent) = std::path::Path::new(&config.sqlite_path).parent() {
                std::fs::create_dir_all(parent)
                    .context("Failed to create override database directory")?;
            }

            let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", config.sqlite_path))
                .await
                .context("Failed to connect to SQLite override database")?;
            tracing::info!("Connected to SQLite override database: {}", config.sqlite_path);

            let store = SqliteOverrideStore::new(pool, world_id)
                .await
                .context("Failed to initialize override settings table")?;
            Ok(Arc::new(OverrideStoreBackend::Sqlite(store)))
        }
        backend => anyhow::bail!("Unsupported override store backend: {}", backend),
    }
}
