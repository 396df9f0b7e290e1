use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::application::ports::outbound::{OverrideStoreError, PendingOverrideStore};
use crate::domain::value_objects::PendingOverride;

/// Setting key under which the pending face is stored.
const OVERRIDE_KEY: &str = "nextD20";

/// Override store in a world-scoped SQLite settings table.
pub struct SqliteOverrideStore {
    pool: SqlitePool,
    scope: String,
}

impl SqliteOverrideStore {
    pub async fn new(pool: SqlitePool, world_id: &str) -> Result<Self, sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS module_settings (
                scope TEXT NOT NULL,
                key TEXT NOT NULL,
                value INTEGER NOT NULL DEFAULT 0,
                updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (scope, key)
            )
        "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self {
            pool,
            scope: format!("world:{}", world_id),
        })
    }

    fn decode(raw: Option<i64>) -> Result<PendingOverride, OverrideStoreError> {
        match raw {
            None => Ok(PendingOverride::NONE),
            Some(value) => {
                PendingOverride::new(value).map_err(|_| OverrideStoreError::CorruptValue(value))
            }
        }
    }
}

fn db_error(e: sqlx::Error) -> OverrideStoreError {
    OverrideStoreError::Database(e.to_string())
}

#[async_trait]
impl PendingOverrideStore for SqliteOverrideStore {
    async fn get(&self) -> Result<PendingOverride, OverrideStoreError> {
        let raw: Option<i64> =
            sqlx::query_scalar("SELECT value FROM module_settings WHERE scope = ? AND key = ?")
                .bind(&self.scope)
                .bind(OVERRIDE_KEY)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        Self::decode(raw)
    }

    async fn set(&self, value: PendingOverride) -> Result<(), OverrideStoreError> {
        sqlx::query(
            "INSERT OR REPLACE INTO module_settings (scope, key, value, updated_at) VALUES (?, ?, ?, CURRENT_TIMESTAMP)",
        )
        .bind(&self.scope)
        .bind(OVERRIDE_KEY)
        .bind(i64::from(value))
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn consume_and_reset(&self) -> Result<PendingOverride, OverrideStoreError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let raw: Option<i64> =
            sqlx::query_scalar("SELECT value FROM module_settings WHERE scope = ? AND key = ?")
                .bind(&self.scope)
                .bind(OVERRIDE_KEY)
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_error)?;

        if raw.is_some_and(|v| v != 0) {
            sqlx::query(
                "UPDATE module_settings SET value = 0, updated_at = CURRENT_TIMESTAMP WHERE scope = ? AND key = ?",
            )
            .bind(&self.scope)
            .bind(OVERRIDE_KEY)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
        }

        tx.commit().await.map_err(db_error)?;

        // A corrupt value is cleared above and reported once
        Self::decode(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_missing_row_reads_as_none() {
        let store = SqliteOverrideStore::new(memory_pool().await, "w1").await.unwrap();
        assert_eq!(store.get().await.unwrap(), PendingOverride::NONE);
        assert_eq!(store.consume_and_reset().await.unwrap(), PendingOverride::NONE);
    }

    #[tokio::test]
    async fn test_set_get_consume() {
        let store = SqliteOverrideStore::new(memory_pool().await, "w1").await.unwrap();
        store.set(PendingOverride::clamped(14)).await.unwrap();
        assert_eq!(store.get().await.unwrap().value(), 14);

        assert_eq!(store.consume_and_reset().await.unwrap().value(), 14);
        assert_eq!(store.get().await.unwrap(), PendingOverride::NONE);
    }

    #[tokio::test]
    async fn test_worlds_are_isolated() {
        let pool = memory_pool().await;
        let first = SqliteOverrideStore::new(pool.clone(), "w1").await.unwrap();
        let second = SqliteOverrideStore::new(pool, "w2").await.unwrap();

        first.set(PendingOverride::clamped(3)).await.unwrap();
        assert_eq!(second.get().await.unwrap(), PendingOverride::NONE);
    }

    #[tokio::test]
    async fn test_corrupt_value_is_reported_and_cleared() {
        let pool = memory_pool().await;
        let store = SqliteOverrideStore::new(pool.clone(), "w1").await.unwrap();
        sqlx::query("INSERT INTO module_settings (scope, key, value) VALUES ('world:w1', 'nextD20', 42)")
            .execute(&pool)
            .await
            .unwrap();

        assert!(matches!(
            store.get().await,
            Err(OverrideStoreError::CorruptValue(42))
        ));
        assert!(matches!(
            store.consume_and_reset().await,
            Err(OverrideStoreError::CorruptValue(42))
        ));
        assert_eq!(store.get().await.unwrap(), PendingOverride::NONE);
    }

    #[tokio::test]
    async fn test_value_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}?mode=rwc", dir.path().join("override.db").display());

        {
            let pool = SqlitePool::connect(&url).await.unwrap();
            let store = SqliteOverrideStore::new(pool.clone(), "w1").await.unwrap();
            store.set(PendingOverride::clamped(8)).await.unwrap();
            pool.close().await;
        }

        let pool = SqlitePool::connect(&url).await.unwrap();
        let store = SqliteOverrideStore::new(pool, "w1").await.unwrap();
        assert_eq!(store.consume_and_reset().await.unwrap().value(), 8);
    }
}
