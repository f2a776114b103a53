//! # SQLite KeyValue Adapter
//!
//! The production [`KeyValue`] implementation: a single `kv_store` table in
//! a local SQLite file. The cart is one row; the adapter stays generic so
//! other engine state (last depot, preferences) can share the file.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreResult;
use crate::kv::KeyValue;
use crate::pool::{create_pool, StoreConfig};

/// SQLite-backed key-value store.
///
/// ## Usage
/// ```rust,ignore
/// let kv = SqliteKv::connect(StoreConfig::new("./freshcart.db")).await?;
/// kv.put("cart", &json).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SqliteKv {
    pool: SqlitePool,
}

impl SqliteKv {
    /// Opens (creating if missing) the database and runs migrations.
    pub async fn connect(config: StoreConfig) -> StoreResult<Self> {
        let pool = create_pool(&config).await?;
        Ok(SqliteKv { pool })
    }

    /// Wraps an existing pool (the host may share one across subsystems).
    pub fn from_pool(pool: SqlitePool) -> Self {
        SqliteKv { pool }
    }

    /// Access to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl KeyValue for SqliteKv {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(value)
    }

    async fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET
                 value = excluded.value,
                 updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        debug!(key, bytes = value.len(), "Persisted key");
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_db() -> SqliteKv {
        // A single connection keeps the in-memory database alive and shared.
        let config = StoreConfig::new(":memory:")
            .max_connections(1)
            .min_connections(1);
        SqliteKv::connect(config).await.expect("in-memory sqlite")
    }

    #[tokio::test]
    async fn test_round_trip() {
        let kv = memory_db().await;

        assert_eq!(kv.get("cart").await.unwrap(), None);

        kv.put("cart", r#"{"items":[]}"#).await.unwrap();
        assert_eq!(
            kv.get("cart").await.unwrap().as_deref(),
            Some(r#"{"items":[]}"#)
        );
    }

    #[tokio::test]
    async fn test_upsert_replaces_value() {
        let kv = memory_db().await;

        kv.put("cart", "v1").await.unwrap();
        kv.put("cart", "v2").await.unwrap();

        assert_eq!(kv.get("cart").await.unwrap().as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn test_delete() {
        let kv = memory_db().await;

        kv.put("cart", "v1").await.unwrap();
        kv.delete("cart").await.unwrap();
        assert_eq!(kv.get("cart").await.unwrap(), None);

        // No-op on absent key
        kv.delete("cart").await.unwrap();
    }
}
