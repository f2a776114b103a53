//! # KeyValue Adapter
//!
//! The persistence seam of the engine. The cart is a JSON document under a
//! single key; anything that can read and write string pairs can back it.
//!
//! ## Why a Trait?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Injected Persistence                                │
//! │                                                                         │
//! │  CartStore<K: KeyValue> ──┬──► SqliteKv   (production, sqlite.rs)       │
//! │                           ├──► MemoryKv   (tests, this file)            │
//! │                           └──► host adapter (webview localStorage, ...) │
//! │                                                                         │
//! │  The cart logic never knows which one it got. Tests supply MemoryKv     │
//! │  and exercise every persistence path without touching a file.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::error::StoreResult;

// =============================================================================
// Trait
// =============================================================================

/// A client-side key-value store.
///
/// Implementations must be cheap to call repeatedly: the cart store persists
/// after every mutation.
#[allow(async_fn_in_trait)]
pub trait KeyValue: Send + Sync {
    /// Reads the value stored under `key`, if any.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes `key`. No-op if absent.
    async fn delete(&self, key: &str) -> StoreResult<()>;
}

// =============================================================================
// In-Memory Adapter
// =============================================================================

/// In-memory adapter for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKv {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        MemoryKv::default()
    }

    /// Creates a store pre-seeded with one entry (handy in tests).
    pub async fn with_entry(key: &str, value: &str) -> Self {
        let kv = MemoryKv::new();
        kv.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        kv
    }
}

impl KeyValue for MemoryKv {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_kv_round_trip() {
        let kv = MemoryKv::new();

        assert_eq!(kv.get("cart").await.unwrap(), None);

        kv.put("cart", r#"{"items":[]}"#).await.unwrap();
        assert_eq!(
            kv.get("cart").await.unwrap().as_deref(),
            Some(r#"{"items":[]}"#)
        );

        kv.put("cart", "updated").await.unwrap();
        assert_eq!(kv.get("cart").await.unwrap().as_deref(), Some("updated"));

        kv.delete("cart").await.unwrap();
        assert_eq!(kv.get("cart").await.unwrap(), None);

        // Deleting an absent key is a no-op
        kv.delete("cart").await.unwrap();
    }
}
