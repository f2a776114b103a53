//! # Store Error Types
//!
//! Error types for persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Host application decides: toast, retry, or ignore                      │
//! │                                                                         │
//! │  EXCEPTION: loading the persisted cart never errors. Malformed or       │
//! │  missing state falls back to an empty cart (see cart_store.rs).         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Persistence operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying SQLite/sqlx failure.
    ///
    /// ## When This Occurs
    /// - Database file can't be created (permissions, disk full)
    /// - Pool exhausted or connection dropped
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration failed.
    ///
    /// ## When This Occurs
    /// - Schema version conflict between app releases
    /// - Corrupted database file
    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Cart state could not be serialized for storage.
    ///
    /// Deserialization failures are NOT routed here; they degrade to an
    /// empty cart at load time instead.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A non-SQLite adapter failed (custom host adapters).
    #[error("Storage adapter error: {0}")]
    Adapter(String),
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
