//! # freshcart-store: Persistence Layer for the freshcart Engine
//!
//! This crate provides the durable cart. Cart math lives in freshcart-core;
//! this crate decides where the bytes go.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      freshcart Data Flow                                │
//! │                                                                         │
//! │  UI action (add to cart)                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  freshcart-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │   CartStore   │    │   KeyValue    │    │  Migrations  │   │   │
//! │  │   │(cart_store.rs)│───►│  (adapter)    │    │  (embedded)  │   │   │
//! │  │   │               │    │               │    │              │   │   │
//! │  │   │ core::Cart +  │    │ MemoryKv      │    │ 001_kv_store │   │   │
//! │  │   │ persist after │    │ SqliteKv ─────┼───►│              │   │   │
//! │  │   │ every change  │    │               │    │              │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (or nothing at all, with MemoryKv)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`kv`] - The `KeyValue` adapter trait and the in-memory adapter
//! - [`pool`] - SQLite connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`sqlite`] - The SQLite `KeyValue` adapter
//! - [`cart_store`] - The persisted cart itself
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use freshcart_store::{CartStore, SqliteKv, StoreConfig};
//!
//! let kv = SqliteKv::connect(StoreConfig::new("path/to/freshcart.db")).await?;
//! let mut store = CartStore::load(kv).await;
//!
//! store.add(item).await?;
//! println!("subtotal: {}", store.cart().subtotal_paise());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart_store;
pub mod error;
pub mod kv;
pub mod migrations;
pub mod pool;
pub mod sqlite;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart_store::{CartStore, CART_STORAGE_KEY};
pub use error::StoreError;
pub use kv::{KeyValue, MemoryKv};
pub use pool::StoreConfig;
pub use sqlite::SqliteKv;
