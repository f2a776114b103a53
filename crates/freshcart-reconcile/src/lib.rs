//! # freshcart-reconcile: Cart Reconciliation Engine
//!
//! Keeps a cart whose items may have been added under one depot consistent
//! with the variant catalog of whichever depot is currently selected —
//! without ever silently deleting user intent.
//!
//! ## The Problem
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Monday:    shopper in Sector 21 adds "Cow Milk 500ml" (depot 1, ₹30)   │
//! │  Tuesday:   shopper changes pincode → depot 4 is now active             │
//! │                                                                         │
//! │  The cart still says depot 1. Depot 4 might:                            │
//! │    • sell the same pack under a different variant id and price          │
//! │    • not stock the product at all                                       │
//! │                                                                         │
//! │  Reconciliation re-validates every line against depot 4's catalog:      │
//! │    match found  → retarget variant/depot/price, mark available          │
//! │    no match     → keep the line, mark unavailable with a reason         │
//! │    lookup fails → keep every line, mark all unavailable (fail safe)     │
//! │                                                                         │
//! │  The item count NEVER changes. Removal is a user decision.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Capability traits consumed by the engine (the HTTP client
//!   implementing them lives outside this workspace)
//! - [`state`] - The `Idle / Validating / Done` state machine
//! - [`reconciler`] - The reconciliation pass itself
//! - [`triggers`] - Depot-change / connectivity / visibility trigger routing
//! - [`error`] - Catalog error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod reconciler;
pub mod state;
pub mod triggers;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::{resolve_service_area, DepotResolver, StaticCatalog, VariantCatalog};
pub use error::{CatalogError, CatalogResult};
pub use reconciler::{CartReconciler, ValidationOutcome};
pub use state::ValidationState;
pub use triggers::RevalidateTrigger;
