//! # freshcart-core: Pure Business Logic for the freshcart Engine
//!
//! This crate is the **heart** of the cart reconciliation and pricing engine.
//! It contains all business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      freshcart Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront UI (TypeScript)                      │   │
//! │  │    Catalog ──► Cart ──► Checkout ──► Subscription picker        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ freshcart-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │  types   │ │  money   │ │   cart   │ │ pricing/schedule │  │   │
//! │  │   │ Depot    │ │  Money   │ │   Cart   │ │ quotes, savings, │  │   │
//! │  │   │ Variant  │ │ (paise)  │ │ CartItem │ │ delivery dates   │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │   freshcart-store (persistence)   freshcart-reconcile (async)   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, DepotVariant, CartItem, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart collection with merge-by-variant semantics
//! - [`pricing`] - Variant selection, subscription pricing, savings
//! - [`schedule`] - Weekly delivery schedule → concrete calendar dates
//! - [`units`] - Unit-label canonicalization ("1 Ltrs" == "1L")
//! - [`validation`] - Input validation and quantity clamping
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Degrade, Don't Crash**: commerce data must always render something, so
//!    missing prices become zero quotes and bad quantities are clamped
//!
//! ## Example Usage
//!
//! ```rust
//! use freshcart_core::money::Money;
//! use freshcart_core::pricing::savings;
//!
//! let mrp = Money::from_paise(10000);   // ₹100.00
//! let price = Money::from_paise(8000);  // ₹80.00 on a 15-day plan
//!
//! let s = savings(mrp, price);
//! assert_eq!(s.percent, 20);
//! assert_eq!(s.amount.paise(), 2000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;
pub mod schedule;
pub mod types;
pub mod units;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use freshcart_core::Money` instead of
// `use freshcart_core::money::Money`

pub use cart::Cart;
pub use error::ValidationError;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum quantity of a single line item.
///
/// Decrementing at this floor is a no-op; removing an item is an explicit
/// user action, never a side effect of quantity math.
pub const MIN_ITEM_QUANTITY: i64 = 1;

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 999 instead of 9).
/// Quantities beyond this are clamped silently, never rejected.
pub const MAX_ITEM_QUANTITY: i64 = 99;
