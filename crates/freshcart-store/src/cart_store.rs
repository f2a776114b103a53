//! # Cart Store
//!
//! The authoritative, persisted cart. Wraps the pure [`Cart`] from
//! freshcart-core and serializes the full state through the injected
//! [`KeyValue`] adapter after every mutation.
//!
//! ## Persistence Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CartStore Persistence                                │
//! │                                                                         │
//! │  load(kv)                                                               │
//! │    kv.get("cart") ─┬─ Some(valid JSON) ──► deserialized cart            │
//! │                    ├─ Some(garbage)    ──► warn! + empty cart           │
//! │                    ├─ None             ──► empty cart                   │
//! │                    └─ adapter error    ──► warn! + empty cart           │
//! │                                                                         │
//! │  add / remove / increment / decrement / clear / replace_items           │
//! │    mutate core Cart ──► kv.put("cart", json) ──► StoreResult<()>        │
//! │                                                                         │
//! │  Loading NEVER fails. Writing reports a typed error and leaves the      │
//! │  in-memory cart as the source of truth until the next successful write. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, warn};

use freshcart_core::cart::Cart;
use freshcart_core::types::CartItem;

use crate::error::StoreResult;
use crate::kv::KeyValue;

/// The key under which the cart document is persisted.
pub const CART_STORAGE_KEY: &str = "cart";

// =============================================================================
// Cart Store
// =============================================================================

/// The persisted cart: single source of truth for cart contents.
///
/// Generic over the [`KeyValue`] adapter so tests run on [`crate::MemoryKv`]
/// and production runs on [`crate::SqliteKv`] (or a host-supplied adapter).
#[derive(Debug)]
pub struct CartStore<K: KeyValue> {
    cart: Cart,
    kv: K,
}

impl<K: KeyValue> CartStore<K> {
    /// Loads the cart from the adapter.
    ///
    /// Missing, unreadable, or malformed state falls back to an empty cart.
    /// This function never fails: a shopper with a corrupted cart file gets
    /// an empty cart, not an error screen.
    pub async fn load(kv: K) -> Self {
        let cart = match kv.get(CART_STORAGE_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Cart>(&raw) {
                Ok(cart) => {
                    let cart = sanitize(cart);
                    debug!(items = cart.item_count(), "Restored persisted cart");
                    cart
                }
                Err(err) => {
                    warn!(%err, "Persisted cart is malformed, starting empty");
                    Cart::new()
                }
            },
            Ok(None) => Cart::new(),
            Err(err) => {
                warn!(%err, "Could not read persisted cart, starting empty");
                Cart::new()
            }
        };

        CartStore { cart, kv }
    }

    /// Read access to the current cart state.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    // =========================================================================
    // Mutations (each persists the new state)
    // =========================================================================

    /// Adds a line item (merge-by-variant, see [`Cart::add_item`]).
    pub async fn add(&mut self, item: CartItem) -> StoreResult<()> {
        self.cart.add_item(item);
        self.persist().await
    }

    /// Removes a line by variant id.
    pub async fn remove(&mut self, variant_id: i64) -> StoreResult<()> {
        self.cart.remove_item(variant_id);
        self.persist().await
    }

    /// Increments a line's quantity (capped at 99).
    pub async fn increment(&mut self, variant_id: i64) -> StoreResult<()> {
        self.cart.increment(variant_id);
        self.persist().await
    }

    /// Decrements a line's quantity (floored at 1, never removes).
    pub async fn decrement(&mut self, variant_id: i64) -> StoreResult<()> {
        self.cart.decrement(variant_id);
        self.persist().await
    }

    /// Empties the cart (after successful order placement).
    pub async fn clear(&mut self) -> StoreResult<()> {
        self.cart.clear();
        self.persist().await
    }

    /// Atomically replaces the item list (the reconciler's commit point).
    pub async fn replace_items(&mut self, items: Vec<CartItem>) -> StoreResult<()> {
        self.cart.replace_items(items);
        self.persist().await
    }

    /// Serializes the full cart state to the adapter.
    async fn persist(&self) -> StoreResult<()> {
        let json = serde_json::to_string(&self.cart)?;
        self.kv.put(CART_STORAGE_KEY, &json).await
    }

    // =========================================================================
    // Read Delegates
    // =========================================================================

    /// Whether the cart has no lines at all.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Subtotal over every line.
    pub fn subtotal_paise(&self) -> i64 {
        self.cart.subtotal_paise()
    }

    /// Subtotal over available lines only; what checkout charges.
    pub fn available_subtotal_paise(&self) -> i64 {
        self.cart.available_subtotal_paise()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.cart.total_quantity()
    }

    /// Lines that count as available.
    pub fn available_items(&self) -> Vec<&CartItem> {
        self.cart.available_items()
    }

    /// Lines explicitly marked unavailable.
    pub fn unavailable_items(&self) -> Vec<&CartItem> {
        self.cart.unavailable_items()
    }

    /// Checkout gate: submission is rejected when this is false.
    pub fn has_available_items(&self) -> bool {
        self.cart.has_available_items()
    }
}

/// Re-establishes the cart invariants on state loaded from disk.
///
/// Persisted JSON can be well-formed yet stale or hand-edited: quantities
/// outside [1, 99], the same variant listed twice. Re-adding every line
/// clamps quantities and merges duplicates; a cart that already satisfies
/// the invariants passes through unchanged.
fn sanitize(cart: Cart) -> Cart {
    let mut clean = Cart::new();
    for item in cart.items {
        clean.add_item(item);
    }
    clean
}

// =============================================================================
// Unit Tests
// =============================================================================
