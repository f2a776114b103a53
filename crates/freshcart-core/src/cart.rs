//! # Cart
//!
//! The pure cart collection: an ordered list of line items keyed by variant
//! id, with merge-safe mutation and quantity clamping. Persistence lives in
//! freshcart-store; availability annotation lives in freshcart-reconcile.
//! This module is arithmetic and list surgery only.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Operations                                  │
//! │                                                                         │
//! │  UI Action               Cart Method             State Change           │
//! │  ─────────               ───────────             ────────────           │
//! │  Add to cart ──────────► add_item() ───────────► merge or append        │
//! │  Stepper + ────────────► increment() ──────────► qty+1, cap 99          │
//! │  Stepper − ────────────► decrement() ──────────► qty-1, floor 1         │
//! │  Remove line ──────────► remove_item() ────────► delete line            │
//! │  Order placed ─────────► clear() ──────────────► empty                  │
//! │  Depot revalidated ────► replace_items() ──────► atomic swap            │
//! │                                                                         │
//! │  INVARIANTS: no two lines share a variant_id; 1 ≤ quantity ≤ 99;        │
//! │  replace_items never changes the line count.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::CartItem;
use crate::validation::clamp_quantity;

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `variant_id` (adding the same variant merges)
/// - Every quantity is within [1, 99]
/// - Decrement never removes a line; `remove_item` is the only deletion
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Line items, in insertion order.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds a line item, merging by variant id.
    ///
    /// ## Behavior
    /// - Same `variant_id` already present: quantities sum (clamped at 99)
    ///   and the existing line's depot, price snapshot and availability
    ///   fields are overwritten with the incoming ones — the incoming item
    ///   was just priced, so its snapshot is fresher.
    /// - Otherwise: the item is appended (quantity clamped on the way in).
    ///
    /// Provenance (`original_depot_id`/`original_variant_id`) of an existing
    /// line is kept; the first add wins.
    pub fn add_item(&mut self, incoming: CartItem) {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.variant_id == incoming.variant_id)
        {
            existing.quantity = clamp_quantity(existing.quantity + incoming.quantity);
            existing.price_paise = incoming.price_paise;
            existing.depot_id = incoming.depot_id;
            existing.is_available = incoming.is_available;
            existing.unavailable_reason = incoming.unavailable_reason;
            return;
        }

        let mut item = incoming;
        item.quantity = clamp_quantity(item.quantity);
        self.items.push(item);
    }

    /// Removes a line by variant id. No-op if absent.
    pub fn remove_item(&mut self, variant_id: i64) {
        self.items.retain(|i| i.variant_id != variant_id);
    }

    /// Increments a line's quantity by one, capped at 99. No-op if absent.
    pub fn increment(&mut self, variant_id: i64) {
        if let Some(item) = self.items.iter_mut().find(|i| i.variant_id == variant_id) {
            item.quantity = clamp_quantity(item.quantity + 1);
        }
    }

    /// Decrements a line's quantity by one, floored at 1. Never removes the
    /// line; explicit `remove_item` is required for that. No-op if absent.
    pub fn decrement(&mut self, variant_id: i64) {
        if let Some(item) = self.items.iter_mut().find(|i| i.variant_id == variant_id) {
            item.quantity = clamp_quantity(item.quantity - 1);
        }
    }

    /// Clears all items (invoked after successful order placement).
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Replaces the entire item list in one atomic swap.
    ///
    /// This is the reconciler's commit point: a validation pass builds the
    /// fully annotated list off to the side and swaps it in whole, so the
    /// cart is never observed half-reconciled.
    pub fn replace_items(&mut self, items: Vec<CartItem>) {
        self.items = items;
    }

    // =========================================================================
    // Read Accessors
    // =========================================================================

    /// Finds a line by variant id.
    pub fn find(&self, variant_id: i64) -> Option<&CartItem> {
        self.items.iter().find(|i| i.variant_id == variant_id)
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of unique lines in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity of all items.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Subtotal over every line, available or not.
    pub fn subtotal_paise(&self) -> i64 {
        self.items.iter().map(|i| i.line_total_paise()).sum()
    }

    /// Subtotal over lines whose availability flag is not explicitly false.
    /// This is the figure checkout charges against.
    pub fn available_subtotal_paise(&self) -> i64 {
        self.items
            .iter()
            .filter(|i| i.is_available())
            .map(|i| i.line_total_paise())
            .sum()
    }

    /// Lines that count as available (`is_available != Some(false)`).
    pub fn available_items(&self) -> Vec<&CartItem> {
        self.items.iter().filter(|i| i.is_available()).collect()
    }

    /// Lines explicitly marked unavailable: shown struck-through so the
    /// user can decide to remove them.
    pub fn unavailable_items(&self) -> Vec<&CartItem> {
        self.items.iter().filter(|i| !i.is_available()).collect()
    }

    /// Whether checkout has anything to submit.
    pub fn has_available_items(&self) -> bool {
        self.items.iter().any(|i| i.is_available())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_ITEM_QUANTITY;

    fn item(variant_id: i64, price_paise: i64, quantity: i64) -> CartItem {
        CartItem {
            product_id: 1,
            variant_id,
            name: "Cow Milk".to_string(),
            variant_name: "500ml".to_string(),
            price_paise,
            quantity,
            image_url: None,
            depot_id: 1,
            original_depot_id: Some(1),
            original_variant_id: Some(variant_id),
            is_available: None,
            unavailable_reason: None,
            added_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_add_and_totals() {
        let mut cart = Cart::new();
        cart.add_item(item(10, 3000, 2));
        cart.add_item(item(11, 5500, 1));

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.subtotal_paise(), 11500);
    }

    #[test]
    fn test_add_same_variant_merges() {
        let mut cart = Cart::new();
        cart.add_item(item(10, 3000, 2));
        cart.add_item(item(10, 3000, 3));

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.find(10).unwrap().quantity, 5);
    }

    #[test]
    fn test_merge_clamps_at_max() {
        let mut cart = Cart::new();
        cart.add_item(item(10, 3000, 60));
        cart.add_item(item(10, 3000, 60));

        assert_eq!(cart.find(10).unwrap().quantity, MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_merge_overwrites_depot_and_availability() {
        let mut cart = Cart::new();
        let mut stale = item(10, 3000, 1);
        stale.is_available = Some(false);
        stale.unavailable_reason = Some("not available in this area".to_string());
        cart.add_item(stale);

        let mut fresh = item(10, 3200, 1);
        fresh.depot_id = 7;
        fresh.is_available = Some(true);
        cart.add_item(fresh);

        let merged = cart.find(10).unwrap();
        assert_eq!(merged.quantity, 2);
        assert_eq!(merged.depot_id, 7);
        assert_eq!(merged.price_paise, 3200);
        assert_eq!(merged.is_available, Some(true));
        assert_eq!(merged.unavailable_reason, None);
        // Provenance of the first add is kept
        assert_eq!(merged.original_depot_id, Some(1));
    }

    #[test]
    fn test_add_clamps_incoming_quantity() {
        let mut cart = Cart::new();
        cart.add_item(item(10, 3000, 500));
        assert_eq!(cart.find(10).unwrap().quantity, 99);

        cart.add_item(item(11, 3000, 0));
        assert_eq!(cart.find(11).unwrap().quantity, 1);
    }

    #[test]
    fn test_increment_decrement_bounds() {
        let mut cart = Cart::new();
        cart.add_item(item(10, 3000, 1));

        cart.decrement(10);
        assert_eq!(cart.find(10).unwrap().quantity, 1); // floored, not removed
        assert_eq!(cart.item_count(), 1);

        for _ in 0..200 {
            cart.increment(10);
        }
        assert_eq!(cart.find(10).unwrap().quantity, MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::new();
        cart.add_item(item(10, 3000, 1));
        cart.add_item(item(11, 3000, 1));

        cart.remove_item(10);
        assert_eq!(cart.item_count(), 1);

        // No-op on absent variant
        cart.remove_item(999);
        assert_eq!(cart.item_count(), 1);

        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_availability_partition() {
        let mut cart = Cart::new();
        cart.add_item(item(10, 3000, 2)); // unvalidated → available
        let mut gone = item(11, 5500, 1);
        gone.is_available = Some(false);
        gone.unavailable_reason = Some("not available in this area".to_string());
        cart.add_item(gone);

        assert_eq!(cart.available_items().len(), 1);
        assert_eq!(cart.unavailable_items().len(), 1);
        assert_eq!(cart.subtotal_paise(), 11500);
        assert_eq!(cart.available_subtotal_paise(), 6000);
        assert!(cart.has_available_items());
    }

    /// Property: any sequence of add/increment/decrement keeps every
    /// quantity in [1, 99].
    #[test]
    fn test_quantity_invariant_under_mixed_operations() {
        let mut cart = Cart::new();
        cart.add_item(item(10, 3000, 98));

        let ops: [&dyn Fn(&mut Cart); 3] = [
            &|c| c.increment(10),
            &|c| c.decrement(10),
            &|c| c.add_item(item(10, 3000, 7)),
        ];
        for round in 0..50 {
            ops[round % ops.len()](&mut cart);
            let quantity = cart.find(10).unwrap().quantity;
            assert!((1..=99).contains(&quantity), "quantity {quantity} escaped");
        }
    }
}
