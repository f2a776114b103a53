//! # Cart Reconciler
//!
//! Re-validates every cart line against the variant catalog of the currently
//! selected depot, producing an availability-annotated cart without ever
//! discarding items.
//!
//! ## A Validation Pass
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  validate_cart(depot 4)                                                 │
//! │                                                                         │
//! │  1. Guards: empty cart? pass in flight? already done for depot 4?       │
//! │     → suppressed, no network work                                       │
//! │  2. state := Validating(4)                                              │
//! │  3. one variants_for_depot(4) lookup, indexed by product id             │
//! │  4. late-response check: does this pass still own Validating(4)?        │
//! │     → otherwise Superseded, cart untouched                              │
//! │  5. per line: orderable match → available, retarget variant/price;      │
//! │              no match       → unavailable + reason, line retained;      │
//! │     lookup failed           → EVERY line unavailable, generic reason    │
//! │  6. one atomic replace_items commit; item count unchanged               │
//! │  7. state := Done(4) on success, Idle after failure (retry allowed)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in here throws across the public boundary: catalog failures
//! degrade to the all-unavailable annotation, and the only `Err` a caller
//! can see is the persistence adapter refusing the commit.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use freshcart_core::pricing::price_for_option;
use freshcart_core::types::{CartItem, DepotVariant, PurchaseOption};
use freshcart_core::units::UnitAliases;
use freshcart_store::error::StoreResult;
use freshcart_store::kv::KeyValue;
use freshcart_store::CartStore;

use crate::catalog::VariantCatalog;
use crate::state::ValidationState;

/// Reason set on a line the target depot cannot serve.
pub const REASON_NOT_IN_AREA: &str = "not available in this area";

/// Reason set on every line when the catalog lookup itself fails.
pub const REASON_UNCONFIRMED: &str = "could not confirm availability";

// =============================================================================
// Validation Outcome
// =============================================================================

/// What a call to [`CartReconciler::validate_cart`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The cart was re-annotated against the target depot's catalog.
    Revalidated,

    /// The lookup failed; every line was annotated unavailable.
    Degraded,

    /// Nothing to validate.
    SkippedEmptyCart,

    /// A pass is already in flight; this call was suppressed.
    SkippedInFlight,

    /// The cart is already annotated for this depot; no redundant lookup.
    SkippedAlreadyValidated,

    /// The pass completed but no longer owned the validation slot; its
    /// results were discarded without touching the cart.
    Superseded,

    /// A connectivity or timer trigger arrived before any depot was ever
    /// selected; there is nothing to validate against.
    SkippedNoDepot,
}

// =============================================================================
// Cart Reconciler
// =============================================================================

/// Owns the persisted cart and keeps it consistent with the active depot.
///
/// Single-threaded by design: the host event loop serializes UI actions, so
/// suppression is handled by [`ValidationState`], not a mutex.
#[derive(Debug)]
pub struct CartReconciler<K: KeyValue, C: VariantCatalog> {
    store: CartStore<K>,
    catalog: C,
    aliases: UnitAliases,
    state: ValidationState,
    last_depot: Option<i64>,
}

impl<K: KeyValue, C: VariantCatalog> CartReconciler<K, C> {
    /// Creates a reconciler over a loaded cart store and a catalog.
    pub fn new(store: CartStore<K>, catalog: C) -> Self {
        CartReconciler {
            store,
            catalog,
            aliases: UnitAliases::default(),
            state: ValidationState::Idle,
            last_depot: None,
        }
    }

    /// Replaces the unit-alias table (catalogs with unusual labels).
    pub fn with_aliases(mut self, aliases: UnitAliases) -> Self {
        self.aliases = aliases;
        self
    }

    /// Read access to the underlying cart store.
    pub fn store(&self) -> &CartStore<K> {
        &self.store
    }

    /// Mutable access for cart mutations (add/remove/steppers).
    ///
    /// Mutating the cart does not reset the validation state: an item added
    /// under the already-validated depot is annotated on the next trigger.
    pub fn store_mut(&mut self) -> &mut CartStore<K> {
        &mut self.store
    }

    /// The current validation state.
    pub fn state(&self) -> ValidationState {
        self.state
    }

    /// The depot most recently targeted by a pass, if any.
    pub fn last_depot(&self) -> Option<i64> {
        self.last_depot
    }

    /// Forgets the `Done` marker so the next trigger re-runs validation
    /// (connectivity regained, price-refresh tick).
    pub fn invalidate(&mut self) {
        if !self.state.is_validating() {
            self.state = ValidationState::Idle;
        }
    }

    /// Re-validates the cart against `depot_id`.
    ///
    /// Idempotent per depot and suppressed while a pass is in flight; always
    /// terminates by either committing a full annotated replacement of the
    /// cart or reporting why it did not. Catalog errors never propagate —
    /// the only `Err` here is the persistence adapter failing the commit.
    pub async fn validate_cart(&mut self, depot_id: i64) -> StoreResult<ValidationOutcome> {
        if self.store.is_empty() {
            debug!(depot_id, "Skipping validation: cart is empty");
            return Ok(ValidationOutcome::SkippedEmptyCart);
        }
        if self.state.is_validating() {
            debug!(depot_id, state = %self.state, "Skipping validation: pass in flight");
            return Ok(ValidationOutcome::SkippedInFlight);
        }
        if self.state.is_done_for(depot_id) {
            debug!(depot_id, "Skipping validation: already validated");
            return Ok(ValidationOutcome::SkippedAlreadyValidated);
        }

        self.state = ValidationState::Validating { depot_id };
        self.last_depot = Some(depot_id);
        info!(depot_id, "Validating cart against depot catalog");

        let lookup = self.catalog.variants_for_depot(depot_id).await;

        // A result may only be committed by the pass that still owns the
        // validation slot. If the state moved on while we were suspended
        // (host re-entrancy, a newer depot selection), discard this pass.
        if self.state != (ValidationState::Validating { depot_id }) {
            warn!(depot_id, state = %self.state, "Discarding stale validation result");
            return Ok(ValidationOutcome::Superseded);
        }

        match lookup {
            Ok(variants) => {
                let by_product = index_by_product(&variants);
                let annotated: Vec<CartItem> = self
                    .store
                    .cart()
                    .items
                    .iter()
                    .map(|item| annotate_item(item, &by_product, depot_id, &self.aliases))
                    .collect();

                let unavailable = annotated.iter().filter(|i| !i.is_available()).count();
                self.commit(annotated).await?;
                self.state = ValidationState::Done { depot_id };
                info!(
                    depot_id,
                    total = self.store.cart().item_count(),
                    unavailable,
                    "Cart revalidated"
                );
                Ok(ValidationOutcome::Revalidated)
            }
            Err(err) => {
                warn!(depot_id, %err, "Catalog lookup failed, marking all items unavailable");
                let degraded: Vec<CartItem> = self
                    .store
                    .cart()
                    .items
                    .iter()
                    .map(|item| mark_unavailable(item.clone(), REASON_UNCONFIRMED))
                    .collect();

                self.commit(degraded).await?;
                // Back to Idle: a retry for the same depot must not be
                // suppressed by a failed pass.
                self.state = ValidationState::Idle;
                Ok(ValidationOutcome::Degraded)
            }
        }
    }

    /// Persists the annotated item list. A failed commit ends the pass: the
    /// `Validating` slot is released so a retry is not suppressed forever.
    async fn commit(&mut self, items: Vec<CartItem>) -> StoreResult<()> {
        if let Err(err) = self.store.replace_items(items).await {
            self.state = ValidationState::Idle;
            return Err(err);
        }
        Ok(())
    }
}

// =============================================================================
// Annotation Helpers
// =============================================================================

fn index_by_product(variants: &[DepotVariant]) -> HashMap<i64, Vec<&DepotVariant>> {
    let mut index: HashMap<i64, Vec<&DepotVariant>> = HashMap::new();
    for variant in variants {
        index.entry(variant.product_id).or_default().push(variant);
    }
    index
}

/// Picks the target depot's variant for a cart line: same product and same
/// canonical unit if possible, otherwise the first orderable variant of the
/// product. Out-of-stock and hidden variants never match.
fn match_variant<'a>(
    item: &CartItem,
    by_product: &'a HashMap<i64, Vec<&'a DepotVariant>>,
    aliases: &UnitAliases,
) -> Option<&'a DepotVariant> {
    let candidates = by_product.get(&item.product_id)?;
    let orderable = || candidates.iter().filter(|v| v.is_orderable());

    orderable()
        .find(|v| aliases.matches(&v.unit, &item.variant_name))
        .or_else(|| orderable().next())
        .copied()
}

fn annotate_item(
    item: &CartItem,
    by_product: &HashMap<i64, Vec<&DepotVariant>>,
    depot_id: i64,
    aliases: &UnitAliases,
) -> CartItem {
    let mut item = item.clone();

    // Provenance is set exactly once, from the line's pre-reconciliation
    // identity, and never overwritten afterwards.
    if item.original_depot_id.is_none() {
        item.original_depot_id = Some(item.depot_id);
    }
    if item.original_variant_id.is_none() {
        item.original_variant_id = Some(item.variant_id);
    }

    match match_variant(&item, by_product, aliases) {
        Some(variant) => {
            item.depot_id = depot_id;
            item.variant_id = variant.id;
            item.variant_name = variant.unit.clone();
            item.price_paise = price_for_option(variant, PurchaseOption::BuyOnce).paise();
            item.is_available = Some(true);
            item.unavailable_reason = None;
            item
        }
        // Quantity and last-known price are retained so the UI can show the
        // line struck through and let the user decide.
        None => mark_unavailable(item, REASON_NOT_IN_AREA),
    }
}

fn mark_unavailable(mut item: CartItem, reason: &str) -> CartItem {
    item.is_available = Some(false);
    item.unavailable_reason = Some(reason.to_string());
    item
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::catalog::StaticCatalog;
    use freshcart_core::types::Depot;
    use freshcart_store::{MemoryKv, StoreError};

    /// Adapter whose next write fails on demand (simulated disk error).
    struct FlakyKv {
        inner: MemoryKv,
        fail_next_put: Arc<AtomicBool>,
    }

    impl FlakyKv {
        fn new() -> (Self, Arc<AtomicBool>) {
            let fail = Arc::new(AtomicBool::new(false));
            let kv = FlakyKv {
                inner: MemoryKv::new(),
                fail_next_put: fail.clone(),
            };
            (kv, fail)
        }
    }

    impl KeyValue for FlakyKv {
        async fn get(&self, key: &str) -> StoreResult<Option<String>> {
            self.inner.get(key).await
        }

        async fn put(&self, key: &str, value: &str) -> StoreResult<()> {
            if self.fail_next_put.swap(false, Ordering::SeqCst) {
                return Err(StoreError::Adapter("disk full".to_string()));
            }
            self.inner.put(key, value).await
        }

        async fn delete(&self, key: &str) -> StoreResult<()> {
            self.inner.delete(key).await
        }
    }

    fn variant(id: i64, product_id: i64, depot_id: i64, unit: &str, price: i64) -> DepotVariant {
        DepotVariant {
            id,
            product_id,
            depot_id,
            unit: unit.to_string(),
            mrp_paise: price + 500,
            buy_once_price_paise: Some(price),
            price_3_day_paise: None,
            price_15_day_paise: None,
            price_1_month_paise: None,
            closing_qty: 20,
            minimum_qty: 2,
            not_in_stock: false,
            is_hidden: false,
            depot: Depot {
                id: depot_id,
                name: format!("Depot {depot_id}"),
                is_online: true,
            },
        }
    }

    fn cart_item(product_id: i64, variant_id: i64, depot_id: i64, price: i64) -> CartItem {
        CartItem {
            product_id,
            variant_id,
            name: format!("Product {product_id}"),
            variant_name: "500ml".to_string(),
            price_paise: price,
            quantity: 2,
            image_url: None,
            depot_id,
            original_depot_id: Some(depot_id),
            original_variant_id: Some(variant_id),
            is_available: None,
            unavailable_reason: None,
            added_at: chrono_now(),
        }
    }

    fn chrono_now() -> chrono::DateTime<chrono::Utc> {
        chrono::Utc::now()
    }

    async fn reconciler_with(
        items: Vec<CartItem>,
        variants: Vec<DepotVariant>,
    ) -> CartReconciler<MemoryKv, StaticCatalog> {
        let mut store = CartStore::load(MemoryKv::new()).await;
        for item in items {
            store.add(item).await.unwrap();
        }
        CartReconciler::new(store, StaticCatalog::new(variants))
    }

    /// Scenario A: item added under depot 1 (V1, ₹50); depot 2 has a
    /// matching variant V2 at ₹55. Retarget, preserve provenance.
    #[tokio::test]
    async fn test_depot_switch_retargets_matching_variant() {
        let mut r = reconciler_with(
            vec![cart_item(100, 1, 1, 5000)],
            vec![variant(2, 100, 2, "500ml", 5500)],
        )
        .await;

        let outcome = r.validate_cart(2).await.unwrap();
        assert_eq!(outcome, ValidationOutcome::Revalidated);

        let item = r.store().cart().find(2).expect("retargeted to V2");
        assert_eq!(item.depot_id, 2);
        assert_eq!(item.variant_id, 2);
        assert_eq!(item.price_paise, 5500);
        assert_eq!(item.is_available, Some(true));
        assert_eq!(item.original_depot_id, Some(1));
        assert_eq!(item.original_variant_id, Some(1));
        assert_eq!(item.quantity, 2);
    }

    /// Scenario B: depot 2 has no variant for the product. Line retained,
    /// annotated, count unchanged.
    #[tokio::test]
    async fn test_no_match_marks_unavailable_without_removal() {
        let mut r = reconciler_with(
            vec![cart_item(100, 1, 1, 5000)],
            vec![variant(9, 777, 2, "500ml", 4000)], // different product
        )
        .await;

        r.validate_cart(2).await.unwrap();

        assert_eq!(r.store().cart().item_count(), 1);
        let item = r.store().cart().find(1).expect("line retained");
        assert_eq!(item.is_available, Some(false));
        assert_eq!(item.unavailable_reason.as_deref(), Some(REASON_NOT_IN_AREA));
        assert_eq!(item.price_paise, 5000); // last-known price, struck through
        assert_eq!(item.quantity, 2);
    }

    #[tokio::test]
    async fn test_out_of_stock_and_hidden_never_match() {
        let mut oos = variant(2, 100, 2, "500ml", 5500);
        oos.not_in_stock = true;
        let mut hidden = variant(3, 100, 2, "500ml", 5600);
        hidden.is_hidden = true;

        let mut r = reconciler_with(vec![cart_item(100, 1, 1, 5000)], vec![oos, hidden]).await;
        r.validate_cart(2).await.unwrap();

        let item = r.store().cart().find(1).unwrap();
        assert_eq!(item.is_available, Some(false));
    }

    #[tokio::test]
    async fn test_unit_alias_match_preferred_over_first() {
        // Depot 2 lists the product in two packs; the 500ml line must pick
        // the "500 ML" pack, not the catalog-first 1L pack.
        let mut r = reconciler_with(
            vec![cart_item(100, 1, 1, 5000)],
            vec![
                variant(2, 100, 2, "1 Ltrs", 9000),
                variant(3, 100, 2, "500 ML", 5500),
            ],
        )
        .await;

        r.validate_cart(2).await.unwrap();
        assert_eq!(r.store().cart().find(3).unwrap().variant_id, 3);
    }

    #[tokio::test]
    async fn test_idempotent_per_depot_no_duplicate_lookup() {
        let mut r = reconciler_with(
            vec![cart_item(100, 1, 1, 5000)],
            vec![variant(2, 100, 2, "500ml", 5500)],
        )
        .await;

        assert_eq!(r.validate_cart(2).await.unwrap(), ValidationOutcome::Revalidated);
        let snapshot: Vec<CartItem> = r.store().cart().items.clone();

        assert_eq!(
            r.validate_cart(2).await.unwrap(),
            ValidationOutcome::SkippedAlreadyValidated
        );
        assert_eq!(r.catalog.lookup_count(), 1);

        // Annotated cart is byte-for-byte stable across the suppressed call
        let again = serde_json::to_string(&r.store().cart().items).unwrap();
        assert_eq!(again, serde_json::to_string(&snapshot).unwrap());
    }

    #[tokio::test]
    async fn test_in_flight_pass_suppresses_new_calls() {
        let mut r = reconciler_with(
            vec![cart_item(100, 1, 1, 5000)],
            vec![variant(2, 100, 2, "500ml", 5500)],
        )
        .await;

        r.state = ValidationState::Validating { depot_id: 2 };
        assert_eq!(
            r.validate_cart(3).await.unwrap(),
            ValidationOutcome::SkippedInFlight
        );
        assert_eq!(r.catalog.lookup_count(), 0);
    }

    #[tokio::test]
    async fn test_invalidate_clears_done_but_not_inflight() {
        let mut r = reconciler_with(
            vec![cart_item(100, 1, 1, 5000)],
            vec![variant(2, 100, 2, "500ml", 5500)],
        )
        .await;

        r.validate_cart(2).await.unwrap();
        assert_eq!(r.state(), ValidationState::Done { depot_id: 2 });

        r.invalidate();
        assert_eq!(r.state(), ValidationState::Idle);

        // An in-flight pass keeps its slot: invalidating must not let its
        // eventual commit masquerade as a fresh pass.
        r.state = ValidationState::Validating { depot_id: 2 };
        r.invalidate();
        assert!(r.state.is_validating());
    }

    #[tokio::test]
    async fn test_catalog_failure_degrades_all_unavailable_then_retries() {
        let mut r = reconciler_with(
            vec![cart_item(100, 1, 1, 5000), cart_item(200, 7, 1, 2500)],
            vec![
                variant(2, 100, 2, "500ml", 5500),
                variant(8, 200, 2, "500ml", 2500),
            ],
        )
        .await;

        r.catalog.set_failing(true);
        assert_eq!(r.validate_cart(2).await.unwrap(), ValidationOutcome::Degraded);

        assert_eq!(r.store().cart().item_count(), 2);
        for item in &r.store().cart().items {
            assert_eq!(item.is_available, Some(false));
            assert_eq!(item.unavailable_reason.as_deref(), Some(REASON_UNCONFIRMED));
        }

        // Failure does not poison the depot: a retry re-runs and succeeds.
        r.catalog.set_failing(false);
        assert_eq!(r.validate_cart(2).await.unwrap(), ValidationOutcome::Revalidated);
        assert!(r.store().cart().items.iter().all(|i| i.is_available()));
    }

    #[tokio::test]
    async fn test_commit_failure_releases_slot_for_retry() {
        let (kv, fail) = FlakyKv::new();
        let mut store = CartStore::load(kv).await;
        store.add(cart_item(100, 1, 1, 5000)).await.unwrap();
        let mut r = CartReconciler::new(
            store,
            StaticCatalog::new(vec![variant(2, 100, 2, "500ml", 5500)]),
        );

        fail.store(true, Ordering::SeqCst);
        assert!(r.validate_cart(2).await.is_err());
        assert_eq!(r.state(), ValidationState::Idle);

        // The slot is free again: the retry runs instead of being suppressed.
        assert_eq!(r.validate_cart(2).await.unwrap(), ValidationOutcome::Revalidated);

        // Same on the degraded path: a failed degraded commit ends the pass.
        r.invalidate();
        r.catalog.set_failing(true);
        fail.store(true, Ordering::SeqCst);
        assert!(r.validate_cart(2).await.is_err());
        assert_eq!(r.state(), ValidationState::Idle);

        r.catalog.set_failing(false);
        assert_eq!(r.validate_cart(2).await.unwrap(), ValidationOutcome::Revalidated);
    }

    #[tokio::test]
    async fn test_empty_cart_skips_without_lookup() {
        let mut r = reconciler_with(vec![], vec![variant(2, 100, 2, "500ml", 5500)]).await;

        assert_eq!(
            r.validate_cart(2).await.unwrap(),
            ValidationOutcome::SkippedEmptyCart
        );
        assert_eq!(r.catalog.lookup_count(), 0);
    }

    #[tokio::test]
    async fn test_reconciliation_never_changes_item_count() {
        let mut r = reconciler_with(
            vec![
                cart_item(100, 1, 1, 5000),
                cart_item(200, 7, 1, 2500),
                cart_item(300, 9, 1, 1200),
            ],
            vec![variant(2, 100, 2, "500ml", 5500)], // only one product matches
        )
        .await;

        r.validate_cart(2).await.unwrap();
        assert_eq!(r.store().cart().item_count(), 3);
        assert_eq!(r.store().available_items().len(), 1);
        assert_eq!(r.store().unavailable_items().len(), 2);
    }

    #[tokio::test]
    async fn test_provenance_survives_two_switches() {
        let mut r = reconciler_with(
            vec![cart_item(100, 1, 1, 5000)],
            vec![
                variant(2, 100, 2, "500ml", 5500),
                variant(5, 100, 5, "500ml", 5200),
            ],
        )
        .await;

        r.validate_cart(2).await.unwrap();
        r.validate_cart(5).await.unwrap();

        let item = r.store().cart().find(5).expect("retargeted twice");
        assert_eq!(item.depot_id, 5);
        assert_eq!(item.price_paise, 5200);
        // Still the depot/variant of the very first add
        assert_eq!(item.original_depot_id, Some(1));
        assert_eq!(item.original_variant_id, Some(1));
    }

    #[tokio::test]
    async fn test_checkout_gate_after_degradation() {
        let mut r = reconciler_with(
            vec![cart_item(100, 1, 1, 5000)],
            vec![],
        )
        .await;
        r.catalog.set_failing(true);
        r.validate_cart(2).await.unwrap();

        // Checkout must refuse: nothing is confirmed available.
        assert!(!r.store().has_available_items());
        assert_eq!(r.store().available_subtotal_paise(), 0);
        assert_eq!(r.store().subtotal_paise(), 10000); // full display subtotal
    }
}
