//! # Revalidation Triggers
//!
//! The host feeds lifecycle events through one funnel instead of calling
//! the reconciler from scattered call sites. Depot-bearing triggers target
//! that depot directly; connectivity and timer triggers re-validate against
//! the last depot a pass ever targeted, after dropping the `Done` marker so
//! the pass actually runs.

use tracing::debug;

use freshcart_store::error::StoreResult;
use freshcart_store::kv::KeyValue;

use crate::catalog::VariantCatalog;
use crate::reconciler::{CartReconciler, ValidationOutcome};

/// A lifecycle event that may require the cart to be re-validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevalidateTrigger {
    /// The shopper selected a different depot (pincode change, store pick).
    DepotChanged(i64),

    /// App start with a remembered depot; annotates the restored cart.
    InitialLoad(i64),

    /// Connectivity regained; the last annotation may be stale.
    CameOnline,

    /// The storefront tab became visible again.
    TabVisible,

    /// Periodic price-refresh timer fired.
    PriceRefreshTick,
}

impl RevalidateTrigger {
    /// The depot this trigger carries, if any.
    pub fn depot_id(&self) -> Option<i64> {
        match self {
            RevalidateTrigger::DepotChanged(id) | RevalidateTrigger::InitialLoad(id) => Some(*id),
            _ => None,
        }
    }
}

impl<K: KeyValue, C: VariantCatalog> CartReconciler<K, C> {
    /// Routes a lifecycle event to a validation pass.
    ///
    /// Depot-bearing triggers run against their depot (idempotence still
    /// applies: `InitialLoad` for an already-validated depot is a no-op).
    /// Depot-less triggers invalidate the `Done` marker and re-run against
    /// the last targeted depot, or skip when none exists yet.
    pub async fn on_trigger(&mut self, trigger: RevalidateTrigger) -> StoreResult<ValidationOutcome> {
        debug!(?trigger, "Revalidation trigger");
        match trigger.depot_id() {
            Some(depot_id) => self.validate_cart(depot_id).await,
            None => match self.last_depot() {
                Some(depot_id) => {
                    self.invalidate();
                    self.validate_cart(depot_id).await
                }
                None => Ok(ValidationOutcome::SkippedNoDepot),
            },
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use chrono::Utc;
    use freshcart_core::types::{CartItem, Depot, DepotVariant};
    use freshcart_store::{CartStore, MemoryKv};

    fn variant(id: i64, product_id: i64, depot_id: i64, price: i64) -> DepotVariant {
        DepotVariant {
            id,
            product_id,
            depot_id,
            unit: "500ml".to_string(),
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

    fn item(product_id: i64, variant_id: i64) -> CartItem {
        CartItem {
            product_id,
            variant_id,
            name: format!("Product {product_id}"),
            variant_name: "500ml".to_string(),
            price_paise: 5000,
            quantity: 1,
            image_url: None,
            depot_id: 1,
            original_depot_id: Some(1),
            original_variant_id: Some(variant_id),
            is_available: None,
            unavailable_reason: None,
            added_at: Utc::now(),
        }
    }

    async fn reconciler() -> CartReconciler<MemoryKv, StaticCatalog> {
        let mut store = CartStore::load(MemoryKv::new()).await;
        store.add(item(100, 1)).await.unwrap();
        CartReconciler::new(
            store,
            StaticCatalog::new(vec![variant(2, 100, 2, 5500)]),
        )
    }

    #[tokio::test]
    async fn test_depot_triggers_validate_that_depot() {
        let mut r = reconciler().await;

        let outcome = r.on_trigger(RevalidateTrigger::DepotChanged(2)).await.unwrap();
        assert_eq!(outcome, ValidationOutcome::Revalidated);
        assert_eq!(r.last_depot(), Some(2));

        // InitialLoad for the same depot rides the idempotence guard
        let outcome = r.on_trigger(RevalidateTrigger::InitialLoad(2)).await.unwrap();
        assert_eq!(outcome, ValidationOutcome::SkippedAlreadyValidated);
    }

    #[tokio::test]
    async fn test_came_online_rechecks_last_depot() {
        let mut r = reconciler().await;
        r.on_trigger(RevalidateTrigger::DepotChanged(2)).await.unwrap();

        // A plain revalidation would be suppressed as already-done; the
        // connectivity trigger forces a fresh pass.
        let outcome = r.on_trigger(RevalidateTrigger::CameOnline).await.unwrap();
        assert_eq!(outcome, ValidationOutcome::Revalidated);
    }

    #[tokio::test]
    async fn test_timer_and_visibility_refresh_prices() {
        let mut r = reconciler().await;
        r.on_trigger(RevalidateTrigger::DepotChanged(2)).await.unwrap();

        for trigger in [RevalidateTrigger::PriceRefreshTick, RevalidateTrigger::TabVisible] {
            assert_eq!(r.on_trigger(trigger).await.unwrap(), ValidationOutcome::Revalidated);
        }
    }

    #[tokio::test]
    async fn test_depotless_trigger_before_any_selection_is_noop() {
        let mut r = reconciler().await;

        let outcome = r.on_trigger(RevalidateTrigger::CameOnline).await.unwrap();
        assert_eq!(outcome, ValidationOutcome::SkippedNoDepot);
    }
}
