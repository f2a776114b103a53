//! # Catalog Capability Traits
//!
//! The engine's external boundary. Implementations (an HTTP client against
//! the catalog/pricing service) live outside this workspace; the engine only
//! ever sees these traits, which is what makes every reconciliation path
//! testable with the in-memory [`StaticCatalog`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use freshcart_core::types::{DeliveryContext, DepotVariant};
use freshcart_core::validation::validate_pincode;

use crate::error::{CatalogError, CatalogResult};

// =============================================================================
// Traits
// =============================================================================

/// Read access to depot-scoped product variants.
///
/// Any failure (network, 4xx/5xx, timeout) surfaces as an `Err`, never as a
/// panic; the reconciler converts it into an all-unavailable annotation.
#[allow(async_fn_in_trait)]
pub trait VariantCatalog: Send + Sync {
    /// Variants of one product within one depot.
    async fn variants_for_product(
        &self,
        product_id: i64,
        depot_id: i64,
    ) -> CatalogResult<Vec<DepotVariant>>;

    /// Every variant a depot carries. One call serves a whole
    /// reconciliation pass.
    async fn variants_for_depot(&self, depot_id: i64) -> CatalogResult<Vec<DepotVariant>>;
}

/// Pincode → depot/delivery-context resolution.
#[allow(async_fn_in_trait)]
pub trait DepotResolver: Send + Sync {
    /// Resolves the serving depot for a pincode. `None` means "no service
    /// here" and must be treated as "no matching variants", not an error.
    async fn resolve_depot_for_pincode(
        &self,
        pincode: &str,
    ) -> CatalogResult<Option<DeliveryContext>>;
}

/// Resolves the service area for a raw pincode string.
///
/// A syntactically invalid pincode can't possibly be served, so it resolves
/// to "no service" locally without spending a network round trip.
pub async fn resolve_service_area<R: DepotResolver>(
    resolver: &R,
    pincode: &str,
) -> CatalogResult<Option<DeliveryContext>> {
    let Ok(pincode) = validate_pincode(pincode) else {
        return Ok(None);
    };
    resolver.resolve_depot_for_pincode(&pincode).await
}

// =============================================================================
// Static Catalog (test double / offline demos)
// =============================================================================

/// In-memory catalog implementing both capability traits.
///
/// Used by the engine's own tests; hosts can also seed one for offline
/// demos. Counts lookups and can be switched into a failing mode so tests
/// can assert suppression and degradation behavior.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    variants: Vec<DepotVariant>,
    contexts: HashMap<String, DeliveryContext>,
    failing: AtomicBool,
    lookups: AtomicUsize,
}

impl StaticCatalog {
    /// Creates a catalog over a fixed variant list.
    pub fn new(variants: Vec<DepotVariant>) -> Self {
        StaticCatalog {
            variants,
            ..StaticCatalog::default()
        }
    }

    /// Registers a pincode → delivery-context mapping.
    pub fn with_context(mut self, pincode: &str, context: DeliveryContext) -> Self {
        self.contexts.insert(pincode.to_string(), context);
        self
    }

    /// Makes every subsequent lookup fail with a network error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of lookups issued so far (suppression assertions).
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn check(&self) -> CatalogResult<()> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            Err(CatalogError::Network("static catalog set to fail".into()))
        } else {
            Ok(())
        }
    }
}

impl VariantCatalog for StaticCatalog {
    async fn variants_for_product(
        &self,
        product_id: i64,
        depot_id: i64,
    ) -> CatalogResult<Vec<DepotVariant>> {
        self.check()?;
        Ok(self
            .variants
            .iter()
            .filter(|v| v.product_id == product_id && v.depot_id == depot_id)
            .cloned()
            .collect())
    }

    async fn variants_for_depot(&self, depot_id: i64) -> CatalogResult<Vec<DepotVariant>> {
        self.check()?;
        Ok(self
            .variants
            .iter()
            .filter(|v| v.depot_id == depot_id)
            .cloned()
            .collect())
    }
}

impl DepotResolver for StaticCatalog {
    async fn resolve_depot_for_pincode(
        &self,
        pincode: &str,
    ) -> CatalogResult<Option<DeliveryContext>> {
        self.check()?;
        Ok(self.contexts.get(pincode).cloned())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
