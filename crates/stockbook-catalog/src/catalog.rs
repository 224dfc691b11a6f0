//! Product attribute resolution.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use stockbook_core::{AvailabilityPolicy, ProductRef};

/// The two attributes the engine needs per product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductTraits {
    /// Days a unit remains valid after production; `None` = no
    /// expiration (e.g. wine). `Some(0)` = only valid on production
    /// day (e.g. croissant).
    pub shelf_life_days: Option<u32>,
    /// What stock a hold may bind to.
    pub availability_policy: AvailabilityPolicy,
}

/// Resolver for externally-owned product attributes.
///
/// Implementations must fall back to defaults (no shelf life,
/// `PlannedOk`) for unknown products rather than erroring: the engine
/// treats the product reference as opaque and always gets an answer.
pub trait ProductCatalog: Send + Sync {
    /// Shelf life in days, `None` = never expires.
    fn shelf_life_days(&self, product: &ProductRef) -> Option<u32>;

    /// Availability policy, defaulting to `PlannedOk`.
    fn availability_policy(&self, product: &ProductRef) -> AvailabilityPolicy;
}

/// Catalog answering defaults for every product. Suitable for tests
/// and deployments without perishables.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCatalog;

impl ProductCatalog for DefaultCatalog {
    fn shelf_life_days(&self, _product: &ProductRef) -> Option<u32> {
        None
    }

    fn availability_policy(&self, _product: &ProductRef) -> AvailabilityPolicy {
        AvailabilityPolicy::default()
    }
}

/// Catalog backed by an in-memory table, populated at startup.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    entries: DashMap<ProductRef, ProductTraits>,
}

impl StaticCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a product's traits.
    pub fn insert(&self, product: ProductRef, traits: ProductTraits) {
        self.entries.insert(product, traits);
    }

    /// Convenience: register with explicit shelf life and policy.
    pub fn register(
        &self,
        product: ProductRef,
        shelf_life_days: Option<u32>,
        availability_policy: AvailabilityPolicy,
    ) {
        self.insert(
            product,
            ProductTraits {
                shelf_life_days,
                availability_policy,
            },
        );
    }
}

impl ProductCatalog for StaticCatalog {
    fn shelf_life_days(&self, product: &ProductRef) -> Option<u32> {
        self.entries.get(product).and_then(|t| t.shelf_life_days)
    }

    fn availability_policy(&self, product: &ProductRef) -> AvailabilityPolicy {
        self.entries
            .get(product)
            .map(|t| t.availability_policy)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_answers_defaults() {
        let catalog = DefaultCatalog;
        let p = ProductRef::new("sku", 1);
        assert_eq!(catalog.shelf_life_days(&p), None);
        assert_eq!(catalog.availability_policy(&p), AvailabilityPolicy::PlannedOk);
    }

    #[test]
    fn test_static_catalog_lookup_and_fallback() {
        let catalog = StaticCatalog::new();
        let croissant = ProductRef::new("sku", 1);
        catalog.register(croissant.clone(), Some(0), AvailabilityPolicy::DemandOk);

        assert_eq!(catalog.shelf_life_days(&croissant), Some(0));
        assert_eq!(
            catalog.availability_policy(&croissant),
            AvailabilityPolicy::DemandOk
        );

        // Unknown products fall back to defaults, never error.
        let unknown = ProductRef::new("sku", 999);
        assert_eq!(catalog.shelf_life_days(&unknown), None);
        assert_eq!(
            catalog.availability_policy(&unknown),
            AvailabilityPolicy::PlannedOk
        );
    }
}
