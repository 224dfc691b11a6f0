//! Product references and availability policy.
//!
//! The engine is catalog-agnostic: a product is an opaque tagged
//! reference (kind + id) compared only by equality. Shelf life and
//! availability policy are resolved through an injected catalog
//! (see the `stockbook-catalog` crate), never by inspecting the
//! product itself.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to a product in an external catalog.
///
/// `kind` names the catalog model (e.g. "sku", "offer"), `id` is the
/// record identifier within that model. Used as a map key throughout
/// the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductRef {
    /// Catalog model tag.
    pub kind: String,
    /// Record id within the catalog model.
    pub id: u64,
}

impl ProductRef {
    pub fn new(kind: impl Into<String>, id: u64) -> Self {
        Self {
            kind: kind.into(),
            id,
        }
    }

    /// Canonical string token (`kind:id`), used for SKU validation
    /// and log context.
    #[must_use]
    pub fn token(&self) -> String {
        format!("{}:{}", self.kind, self.id)
    }
}

impl fmt::Display for ProductRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Policy governing what a hold may bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityPolicy {
    /// Holds only against physical (already-produced) stock.
    StockOnly,
    /// Holds against physical or planned stock.
    #[default]
    PlannedOk,
    /// Always accepts holds; unbacked requests become demand holds.
    DemandOk,
}

impl AvailabilityPolicy {
    /// Whether an unbacked request may be recorded as demand.
    pub fn allows_demand(&self) -> bool {
        matches!(self, Self::DemandOk)
    }
}

impl fmt::Display for AvailabilityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StockOnly => write!(f, "stock_only"),
            Self::PlannedOk => write!(f, "planned_ok"),
            Self::DemandOk => write!(f, "demand_ok"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_ref_token() {
        let p = ProductRef::new("sku", 42);
        assert_eq!(p.token(), "sku:42");
        assert_eq!(p.to_string(), "sku:42");
    }

    #[test]
    fn test_product_ref_equality() {
        assert_eq!(ProductRef::new("sku", 1), ProductRef::new("sku", 1));
        assert_ne!(ProductRef::new("sku", 1), ProductRef::new("offer", 1));
        assert_ne!(ProductRef::new("sku", 1), ProductRef::new("sku", 2));
    }

    #[test]
    fn test_policy_default_and_demand() {
        assert_eq!(AvailabilityPolicy::default(), AvailabilityPolicy::PlannedOk);
        assert!(AvailabilityPolicy::DemandOk.allows_demand());
        assert!(!AvailabilityPolicy::PlannedOk.allows_demand());
    }

    #[test]
    fn test_policy_serde_names() {
        let p: AvailabilityPolicy = serde_json::from_str("\"demand_ok\"").unwrap();
        assert_eq!(p, AvailabilityPolicy::DemandOk);
        assert_eq!(
            serde_json::to_string(&AvailabilityPolicy::StockOnly).unwrap(),
            "\"stock_only\""
        );
    }
}
