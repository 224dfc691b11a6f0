//! SKU validation boundary.
//!
//! Defined here, implemented by whatever catalog service surrounds the
//! engine. `NoopSkuValidator` is the permissive stub for development,
//! tests and deployments without a catalog — it accepts any SKU and
//! must not be used where real validation matters.

use serde::Serialize;
use std::collections::HashMap;

/// Result of validating one SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkuValidation {
    pub sku: String,
    pub valid: bool,
    pub is_active: bool,
    /// Machine-readable rejection code ("not_found", "inactive", ...).
    pub error_code: Option<String>,
}

impl SkuValidation {
    /// An accepted, active SKU.
    #[must_use]
    pub fn accepted(sku: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            valid: true,
            is_active: true,
            error_code: None,
        }
    }

    /// A rejected SKU with a machine-readable code.
    #[must_use]
    pub fn rejected(sku: impl Into<String>, error_code: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            valid: false,
            is_active: false,
            error_code: Some(error_code.into()),
        }
    }
}

/// Catalog-side SKU validation.
pub trait SkuValidator: Send + Sync {
    /// Validate a single SKU.
    fn validate_sku(&self, sku: &str) -> SkuValidation;

    /// Validate several SKUs at once. The default implementation just
    /// loops; backends with a batch endpoint should override.
    fn validate_skus(&self, skus: &[&str]) -> HashMap<String, SkuValidation> {
        skus.iter()
            .map(|sku| (sku.to_string(), self.validate_sku(sku)))
            .collect()
    }
}

/// No-operation validator: every SKU is valid and active.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSkuValidator;

impl SkuValidator for NoopSkuValidator {
    fn validate_sku(&self, sku: &str) -> SkuValidation {
        SkuValidation::accepted(sku)
    }
}
