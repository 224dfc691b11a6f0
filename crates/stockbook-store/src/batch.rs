//! Batch — lot traceability for products with expiry.
//!
//! A batch groups stock by production lot; quants reference it through
//! the coordinate's batch label (`Batch.code == Coordinate.batch`).
//! Enables per-lot expiry tracking, supplier traceability and recall
//! queries ("find all stock from lot X").

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use stockbook_core::ProductRef;

/// Production lot of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    /// Unique lot code, used as the quant coordinate's batch label.
    pub code: String,
    /// Product this lot belongs to.
    pub product: ProductRef,
    /// Date the lot was produced.
    pub production_date: NaiveDate,
    /// Per-lot expiry; `None` = governed only by product shelf life.
    pub expiry_date: Option<NaiveDate>,
    /// Supplier that delivered the lot, when externally sourced.
    pub supplier: Option<String>,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl Batch {
    pub fn new(
        code: impl Into<String>,
        product: ProductRef,
        production_date: NaiveDate,
    ) -> Self {
        Self {
            code: code.into(),
            product,
            production_date,
            expiry_date: None,
            supplier: None,
            created_at: Utc::now(),
        }
    }

    /// Set the lot expiry date.
    #[must_use]
    pub fn expiring(mut self, expiry_date: NaiveDate) -> Self {
        self.expiry_date = Some(expiry_date);
        self
    }

    /// Set the supplier label.
    #[must_use]
    pub fn from_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    /// Past its expiry date on the given day?
    pub fn is_expired(&self, on: NaiveDate) -> bool {
        match self.expiry_date {
            Some(expiry) => expiry < on,
            None => false,
        }
    }
}
