//! StockAlert — configurable minimum-stock trigger per product.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use stockbook_core::{PositionCode, ProductRef, Qty};

/// Alert record id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AlertId(pub u64);

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "alert:{}", self.0)
    }
}

/// Minimum-stock alert for a product, optionally scoped to one
/// position (`None` = all positions combined).
///
/// Triggered when physical availability drops below `min_quantity`;
/// see the engine's `check_alerts`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockAlert {
    pub id: AlertId,
    pub product: ProductRef,
    pub position: Option<PositionCode>,
    pub min_quantity: Qty,
    pub is_active: bool,
    pub last_triggered_at: Option<DateTime<Utc>>,
}

impl StockAlert {
    pub(crate) fn new(
        id: AlertId,
        product: ProductRef,
        position: Option<PositionCode>,
        min_quantity: Qty,
    ) -> Self {
        Self {
            id,
            product,
            position,
            min_quantity,
            is_active: true,
            last_triggered_at: None,
        }
    }
}
