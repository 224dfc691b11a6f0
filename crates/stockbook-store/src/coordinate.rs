//! Space-time coordinate of a balance record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use stockbook_core::{PositionCode, ProductRef};

/// Coordinate identifying at most one `Quant`.
///
/// - `position`: WHERE (space) — `None` means unspecified.
/// - `target_date`: WHEN (time) — `None` means physical,
///   already-produced stock; a date means planned production.
/// - `batch`: lot label, empty when untracked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub product: ProductRef,
    pub position: Option<PositionCode>,
    pub target_date: Option<NaiveDate>,
    pub batch: String,
}

impl Coordinate {
    pub fn new(
        product: ProductRef,
        position: Option<PositionCode>,
        target_date: Option<NaiveDate>,
        batch: impl Into<String>,
    ) -> Self {
        Self {
            product,
            position,
            target_date,
            batch: batch.into(),
        }
    }

    /// Physical stock at a position (no target date, no batch).
    pub fn physical(product: ProductRef, position: Option<PositionCode>) -> Self {
        Self::new(product, position, None, "")
    }

    /// Planned production for a date (no position, no batch).
    pub fn planned(product: ProductRef, target_date: NaiveDate) -> Self {
        Self::new(product, None, Some(target_date), "")
    }

    /// Same coordinate with a batch label.
    #[must_use]
    pub fn with_batch(mut self, batch: impl Into<String>) -> Self {
        self.batch = batch.into();
        self
    }

    /// Planned (future-dated) coordinate?
    pub fn is_planned(&self) -> bool {
        self.target_date.is_some()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pos = self
            .position
            .as_ref()
            .map(|p| p.as_str())
            .unwrap_or("?");
        write!(f, "{} [{}", self.product, pos)?;
        if let Some(d) = self.target_date {
            write!(f, "@{d}")?;
        }
        if !self.batch.is_empty() {
            write!(f, "#{}", self.batch)?;
        }
        write!(f, "]")
    }
}
