//! Quant — cached balance at a space-time coordinate.

use crate::coordinate::Coordinate;
use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::{Mutex, MutexGuard};
use stockbook_core::{PositionCode, ProductRef, Qty, QuantId};

/// Cached balance of a product at a coordinate.
///
/// The balance is a cache kept consistent with the move ledger: it is
/// only ever changed together with a `Move` append, while this
/// record's lock is held (see `StockStore::apply_move`). Reading the
/// balance is O(1); `recalculate` re-derives it from the ledger for
/// audit/repair.
///
/// Quants are created lazily on first movement against a new
/// coordinate and never deleted — moves and holds keep referencing
/// them.
#[derive(Debug)]
pub struct Quant {
    /// Record id.
    pub id: QuantId,
    /// Product reference.
    pub product: ProductRef,
    /// WHERE — optional position.
    pub position: Option<PositionCode>,
    /// WHEN — `None` = physical stock, date = planned production.
    pub target_date: Option<NaiveDate>,
    /// Lot label, empty when untracked.
    pub batch: String,
    /// Creation timestamp; also the production date proxy for
    /// physical stock in shelf-life checks.
    pub created_at: DateTime<Utc>,

    /// Cached balance, behind the record's row lock.
    balance: Mutex<Qty>,
}

impl Quant {
    pub(crate) fn new(id: QuantId, coordinate: Coordinate) -> Self {
        Self {
            id,
            product: coordinate.product,
            position: coordinate.position,
            target_date: coordinate.target_date,
            batch: coordinate.batch,
            created_at: Utc::now(),
            balance: Mutex::new(Qty::ZERO),
        }
    }

    /// Current cached balance (momentary read under a short lock).
    #[must_use]
    pub fn balance(&self) -> Qty {
        *self.balance.lock()
    }

    /// Acquire the exclusive row lock on this quant's balance.
    ///
    /// Every availability-sensitive mutation holds this guard across
    /// its whole read-check-write path.
    pub fn lock_balance(&self) -> MutexGuard<'_, Qty> {
        self.balance.lock()
    }

    /// The coordinate tuple this quant caches.
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(
            self.product.clone(),
            self.position.clone(),
            self.target_date,
            self.batch.clone(),
        )
    }

    /// Planned production (any target date set)?
    pub fn is_planned(&self) -> bool {
        self.target_date.is_some()
    }

    /// Planned production that is still in the future?
    pub fn is_future(&self, today: NaiveDate) -> bool {
        match self.target_date {
            Some(d) => d > today,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> Quant {
        Quant::new(
            QuantId(1),
            Coordinate::physical(ProductRef::new("sku", 1), Some("vitrine".into())),
        )
    }

    #[test]
    fn test_new_quant_starts_empty() {
        let q = sample();
        assert_eq!(q.balance(), Qty::ZERO);
        assert!(!q.is_planned());
    }

    #[test]
    fn test_balance_mutation_under_lock() {
        let q = sample();
        {
            let mut guard = q.lock_balance();
            *guard += Qty::new(dec!(12.5));
        }
        assert_eq!(q.balance(), Qty::new(dec!(12.5)));
    }

    #[test]
    fn test_is_future() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
        let mut q = sample();
        assert!(!q.is_future(today));
        q.target_date = Some(today + chrono::Days::new(3));
        assert!(q.is_future(today));
        q.target_date = Some(today);
        assert!(!q.is_future(today));
    }
}
