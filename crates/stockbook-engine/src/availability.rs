//! Availability queries — read-only, no locking.
//!
//! `available` is the engine's central number: eligible balances
//! minus live held quantity. A hold whose `expires_at` has passed is
//! excluded here the moment it passes, whatever its persisted status,
//! so sweep latency never distorts availability.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use stockbook_core::{PositionCode, ProductRef, Qty};
use stockbook_store::{Coordinate, Quant};

use crate::engine::Stock;
use crate::shelflife::quant_in_window;

/// Filters for `list_quants`.
#[derive(Debug, Clone, Default)]
pub struct QuantFilter {
    pub product: Option<ProductRef>,
    pub position: Option<PositionCode>,
    /// Include planned quants dated after today.
    pub include_future: bool,
    /// Include quants with zero or negative balance.
    pub include_empty: bool,
}

impl QuantFilter {
    #[must_use]
    pub fn all() -> Self {
        Self {
            include_future: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn for_product(product: ProductRef) -> Self {
        Self {
            product: Some(product),
            include_future: true,
            ..Default::default()
        }
    }
}

impl Stock {
    /// Available quantity for sale/hold:
    /// `sum(eligible quant balances) - live held quantity`.
    ///
    /// `target` defaults to today; `position` narrows both sides of
    /// the subtraction to one location (demand holds, having no
    /// quant, then drop out of the held side).
    #[must_use]
    pub fn available(
        &self,
        product: &ProductRef,
        target: Option<NaiveDate>,
        position: Option<&PositionCode>,
    ) -> Qty {
        let target = target.unwrap_or_else(|| Utc::now().date_naive());
        let shelf_life = self.catalog().shelf_life_days(product);

        let mut raw_total = Qty::ZERO;
        for quant in self.store().quants_for_product(product) {
            if let Some(pos) = position {
                if quant.position.as_ref() != Some(pos) {
                    continue;
                }
            }
            if quant_in_window(&quant, shelf_life, target) {
                raw_total += quant.balance();
            }
        }

        raw_total - self.held_total(product, target, position, Utc::now())
    }

    /// Total quantity committed (active, non-expired holds) for a
    /// product and date.
    #[must_use]
    pub fn committed(&self, product: &ProductRef, target: Option<NaiveDate>) -> Qty {
        let target = target.unwrap_or_else(|| Utc::now().date_naive());
        self.held_total(product, target, None, Utc::now())
    }

    /// Unmet demand: active holds with no linked quant.
    #[must_use]
    pub fn demand(&self, product: &ProductRef, target: NaiveDate) -> Qty {
        let now = Utc::now();
        let mut total = Qty::ZERO;
        for hold in self.store().holds_for_product(product) {
            if hold.target_date != target || !hold.is_active(now) {
                continue;
            }
            if hold.state().quant.is_none() {
                total += hold.quantity;
            }
        }
        total
    }

    /// Quant lookup by exact coordinate. `None` when no movement has
    /// ever touched it.
    #[must_use]
    pub fn get_quant(
        &self,
        product: &ProductRef,
        position: Option<PositionCode>,
        target_date: Option<NaiveDate>,
        batch: &str,
    ) -> Option<Arc<Quant>> {
        self.store().find_quant(&Coordinate::new(
            product.clone(),
            position,
            target_date,
            batch,
        ))
    }

    /// List quants matching a filter, oldest first.
    #[must_use]
    pub fn list_quants(&self, filter: &QuantFilter) -> Vec<Arc<Quant>> {
        let today = Utc::now().date_naive();
        let mut quants: Vec<Arc<Quant>> = match &filter.product {
            Some(product) => self.store().quants_for_product(product),
            None => self.store().all_quants(),
        };

        quants.retain(|q| {
            if let Some(pos) = &filter.position {
                if q.position.as_ref() != Some(pos) {
                    return false;
                }
            }
            if !filter.include_future && q.is_future(today) {
                return false;
            }
            if !filter.include_empty && !q.balance().is_positive() {
                return false;
            }
            true
        });
        quants.sort_by_key(|q| q.created_at);
        quants
    }

    /// Live held quantity for a product at a date: PENDING/CONFIRMED
    /// holds, expiry checked against `now`. With a position filter,
    /// only holds bound to a quant at that position count.
    pub(crate) fn held_total(
        &self,
        product: &ProductRef,
        target: NaiveDate,
        position: Option<&PositionCode>,
        now: DateTime<Utc>,
    ) -> Qty {
        let mut total = Qty::ZERO;
        for hold in self.store().holds_for_product(product) {
            if hold.target_date != target || hold.is_expired(now) {
                continue;
            }
            let state = hold.state();
            if !state.status.is_active() {
                continue;
            }
            if let Some(pos) = position {
                let at_position = state
                    .quant
                    .and_then(|id| self.store().quant(id))
                    .map(|q| q.position.as_ref() == Some(pos))
                    .unwrap_or(false);
                if !at_position {
                    continue;
                }
            }
            total += hold.quantity;
        }
        total
    }
}
