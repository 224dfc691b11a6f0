//! Production planning — plan, replan, realize.
//!
//! Planned stock lives on date-coordinate quants (`target_date` set).
//! Realizing moves the actual quantity onto a physical quant and
//! carries in-flight holds across.

use std::sync::Arc;

use chrono::NaiveDate;
use stockbook_core::{PositionCode, ProductRef, Qty, StockError, StockResult};
use stockbook_store::{Coordinate, Quant};
use stockbook_telemetry::Metrics;
use tracing::info;

use crate::engine::Stock;

impl Stock {
    /// Plan future production: a receive at the date coordinate.
    pub fn plan(
        &self,
        quantity: Qty,
        product: ProductRef,
        target_date: NaiveDate,
        reference: Option<String>,
    ) -> StockResult<Arc<Quant>> {
        self.receive(
            quantity,
            Coordinate::planned(product, target_date),
            "planned production",
            reference,
        )
    }

    /// Adjust an existing plan to a new total quantity.
    ///
    /// Fails `QuantNotFound` when nothing was ever planned for the
    /// date.
    pub fn replan(
        &self,
        quantity: Qty,
        product: ProductRef,
        target_date: NaiveDate,
        reason: &str,
    ) -> StockResult<Arc<Quant>> {
        let quant = self
            .get_quant(&product, None, Some(target_date), "")
            .ok_or_else(|| StockError::QuantNotFound {
                product: product.clone(),
                target_date,
            })?;
        self.adjust(&quant, quantity, reason)?;
        Ok(quant)
    }

    /// Realize planned production: planned -> physical.
    ///
    /// Under the planned quant's lock: reconcile the balance to
    /// `actual_quantity` if it drifted, move `actual_quantity` off
    /// the planned quant and onto the physical quant at
    /// `to_position`, then re-point every still-active hold from the
    /// planned quant to the physical one, so in-flight reservations
    /// survive the transition.
    ///
    /// Returns the physical quant. Fails `QuantNotFound` when no plan
    /// exists for the date.
    pub fn realize(
        &self,
        product: ProductRef,
        target_date: NaiveDate,
        actual_quantity: Qty,
        to_position: PositionCode,
        reason: &str,
    ) -> StockResult<Arc<Quant>> {
        let planned = self
            .get_quant(&product, None, Some(target_date), "")
            .ok_or_else(|| StockError::QuantNotFound {
                product: product.clone(),
                target_date,
            })?;

        let physical = self
            .store()
            .get_or_create_quant(&Coordinate::physical(product.clone(), Some(to_position.clone())));

        {
            // Planned quant locks before physical (distinct records:
            // one has a target date, the other never does).
            let mut planned_balance = planned.lock_balance();

            if *planned_balance != actual_quantity {
                let adjustment = actual_quantity - *planned_balance;
                self.store().apply_move(
                    &mut planned_balance,
                    planned.id,
                    adjustment,
                    format!("production adjustment: {reason}"),
                    None,
                    None,
                );
            }

            self.store().apply_move(
                &mut planned_balance,
                planned.id,
                -actual_quantity,
                format!("transfer: {reason}"),
                None,
                None,
            );
            {
                let mut physical_balance = physical.lock_balance();
                self.store().apply_move(
                    &mut physical_balance,
                    physical.id,
                    actual_quantity,
                    format!("received from production: {reason}"),
                    None,
                    None,
                );
            }

            // Carry in-flight reservations across while the planned
            // quant is still locked, so no hold can bind to it in
            // between.
            for hold in self.store().active_holds_on_quant(planned.id) {
                let mut state = hold.state();
                if state.quant == Some(planned.id) && state.status.is_active() {
                    state.quant = Some(physical.id);
                }
            }
        }

        info!(
            product = %product,
            target = %target_date,
            actual_qty = %actual_quantity,
            to_position = %to_position,
            "stock.realize"
        );
        Metrics::move_recorded("in", "realize");
        Ok(physical)
    }
}
