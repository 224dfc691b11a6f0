//! Ledger operations — receive, issue, adjust, recalculate, reverse.
//!
//! Every mutation appends a `Move` and updates the quant's cached
//! balance in one step, under that quant's balance lock.

use std::sync::Arc;

use chrono::Utc;
use stockbook_core::{MoveId, Qty, StockError, StockResult};
use stockbook_store::{Coordinate, Move, Quant};
use stockbook_telemetry::Metrics;
use tracing::{info, warn};

use crate::engine::Stock;

impl Stock {
    /// Stock entry: creates the quant at `coordinate` if absent and
    /// appends a positive move.
    ///
    /// Fails `InvalidQuantity` when `quantity <= 0` and `InvalidSku`
    /// when input validation is enabled and the product's token is
    /// rejected.
    pub fn receive(
        &self,
        quantity: Qty,
        coordinate: Coordinate,
        reason: impl Into<String>,
        reference: Option<String>,
    ) -> StockResult<Arc<Quant>> {
        if !quantity.is_positive() {
            return Err(StockError::InvalidQuantity {
                requested: quantity,
            });
        }
        self.validate_sku(&coordinate.product.token())?;

        let reason = reason.into();
        let quant = self.store().get_or_create_quant(&coordinate);
        {
            let mut balance = quant.lock_balance();
            self.store()
                .apply_move(&mut balance, quant.id, quantity, reason.clone(), reference, None);
        }

        info!(
            product = %coordinate.product,
            qty = %quantity,
            quant_id = quant.id.0,
            %reason,
            "stock.receive"
        );
        Metrics::move_recorded("in", &reason);
        Metrics::quant_count(self.store().quant_count());
        Ok(quant)
    }

    /// Stock exit from one quant.
    ///
    /// The balance lock is held across the availability check and the
    /// move append, so a concurrent hold or issue cannot slip in
    /// between. Fails `InsufficientQuantity` when the quant's live
    /// available amount (balance minus its active holds) is short.
    pub fn issue(
        &self,
        quantity: Qty,
        quant: &Quant,
        reason: impl Into<String>,
        reference: Option<String>,
    ) -> StockResult<Arc<Move>> {
        if !quantity.is_positive() {
            return Err(StockError::InvalidQuantity {
                requested: quantity,
            });
        }

        let reason = reason.into();
        let mv = {
            let mut balance = quant.lock_balance();
            let available = *balance - self.store().held_for_quant(quant.id, Utc::now());
            if available < quantity {
                return Err(StockError::InsufficientQuantity {
                    available,
                    requested: quantity,
                });
            }
            self.store()
                .apply_move(&mut balance, quant.id, -quantity, reason.clone(), reference, None)
        };

        info!(quant_id = quant.id.0, qty = %quantity, %reason, "stock.issue");
        Metrics::move_recorded("out", &reason);
        Ok(mv)
    }

    /// Inventory adjustment: set the balance to `new_balance`,
    /// appending the delta move. Returns `None` when the balance
    /// already matches (no write).
    pub fn adjust(
        &self,
        quant: &Quant,
        new_balance: Qty,
        reason: &str,
    ) -> StockResult<Option<Arc<Move>>> {
        if reason.is_empty() {
            return Err(StockError::ReasonRequired);
        }

        let mv = {
            let mut balance = quant.lock_balance();
            let delta = new_balance - *balance;
            if delta.is_zero() {
                return Ok(None);
            }
            self.store().apply_move(
                &mut balance,
                quant.id,
                delta,
                format!("adjustment: {reason}"),
                None,
                None,
            )
        };

        info!(quant_id = quant.id.0, delta = %mv.delta, reason, "stock.adjust");
        Metrics::move_recorded(
            if mv.delta.is_positive() { "in" } else { "out" },
            "adjustment",
        );
        Ok(Some(mv))
    }

    /// Re-derive the cached balance from the ledger. Disagreement is
    /// logged and the cache overwritten. Audit/repair path, not hot.
    pub fn recalculate(&self, quant: &Quant) -> Qty {
        let mut balance = quant.lock_balance();
        let calculated: Qty = self
            .store()
            .moves_for_quant(quant.id)
            .iter()
            .map(|m| m.delta)
            .sum();

        let cached = *balance;
        if calculated != cached {
            warn!(
                quant_id = quant.id.0,
                old = %cached,
                new = %calculated,
                diff = %(calculated - cached),
                "stock.recalculate.discrepancy"
            );
            *balance = calculated;
        }
        calculated
    }

    /// Correct a past move by appending its inverse. Moves themselves
    /// are immutable; this is the only sanctioned correction path.
    pub fn reverse(
        &self,
        move_id: MoveId,
        reason: &str,
    ) -> StockResult<Arc<Move>> {
        if reason.is_empty() {
            return Err(StockError::ReasonRequired);
        }
        let original = self
            .store()
            .find_move(move_id)
            .ok_or(StockError::ImmutableRecord { move_id })?;
        let quant = self
            .store()
            .quant(original.quant)
            .ok_or(StockError::ImmutableRecord { move_id })?;

        let mv = {
            let mut balance = quant.lock_balance();
            self.store().apply_move(
                &mut balance,
                quant.id,
                -original.delta,
                format!("reversal of move:{}: {reason}", move_id.0),
                original.reference.clone(),
                None,
            )
        };

        info!(quant_id = quant.id.0, reversed = move_id.0, reason, "stock.reverse");
        Metrics::move_recorded(
            if mv.delta.is_positive() { "in" } else { "out" },
            "reversal",
        );
        Ok(mv)
    }

    pub(crate) fn validate_sku(&self, sku: &str) -> StockResult<()> {
        if !self.settings().validate_input_skus {
            return Ok(());
        }
        let validation = self.skus().validate_sku(sku);
        if validation.valid && validation.is_active {
            Ok(())
        } else {
            Err(StockError::InvalidSku {
                sku: sku.to_string(),
            })
        }
    }
}
