//! Hold lifecycle — create, confirm, release, fulfill, sweep.
//!
//! State machine: PENDING -> {CONFIRMED, RELEASED};
//! CONFIRMED -> {FULFILLED, RELEASED}; FULFILLED and RELEASED are
//! terminal. Fulfillment is the only path that decrements a balance
//! on behalf of a hold.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use stockbook_core::{AvailabilityPolicy, HoldStatus, ProductRef, Qty, StockError, StockResult};
use stockbook_store::{HoldDraft, HoldSnapshot, Move};
use stockbook_telemetry::Metrics;
use tracing::info;

use crate::engine::Stock;

impl Stock {
    /// Create a hold for `quantity` of `product` on `target_date`
    /// (today when absent). Returns the hold token (`hold:{n}`).
    ///
    /// Binding: FIFO allocation picks a candidate quant without
    /// locking; the candidate's balance lock is then taken and live
    /// availability re-verified under it before the hold is created.
    /// If the re-check fails there is no internal retry: with policy
    /// `demand_ok` an unbacked demand hold is created, otherwise the
    /// call fails `InsufficientAvailable` carrying the product-level
    /// available amount.
    pub fn hold(
        &self,
        quantity: Qty,
        product: ProductRef,
        target_date: Option<NaiveDate>,
        purpose: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> StockResult<String> {
        if !quantity.is_positive() {
            return Err(StockError::InvalidQuantity {
                requested: quantity,
            });
        }
        self.validate_sku(&product.token())?;

        let target = target_date.unwrap_or_else(|| Utc::now().date_naive());
        let policy = self.catalog().availability_policy(&product);
        let expires_at = expires_at.or_else(|| self.default_expiry());

        let physical_only = policy == AvailabilityPolicy::StockOnly;
        if let Some(quant) = self.find_quant_for_hold(&product, target, quantity, physical_only) {
            let balance = quant.lock_balance();
            let available = *balance - self.store().held_for_quant(quant.id, Utc::now());
            if available >= quantity {
                // Created while the quant lock is held, so no
                // concurrent hold can consume the same quantity.
                let hold = self.store().create_hold(HoldDraft {
                    product: product.clone(),
                    quant: Some(quant.id),
                    quantity,
                    target_date: target,
                    purpose,
                    expires_at,
                });
                drop(balance);

                info!(
                    product = %product,
                    qty = %quantity,
                    target = %target,
                    hold_id = %hold.token(),
                    "stock.hold.created"
                );
                Metrics::hold_created("reservation");
                return Ok(hold.token());
            }
            // Re-check lost the race; fall through to demand-or-fail.
        }

        let current_available = self.available(&product, Some(target), None);

        if policy.allows_demand() {
            let hold = self.store().create_hold(HoldDraft {
                product: product.clone(),
                quant: None,
                quantity,
                target_date: target,
                purpose,
                expires_at,
            });
            info!(
                product = %product,
                qty = %quantity,
                target = %target,
                hold_id = %hold.token(),
                "stock.hold.demand"
            );
            Metrics::hold_created("demand");
            return Ok(hold.token());
        }

        Err(StockError::InsufficientAvailable {
            available: current_available,
            requested: quantity,
        })
    }

    /// PENDING -> CONFIRMED (checkout started). No ledger effect.
    pub fn confirm(&self, hold_id: &str) -> StockResult<HoldSnapshot> {
        let hold = self.store().hold_by_token(hold_id)?;
        {
            let mut state = hold.state();
            if state.status != HoldStatus::Pending {
                return Err(StockError::InvalidStatus {
                    current: state.status.to_string(),
                    expected: HoldStatus::Pending.to_string(),
                });
            }
            state.status = HoldStatus::Confirmed;
        }
        info!(hold_id, "stock.hold.confirmed");
        Ok(hold.snapshot())
    }

    /// PENDING|CONFIRMED -> RELEASED (cancellation). Releasing an
    /// already-released hold fails `InvalidStatus`; release is
    /// deliberately not idempotent.
    pub fn release(&self, hold_id: &str, reason: &str) -> StockResult<HoldSnapshot> {
        let hold = self.store().hold_by_token(hold_id)?;
        {
            let mut state = hold.state();
            if !state.status.is_active() {
                return Err(StockError::InvalidStatus {
                    current: state.status.to_string(),
                    expected: "pending or confirmed".to_string(),
                });
            }
            state.status = HoldStatus::Released;
            state.resolved_at = Some(Utc::now());
            state.release_reason = Some(reason.to_string());
        }
        info!(hold_id, reason, "stock.hold.released");
        Metrics::hold_released("manual");
        Ok(hold.snapshot())
    }

    /// CONFIRMED -> FULFILLED (delivered). Appends the negative move
    /// on the linked quant; fails `HoldIsDemand` when there is none.
    pub fn fulfill(&self, hold_id: &str, reference: Option<String>) -> StockResult<Arc<Move>> {
        let hold = self.store().hold_by_token(hold_id)?;

        // Lock order is quant before hold, but the bound quant is only
        // known from the hold's state; read it unlocked, lock the
        // quant, then re-check the binding (realize may re-point a
        // hold concurrently) and retry on mismatch.
        loop {
            let quant_id = hold.state().quant;

            let Some(quant_id) = quant_id else {
                let state = hold.state();
                if state.quant.is_some() {
                    continue; // bound in the meantime
                }
                if state.status != HoldStatus::Confirmed {
                    return Err(StockError::InvalidStatus {
                        current: state.status.to_string(),
                        expected: HoldStatus::Confirmed.to_string(),
                    });
                }
                return Err(StockError::HoldIsDemand {
                    hold_id: hold_id.to_string(),
                });
            };

            let quant = self
                .store()
                .quant(quant_id)
                .ok_or_else(|| StockError::InvalidHold {
                    hold_id: hold_id.to_string(),
                })?;

            let mut balance = quant.lock_balance();
            let mut state = hold.state();
            if state.quant != Some(quant_id) {
                continue; // re-pointed between the read and the locks
            }
            if state.status != HoldStatus::Confirmed {
                return Err(StockError::InvalidStatus {
                    current: state.status.to_string(),
                    expected: HoldStatus::Confirmed.to_string(),
                });
            }

            let mv = self.store().apply_move(
                &mut balance,
                quant.id,
                -hold.quantity,
                format!("hold fulfilled: {}", hold.token()),
                reference,
                None,
            );
            state.status = HoldStatus::Fulfilled;
            state.resolved_at = Some(Utc::now());
            drop(state);
            drop(balance);

            info!(hold_id, qty = %hold.quantity, "stock.hold.fulfilled");
            Metrics::hold_fulfilled();
            Metrics::move_recorded("out", "fulfillment");
            return Ok(mv);
        }
    }

    /// Release every expired PENDING/CONFIRMED hold, in bounded
    /// batches. Rows whose state lock is busy are skipped, not waited
    /// on, so concurrent sweepers and in-flight operations never
    /// block each other; a skipped row is picked up on the next run.
    ///
    /// Returns the number of holds transitioned.
    pub fn release_expired(&self) -> usize {
        let now = Utc::now();
        let batch_size = self.settings().expired_batch_size;
        let mut total = 0;

        loop {
            let mut released = 0;
            for hold in self.store().all_holds() {
                if released >= batch_size {
                    break;
                }
                if !hold.is_expired(now) {
                    continue;
                }
                let Some(mut state) = hold.try_state() else {
                    continue;
                };
                if !state.status.is_active() {
                    continue;
                }
                state.status = HoldStatus::Released;
                state.resolved_at = Some(now);
                state.release_reason = Some("expired".to_string());
                released += 1;
                Metrics::hold_released("expired");
            }
            total += released;
            if released < batch_size {
                break;
            }
        }

        if total > 0 {
            info!(released = total, "stock.holds.expired_released");
        }
        Metrics::sweeper_pass(total);
        total
    }

    /// Default expiry derived from settings; `None` when the TTL is
    /// unset.
    fn default_expiry(&self) -> Option<DateTime<Utc>> {
        let ttl = self.settings().hold_ttl_minutes;
        if ttl == 0 {
            None
        } else {
            Some(Utc::now() + Duration::minutes(i64::from(ttl)))
        }
    }
}
