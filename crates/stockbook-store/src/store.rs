//! The shared in-memory store.
//!
//! `StockStore` owns every record map and the id sequences. It is
//! cheap to share behind an `Arc` and safe under many concurrent
//! callers as long as the crate-level locking discipline is followed
//! (quant lock → hold lock → move log).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use stockbook_core::{
    HoldId, MoveId, Position, PositionCode, ProductRef, Qty, QuantId, StockError, StockResult,
};
use tracing::debug;

use crate::alert::{AlertId, StockAlert};
use crate::batch::Batch;
use crate::coordinate::Coordinate;
use crate::hold::{Hold, HoldDraft};
use crate::ledger::Move;
use crate::quant::Quant;

/// In-memory store of positions, quants, moves, holds, batches and
/// alerts.
#[derive(Debug, Default)]
pub struct StockStore {
    positions: DashMap<PositionCode, Position>,

    quants: DashMap<QuantId, Arc<Quant>>,
    /// Uniqueness index: at most one quant per coordinate tuple.
    by_coordinate: DashMap<Coordinate, QuantId>,

    /// Append-only ledger, in append order.
    moves: RwLock<Vec<Arc<Move>>>,

    holds: DashMap<HoldId, Arc<Hold>>,

    batches: DashMap<String, Batch>,
    alerts: DashMap<AlertId, Arc<Mutex<StockAlert>>>,

    next_quant: AtomicU64,
    next_move: AtomicU64,
    next_hold: AtomicU64,
    next_alert: AtomicU64,
}

impl StockStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_quant: AtomicU64::new(1),
            next_move: AtomicU64::new(1),
            next_hold: AtomicU64::new(1),
            next_alert: AtomicU64::new(1),
            ..Default::default()
        }
    }

    // === Positions ===

    /// Register (or replace) a position. Reference data, rarely
    /// mutated; never deleted while quants point at it.
    pub fn register_position(&self, position: Position) {
        self.positions.insert(position.code.clone(), position);
    }

    #[must_use]
    pub fn position(&self, code: &PositionCode) -> Option<Position> {
        self.positions.get(code).map(|p| p.clone())
    }

    #[must_use]
    pub fn positions(&self) -> Vec<Position> {
        let mut all: Vec<Position> = self.positions.iter().map(|p| p.clone()).collect();
        all.sort_by(|a, b| a.code.cmp(&b.code));
        all
    }

    /// The position flagged as default, if any.
    #[must_use]
    pub fn default_position(&self) -> Option<Position> {
        self.positions
            .iter()
            .find(|p| p.is_default)
            .map(|p| p.clone())
    }

    // === Quants ===

    /// Get the quant at a coordinate, creating it lazily on first
    /// movement. Creation goes through the coordinate index's entry
    /// API, so two concurrent callers can never mint two quants for
    /// one coordinate.
    pub fn get_or_create_quant(&self, coordinate: &Coordinate) -> Arc<Quant> {
        match self.by_coordinate.entry(coordinate.clone()) {
            Entry::Occupied(occupied) => self
                .quants
                .get(occupied.get())
                .expect("coordinate index references a live quant")
                .clone(),
            Entry::Vacant(vacant) => {
                let id = QuantId(self.next_quant.fetch_add(1, Ordering::Relaxed));
                let quant = Arc::new(Quant::new(id, coordinate.clone()));
                self.quants.insert(id, quant.clone());
                vacant.insert(id);
                debug!(quant_id = id.0, %coordinate, "quant created");
                quant
            }
        }
    }

    #[must_use]
    pub fn quant(&self, id: QuantId) -> Option<Arc<Quant>> {
        self.quants.get(&id).map(|q| q.clone())
    }

    #[must_use]
    pub fn find_quant(&self, coordinate: &Coordinate) -> Option<Arc<Quant>> {
        let id = *self.by_coordinate.get(coordinate)?;
        self.quant(id)
    }

    /// All quants for a product, unordered.
    #[must_use]
    pub fn quants_for_product(&self, product: &ProductRef) -> Vec<Arc<Quant>> {
        self.quants
            .iter()
            .filter(|q| &q.product == product)
            .map(|q| q.clone())
            .collect()
    }

    /// Snapshot of every quant, unordered.
    #[must_use]
    pub fn all_quants(&self) -> Vec<Arc<Quant>> {
        self.quants.iter().map(|q| q.clone()).collect()
    }

    #[must_use]
    pub fn quant_count(&self) -> usize {
        self.quants.len()
    }

    // === Moves ===

    /// Append a move and apply its delta to the (locked) balance in
    /// one step.
    ///
    /// `balance` MUST be the guard obtained from `lock_balance()` on
    /// the quant identified by `quant` — this is what keeps the cache
    /// equal to the ledger sum at every instant, and what makes the
    /// increment an atomic "add delta to current value" rather than a
    /// read-then-write of a stale snapshot.
    pub fn apply_move(
        &self,
        balance: &mut Qty,
        quant: QuantId,
        delta: Qty,
        reason: impl Into<String>,
        reference: Option<String>,
        actor: Option<String>,
    ) -> Arc<Move> {
        let mv = Arc::new(Move {
            id: MoveId(self.next_move.fetch_add(1, Ordering::Relaxed)),
            quant,
            delta,
            reason: reason.into(),
            reference,
            actor,
            timestamp: Utc::now(),
        });
        self.moves.write().push(mv.clone());
        *balance += delta;
        mv
    }

    /// All moves referencing a quant, in append order.
    #[must_use]
    pub fn moves_for_quant(&self, quant: QuantId) -> Vec<Arc<Move>> {
        self.moves
            .read()
            .iter()
            .filter(|m| m.quant == quant)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn find_move(&self, id: MoveId) -> Option<Arc<Move>> {
        self.moves.read().iter().find(|m| m.id == id).cloned()
    }

    #[must_use]
    pub fn move_count(&self) -> usize {
        self.moves.read().len()
    }

    /// Moves are immutable; any attempt to drop one fails. Correct by
    /// appending an inverse move instead.
    pub fn discard_move(&self, id: MoveId) -> StockResult<()> {
        Err(StockError::ImmutableRecord { move_id: id })
    }

    // === Holds ===

    /// Create a PENDING hold from a draft, assigning the id.
    pub fn create_hold(&self, draft: HoldDraft) -> Arc<Hold> {
        let id = HoldId(self.next_hold.fetch_add(1, Ordering::Relaxed));
        let hold = Arc::new(Hold::new(id, draft));
        self.holds.insert(id, hold.clone());
        hold
    }

    #[must_use]
    pub fn hold(&self, id: HoldId) -> Option<Arc<Hold>> {
        self.holds.get(&id).map(|h| h.clone())
    }

    /// Resolve an external `hold:{n}` token to its record.
    ///
    /// Fails `InvalidHold` for both malformed and unknown tokens.
    pub fn hold_by_token(&self, token: &str) -> StockResult<Arc<Hold>> {
        let id = HoldId::parse(token)?;
        self.hold(id).ok_or_else(|| StockError::InvalidHold {
            hold_id: token.to_string(),
        })
    }

    /// All holds for a product (any status). Lock-free: filters on
    /// the immutable product field only.
    #[must_use]
    pub fn holds_for_product(&self, product: &ProductRef) -> Vec<Arc<Hold>> {
        self.holds
            .iter()
            .filter(|h| &h.product == product)
            .map(|h| h.clone())
            .collect()
    }

    /// Snapshot of every hold, for the sweeper's scan.
    #[must_use]
    pub fn all_holds(&self) -> Vec<Arc<Hold>> {
        self.holds.iter().map(|h| h.clone()).collect()
    }

    /// Live held quantity bound to one quant: active, non-expired
    /// PENDING/CONFIRMED holds.
    ///
    /// Safe to call while holding that quant's balance lock (quant
    /// lock orders before hold locks).
    #[must_use]
    pub fn held_for_quant(&self, quant: QuantId, now: DateTime<Utc>) -> Qty {
        let mut total = Qty::ZERO;
        for entry in self.holds.iter() {
            let hold = entry.value();
            if hold.is_expired(now) {
                continue;
            }
            let state = hold.state();
            if state.quant == Some(quant) && state.status.is_active() {
                total += hold.quantity;
            }
        }
        total
    }

    /// Holds currently bound to a quant in an active state.
    #[must_use]
    pub fn active_holds_on_quant(&self, quant: QuantId) -> Vec<Arc<Hold>> {
        self.holds
            .iter()
            .filter(|h| {
                let state = h.state();
                state.quant == Some(quant) && state.status.is_active()
            })
            .map(|h| h.clone())
            .collect()
    }

    // === Batches ===

    /// Register a lot; returns the previous record when the code was
    /// already taken.
    pub fn add_batch(&self, batch: Batch) -> Option<Batch> {
        self.batches.insert(batch.code.clone(), batch)
    }

    #[must_use]
    pub fn batch(&self, code: &str) -> Option<Batch> {
        self.batches.get(code).map(|b| b.clone())
    }

    #[must_use]
    pub fn batches_for_product(&self, product: &ProductRef) -> Vec<Batch> {
        self.batches
            .iter()
            .filter(|b| &b.product == product)
            .map(|b| b.clone())
            .collect()
    }

    /// Batches expiring on or before the given date.
    #[must_use]
    pub fn batches_expiring_before(&self, date: NaiveDate) -> Vec<Batch> {
        self.batches
            .iter()
            .filter(|b| matches!(b.expiry_date, Some(expiry) if expiry <= date))
            .map(|b| b.clone())
            .collect()
    }

    // === Alerts ===

    /// Create a minimum-stock alert.
    pub fn add_alert(
        &self,
        product: ProductRef,
        position: Option<PositionCode>,
        min_quantity: Qty,
    ) -> AlertId {
        let id = AlertId(self.next_alert.fetch_add(1, Ordering::Relaxed));
        self.alerts.insert(
            id,
            Arc::new(Mutex::new(StockAlert::new(id, product, position, min_quantity))),
        );
        id
    }

    #[must_use]
    pub fn alerts(&self) -> Vec<Arc<Mutex<StockAlert>>> {
        self.alerts.iter().map(|a| a.clone()).collect()
    }

    /// Deactivate an alert; returns false when unknown.
    pub fn deactivate_alert(&self, id: AlertId) -> bool {
        match self.alerts.get(&id) {
            Some(alert) => {
                alert.lock().is_active = false;
                true
            }
            None => false,
        }
    }
}
