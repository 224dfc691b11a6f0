//! In-memory transactional store for the stockbook ledger engine.
//!
//! Provides the four core records — `Quant` (cached balance), `Move`
//! (immutable ledger entry), `Hold` (reservation) and `Position`
//! registry — plus `Batch` lot tracking and `StockAlert` thresholds,
//! all behind `StockStore`.
//!
//! # Locking discipline
//!
//! Each `Quant` guards its balance with a `parking_lot::Mutex`; each
//! `Hold` guards its mutable state the same way. These are the
//! in-process analogue of row locks. The fixed lock order is:
//!
//! 1. Quant balance lock (planned quant before physical quant in
//!    transfers)
//! 2. Hold state lock
//! 3. The append-only move log
//!
//! No code path may acquire them in any other order. The expiry
//! sweeper only ever uses `try_state()` and never blocks on a hold.

pub mod alert;
pub mod batch;
pub mod coordinate;
pub mod hold;
pub mod ledger;
pub mod quant;
pub mod store;

pub use alert::{AlertId, StockAlert};
pub use batch::Batch;
pub use coordinate::Coordinate;
pub use hold::{Hold, HoldDraft, HoldSnapshot, HoldState};
pub use ledger::Move;
pub use quant::Quant;
pub use store::StockStore;
