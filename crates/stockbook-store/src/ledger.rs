//! Move — immutable ledger entry.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use stockbook_core::{MoveId, Qty, QuantId};

/// Immutable record of one signed quantity change.
///
/// Moves are never updated or deleted; corrections are new moves with
/// the inverse delta. The balance cache of the referenced quant is
/// updated together with the append, under the quant's row lock
/// (`StockStore::apply_move`). This is the only mechanism by which a
/// balance changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Move {
    /// Record id.
    pub id: MoveId,
    /// The quant this entry debits or credits.
    pub quant: QuantId,
    /// Signed change: positive = entry, negative = exit.
    pub delta: Qty,
    /// Mandatory human reason ("morning production", "order #123").
    pub reason: String,
    /// Optional external correlation reference.
    pub reference: Option<String>,
    /// Optional actor label (user, job name).
    pub actor: Option<String>,
    /// Append timestamp.
    pub timestamp: DateTime<Utc>,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.delta.is_positive() { "+" } else { "" };
        write!(f, "{sign}{} | {}", self.delta, self.reason)
    }
}
