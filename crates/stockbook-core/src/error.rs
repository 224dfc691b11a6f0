//! Structured domain errors for stock operations.
//!
//! Every failure carries a stable variant plus the contextual data a
//! caller needs to react programmatically — never a bare message.
//! Read-only queries do not error for "not found"; they return
//! zero/empty/`None`.

use crate::decimal::Qty;
use crate::ids::MoveId;
use crate::product::ProductRef;
use chrono::NaiveDate;
use thiserror::Error;

/// Domain error for all stock operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StockError {
    /// Non-positive quantity supplied to a mutating operation.
    #[error("invalid quantity (must be positive): {requested}")]
    InvalidQuantity { requested: Qty },

    /// An issue exceeded a quant's live available amount.
    #[error("insufficient quantity: available {available}, requested {requested}")]
    InsufficientQuantity { available: Qty, requested: Qty },

    /// A hold request exceeded product-level availability under a
    /// policy that disallows demand.
    #[error("insufficient availability: available {available}, requested {requested}")]
    InsufficientAvailable { available: Qty, requested: Qty },

    /// Malformed or unresolvable hold token.
    #[error("invalid or unknown hold: {hold_id}")]
    InvalidHold { hold_id: String },

    /// Attempted state transition not permitted from the hold's
    /// current state.
    #[error("invalid status for this operation: current {current}, expected {expected}")]
    InvalidStatus { current: String, expected: String },

    /// Fulfillment attempted on a hold with no linked stock.
    #[error("hold is demand (no linked stock): {hold_id}")]
    HoldIsDemand { hold_id: String },

    /// Adjustment attempted with an empty reason.
    #[error("reason is required")]
    ReasonRequired,

    /// Replan/realize referenced a coordinate with no existing quant.
    #[error("no quant found for {product} at {target_date}")]
    QuantNotFound {
        product: ProductRef,
        target_date: NaiveDate,
    },

    /// Attempted mutation or deletion of a persisted move.
    #[error("moves are immutable ({move_id}); correct by appending an inverse move")]
    ImmutableRecord { move_id: MoveId },

    /// Input SKU rejected by the configured validator.
    #[error("sku rejected by validator: {sku}")]
    InvalidSku { sku: String },
}

/// Result type alias for stock operations.
pub type StockResult<T> = std::result::Result<T, StockError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_context_is_preserved() {
        let err = StockError::InsufficientAvailable {
            available: Qty::new(dec!(2)),
            requested: Qty::new(dec!(5)),
        };
        match err {
            StockError::InsufficientAvailable {
                available,
                requested,
            } => {
                assert_eq!(available, Qty::new(dec!(2)));
                assert_eq!(requested, Qty::new(dec!(5)));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_error_display() {
        let err = StockError::InsufficientQuantity {
            available: Qty::new(dec!(10)),
            requested: Qty::new(dec!(20)),
        };
        assert_eq!(
            err.to_string(),
            "insufficient quantity: available 10, requested 20"
        );
    }
}
