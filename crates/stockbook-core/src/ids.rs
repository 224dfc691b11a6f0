//! Record identifiers.
//!
//! `QuantId` and `MoveId` are internal sequence numbers. `HoldId` also
//! has a stable external string form (`hold:{n}`) handed to callers as
//! an opaque token and parseable back.

use crate::error::{StockError, StockResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a Quant (balance record).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuantId(pub u64);

impl fmt::Display for QuantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "quant:{}", self.0)
    }
}

/// Identifier of a Move (ledger entry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveId(pub u64);

impl fmt::Display for MoveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "move:{}", self.0)
    }
}

/// Identifier of a Hold (reservation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoldId(pub u64);

impl HoldId {
    /// External token form handed to callers.
    #[must_use]
    pub fn token(&self) -> String {
        format!("hold:{}", self.0)
    }

    /// Parse an external token back to an id.
    ///
    /// Fails `InvalidHold` on anything that is not `hold:{n}`.
    pub fn parse(token: &str) -> StockResult<Self> {
        let invalid = || StockError::InvalidHold {
            hold_id: token.to_string(),
        };
        let n = token
            .strip_prefix("hold:")
            .ok_or_else(invalid)?
            .parse::<u64>()
            .map_err(|_| invalid())?;
        Ok(Self(n))
    }
}

impl fmt::Display for HoldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hold:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hold_id_roundtrip() {
        let id = HoldId(42);
        assert_eq!(id.token(), "hold:42");
        assert_eq!(HoldId::parse("hold:42").unwrap(), id);
    }

    #[test]
    fn test_hold_id_malformed() {
        for bad in ["", "42", "hold:", "hold:abc", "quant:42", "hold:4 2"] {
            let err = HoldId::parse(bad).unwrap_err();
            assert!(matches!(err, StockError::InvalidHold { .. }), "{bad}");
        }
    }
}
