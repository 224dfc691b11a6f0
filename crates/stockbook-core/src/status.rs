//! Hold lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hold lifecycle status.
///
/// ```text
/// PENDING ──confirm()──► CONFIRMED ──fulfill()──► FULFILLED
///    │                       │
///    └──────release()────────┴──────────────────► RELEASED
/// ```
///
/// FULFILLED and RELEASED are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldStatus {
    /// Created, awaiting confirmation.
    #[default]
    Pending,
    /// Checkout started.
    Confirmed,
    /// Delivered, stock decremented.
    Fulfilled,
    /// Cancelled or expired.
    Released,
}

impl HoldStatus {
    /// PENDING or CONFIRMED — the states that count against availability.
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// FULFILLED or RELEASED — no further transitions allowed.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }
}

impl fmt::Display for HoldStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Fulfilled => write!(f, "fulfilled"),
            Self::Released => write!(f, "released"),
        }
    }
}
