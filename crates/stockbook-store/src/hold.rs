//! Hold — temporary quantity reservation (or unmet demand).

use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::{Mutex, MutexGuard};
use serde::Serialize;
use stockbook_core::{HoldId, HoldStatus, ProductRef, Qty, QuantId};

/// Mutable part of a hold, behind the record's row lock.
///
/// `quant` is mutable because realizing planned production re-points
/// every in-flight hold from the planned quant to the new physical
/// one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldState {
    pub status: HoldStatus,
    /// Linked stock; `None` = demand (wanted, unbacked).
    pub quant: Option<QuantId>,
    /// Fulfillment or release timestamp.
    pub resolved_at: Option<DateTime<Utc>>,
    /// Reason recorded on release.
    pub release_reason: Option<String>,
}

/// A reservation of quantity for a future commitment.
///
/// Two modes:
/// 1. Reservation (`quant` set): quantity locked against real or
///    planned stock, decrementing its availability.
/// 2. Demand (`quant` empty): the caller wants quantity that no stock
///    backs yet; used for planning, auto-linked when production is
///    realized against it.
///
/// Holds are kept forever as history; terminal states are FULFILLED
/// and RELEASED.
#[derive(Debug)]
pub struct Hold {
    /// Record id; external token is `hold:{n}`.
    pub id: HoldId,
    /// Product reference (always set, in both modes).
    pub product: ProductRef,
    /// Reserved quantity, always positive.
    pub quantity: Qty,
    /// Desired date.
    pub target_date: NaiveDate,
    /// Opaque purpose reference (basket item, order item, ...).
    pub purpose: Option<String>,
    /// If not resolved by this instant, the sweeper releases it; the
    /// availability engine excludes it the moment it passes,
    /// regardless of sweep timing.
    pub expires_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    state: Mutex<HoldState>,
}

/// Fields a caller supplies when creating a hold; the store assigns
/// the id and timestamps.
#[derive(Debug, Clone)]
pub struct HoldDraft {
    pub product: ProductRef,
    pub quant: Option<QuantId>,
    pub quantity: Qty,
    pub target_date: NaiveDate,
    pub purpose: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Point-in-time serializable view of a hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldSnapshot {
    pub id: HoldId,
    pub hold_id: String,
    pub product: ProductRef,
    pub quant: Option<QuantId>,
    pub quantity: Qty,
    pub target_date: NaiveDate,
    pub status: HoldStatus,
    pub purpose: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub release_reason: Option<String>,
}

impl Hold {
    pub(crate) fn new(id: HoldId, draft: HoldDraft) -> Self {
        Self {
            id,
            product: draft.product,
            quantity: draft.quantity,
            target_date: draft.target_date,
            purpose: draft.purpose,
            expires_at: draft.expires_at,
            created_at: Utc::now(),
            state: Mutex::new(HoldState {
                status: HoldStatus::Pending,
                quant: draft.quant,
                resolved_at: None,
                release_reason: None,
            }),
        }
    }

    /// External token form.
    #[must_use]
    pub fn token(&self) -> String {
        self.id.token()
    }

    /// Acquire the row lock on the mutable state.
    pub fn state(&self) -> MutexGuard<'_, HoldState> {
        self.state.lock()
    }

    /// Non-blocking row lock; `None` when another operation holds it.
    /// The sweeper uses only this form.
    pub fn try_state(&self) -> Option<MutexGuard<'_, HoldState>> {
        self.state.try_lock()
    }

    /// Expired relative to `now`? Independent of status.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(at) => now > at,
            None => false,
        }
    }

    /// Counts against availability: PENDING/CONFIRMED and not
    /// expired. This check never consults the sweeper.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.state().status.is_active() && !self.is_expired(now)
    }

    /// Full serializable view (brief lock).
    #[must_use]
    pub fn snapshot(&self) -> HoldSnapshot {
        let state = self.state();
        HoldSnapshot {
            id: self.id,
            hold_id: self.id.token(),
            product: self.product.clone(),
            quant: state.quant,
            quantity: self.quantity,
            target_date: self.target_date,
            status: state.status,
            purpose: self.purpose.clone(),
            expires_at: self.expires_at,
            created_at: self.created_at,
            resolved_at: state.resolved_at,
            release_reason: state.release_reason.clone(),
        }
    }
}

impl HoldSnapshot {
    /// Demand (no linked stock)?
    pub fn is_demand(&self) -> bool {
        self.quant.is_none()
    }

    /// Reservation (linked stock)?
    pub fn is_reservation(&self) -> bool {
        self.quant.is_some()
    }
}
