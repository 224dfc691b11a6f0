//! Production backend trait and wire types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use stockbook_core::Qty;

/// Production priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionPriority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

/// Lifecycle state of a production request, as reported by the
/// backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionState {
    /// Request recorded, nothing scheduled yet.
    Requested,
    /// Plan approved.
    Planned,
    /// Work order created.
    Scheduled,
    /// Production underway.
    InProgress,
    /// Done.
    Completed,
    /// Cancelled by a caller.
    Cancelled,
    /// Failed (missing materials, ...).
    Failed,
}

impl ProductionState {
    /// Still awaiting completion?
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            Self::Requested | Self::Planned | Self::Scheduled | Self::InProgress
        )
    }
}

impl fmt::Display for ProductionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Requested => "requested",
            Self::Planned => "planned",
            Self::Scheduled => "scheduled",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// A request for production of one SKU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRequest {
    pub sku: String,
    pub quantity: Qty,
    pub target_date: NaiveDate,
    #[serde(default)]
    pub priority: ProductionPriority,
    /// Hold token that originated the demand, when any.
    #[serde(default)]
    pub reference: Option<String>,
}

/// Current status of one production request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionStatus {
    /// Backend request id, format `production:{n}`.
    pub request_id: String,
    pub sku: String,
    pub quantity: Qty,
    pub state: ProductionState,
    pub target_date: NaiveDate,
    #[serde(default)]
    pub message: Option<String>,
}

/// Outcome of a request or cancellation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionResult {
    pub success: bool,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub state: Option<ProductionState>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Filter for listing pending requests.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductionFilter {
    pub sku: Option<String>,
    pub target_date: Option<NaiveDate>,
}

/// Interface to a production system.
///
/// Invoked by surrounding orchestration, never automatically by the
/// stock engine.
pub trait ProductionBackend: Send + Sync {
    /// Request production; returns the backend request id on success.
    fn request_production(&self, request: ProductionRequest) -> ProductionResult;

    /// Current status, `None` when the id is unknown.
    fn check_status(&self, request_id: &str) -> Option<ProductionStatus>;

    /// Cancel a pending request.
    fn cancel_request(&self, request_id: &str, reason: &str) -> ProductionResult;

    /// Pending requests matching the filter.
    fn list_pending(&self, filter: &ProductionFilter) -> Vec<ProductionStatus>;
}
