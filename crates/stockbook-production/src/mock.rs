//! Mock production backend for tests and development.

use crate::backend::{
    ProductionBackend, ProductionFilter, ProductionRequest, ProductionResult, ProductionState,
    ProductionStatus,
};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// In-memory backend that records every request and lets tests drive
/// state transitions.
#[derive(Debug, Default)]
pub struct MockProductionBackend {
    requests: DashMap<String, ProductionStatus>,
    next_id: AtomicU64,
}

impl MockProductionBackend {
    #[must_use]
    pub fn new() -> Self {
        Self {
            requests: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Force a request into a state (test hook).
    pub fn set_state(&self, request_id: &str, state: ProductionState) -> bool {
        match self.requests.get_mut(request_id) {
            Some(mut status) => {
                status.state = state;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.len()
    }
}

impl ProductionBackend for MockProductionBackend {
    fn request_production(&self, request: ProductionRequest) -> ProductionResult {
        let id = format!("production:{}", self.next_id.fetch_add(1, Ordering::Relaxed));
        self.requests.insert(
            id.clone(),
            ProductionStatus {
                request_id: id.clone(),
                sku: request.sku,
                quantity: request.quantity,
                state: ProductionState::Requested,
                target_date: request.target_date,
                message: None,
            },
        );
        ProductionResult {
            success: true,
            request_id: Some(id),
            state: Some(ProductionState::Requested),
            message: None,
        }
    }

    fn check_status(&self, request_id: &str) -> Option<ProductionStatus> {
        self.requests.get(request_id).map(|s| s.clone())
    }

    fn cancel_request(&self, request_id: &str, reason: &str) -> ProductionResult {
        match self.requests.get_mut(request_id) {
            Some(mut status) if status.state.is_pending() => {
                status.state = ProductionState::Cancelled;
                status.message = Some(reason.to_string());
                ProductionResult {
                    success: true,
                    request_id: Some(request_id.to_string()),
                    state: Some(ProductionState::Cancelled),
                    message: None,
                }
            }
            Some(status) => ProductionResult {
                success: false,
                request_id: Some(request_id.to_string()),
                state: Some(status.state),
                message: Some("request is not pending".to_string()),
            },
            None => ProductionResult {
                success: false,
                request_id: None,
                state: None,
                message: Some(format!("unknown request: {request_id}")),
            },
        }
    }

    fn list_pending(&self, filter: &ProductionFilter) -> Vec<ProductionStatus> {
        self.requests
            .iter()
            .filter(|s| s.state.is_pending())
            .filter(|s| filter.sku.as_deref().map_or(true, |sku| s.sku == sku))
            .filter(|s| {
                filter
                    .target_date
                    .map_or(true, |date| s.target_date == date)
            })
            .map(|s| s.clone())
            .collect()
    }
}
