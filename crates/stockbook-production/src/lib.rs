//! Production backend boundary.
//!
//! The stock engine never requests production on its own; surrounding
//! orchestration does, through the `ProductionBackend` trait, when
//! demand exceeds supply. This crate defines that boundary plus a
//! mock backend for tests.

pub mod backend;
pub mod mock;

pub use backend::{
    ProductionBackend, ProductionFilter, ProductionPriority, ProductionRequest, ProductionResult,
    ProductionState, ProductionStatus,
};
pub use mock::MockProductionBackend;
