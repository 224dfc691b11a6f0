//! Core domain types for the stockbook ledger engine.
//!
//! This crate provides the fundamental types used throughout the system:
//! - `Qty`: precision-safe quantity type
//! - `ProductRef`: opaque tagged product reference (kind + id)
//! - `Position`, `PositionKind`: named stock locations
//! - `QuantId`, `MoveId`, `HoldId`: record identifiers
//! - `HoldStatus`, `AvailabilityPolicy`: lifecycle and policy enums
//! - `StockError`: structured domain errors

pub mod decimal;
pub mod error;
pub mod ids;
pub mod position;
pub mod product;
pub mod status;

pub use decimal::Qty;
pub use error::{StockError, StockResult};
pub use ids::{HoldId, MoveId, QuantId};
pub use position::{Position, PositionCode, PositionKind};
pub use product::{AvailabilityPolicy, ProductRef};
pub use status::HoldStatus;
