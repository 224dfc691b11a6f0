//! Stock ledger and reservation engine.
//!
//! The `Stock` facade ties together:
//! - Ledger operations (receive, issue, adjust, recalculate, reverse)
//! - Availability queries with perishability windows and real-time
//!   hold-expiry exclusion
//! - The hold lifecycle state machine
//! - FIFO allocation of holds onto quants
//! - Production planning (plan, replan, realize)
//! - Minimum-stock alerts and the scheduled expiry sweeper
//!
//! All correctness rests on the store's per-record locks; see
//! `stockbook-store` for the locking discipline.

pub mod alerts;
pub mod allocation;
pub mod availability;
pub mod config;
pub mod engine;
pub mod holds;
pub mod ledger;
pub mod planning;
pub mod shelflife;
pub mod sweeper;

pub use availability::QuantFilter;
pub use config::StockSettings;
pub use engine::Stock;
pub use shelflife::quant_in_window;
pub use sweeper::{spawn_expiry_sweeper, ExpirySweeper};
