//! Prometheus metrics and structured logging for stockbook.
//!
//! - Prometheus counters and gauges for moves, holds and alerts
//! - Structured JSON logging with tracing

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use metrics::Metrics;
