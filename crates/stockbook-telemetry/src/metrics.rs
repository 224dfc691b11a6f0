//! Prometheus metrics for the stock engine.
//!
//! Covers the write paths:
//! - Moves appended to the ledger
//! - Hold lifecycle (created, released, fulfilled)
//! - Expiry sweeper passes
//! - Low-stock alerts
//!
//! # Panics
//!
//! Metric registration uses `unwrap()` intentionally. If registration fails,
//! it indicates a fatal configuration error (e.g., duplicate metric names)
//! that should cause an immediate crash at startup rather than silent failure.
//! These panics only occur during static initialization, never at runtime.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter, register_counter_vec, register_histogram, register_int_gauge, Counter,
    CounterVec, Histogram, IntGauge,
};

/// Total moves appended to the ledger.
/// Labels: direction (in/out), reason.
pub static MOVES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "stockbook_moves_total",
        "Total stock moves appended to the ledger",
        &["direction", "reason"]
    )
    .unwrap()
});

/// Total holds created.
/// Labels: mode (reservation/demand).
pub static HOLDS_CREATED_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "stockbook_holds_created_total",
        "Total holds created",
        &["mode"]
    )
    .unwrap()
});

/// Total holds released.
/// Labels: cause (manual/expired).
pub static HOLDS_RELEASED_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "stockbook_holds_released_total",
        "Total holds released",
        &["cause"]
    )
    .unwrap()
});

/// Total holds fulfilled.
pub static HOLDS_FULFILLED_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!("stockbook_holds_fulfilled_total", "Total holds fulfilled").unwrap()
});

/// Holds released per sweeper pass.
pub static SWEEPER_RELEASED: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "stockbook_sweeper_released",
        "Expired holds released per sweeper pass",
        vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 200.0]
    )
    .unwrap()
});

/// Quants currently registered.
pub static QUANTS_GAUGE: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!("stockbook_quants", "Quants currently registered").unwrap()
});

/// Total low-stock alerts triggered.
pub static ALERTS_TRIGGERED_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "stockbook_alerts_triggered_total",
        "Total low-stock alerts triggered"
    )
    .unwrap()
});

/// Metrics facade for easy access.
pub struct Metrics;

impl Metrics {
    /// Record a move appended to the ledger.
    pub fn move_recorded(direction: &str, reason: &str) {
        MOVES_TOTAL.with_label_values(&[direction, reason]).inc();
    }

    /// Record a hold created.
    pub fn hold_created(mode: &str) {
        HOLDS_CREATED_TOTAL.with_label_values(&[mode]).inc();
    }

    /// Record a hold released.
    pub fn hold_released(cause: &str) {
        HOLDS_RELEASED_TOTAL.with_label_values(&[cause]).inc();
    }

    /// Record a hold fulfilled.
    pub fn hold_fulfilled() {
        HOLDS_FULFILLED_TOTAL.inc();
    }

    /// Record one expiry sweeper pass.
    pub fn sweeper_pass(released: usize) {
        SWEEPER_RELEASED.observe(released as f64);
    }

    /// Update the registered quant count.
    pub fn quant_count(count: usize) {
        QUANTS_GAUGE.set(count as i64);
    }

    /// Record a low-stock alert firing.
    pub fn alert_triggered() {
        ALERTS_TRIGGERED_TOTAL.inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_record_without_panic() {
        Metrics::move_recorded("in", "receipt");
        Metrics::hold_created("reservation");
        Metrics::hold_released("expired");
        Metrics::hold_fulfilled();
        Metrics::sweeper_pass(3);
        Metrics::quant_count(7);
        Metrics::alert_triggered();

        assert!(HOLDS_FULFILLED_TOTAL.get() >= 1.0);
    }
}
