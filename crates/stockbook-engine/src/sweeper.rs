//! Scheduled expiry sweeper.
//!
//! Periodically calls `release_expired` on the engine. Sweep latency
//! is an operational concern only: availability already excludes
//! expired holds in real time, the sweeper just persists the terminal
//! status.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::engine::Stock;

/// Periodic expiry sweep over a shared engine.
///
/// Safe to run from several tasks or processes at once: the sweep
/// itself skips rows it cannot lock.
pub struct ExpirySweeper {
    stock: Arc<Stock>,
    interval: Duration,
}

impl ExpirySweeper {
    pub fn new(stock: Arc<Stock>, interval: Duration) -> Self {
        Self { stock, interval }
    }

    /// Run until the shutdown signal flips.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(interval_secs = self.interval.as_secs(), "sweeper started");
        let mut ticker = tokio::time::interval(self.interval);
        // The first tick fires immediately; skip it so a fresh start
        // does not sweep before anything can have expired.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let released = self.stock.release_expired();
                    if released > 0 {
                        debug!(released, "sweeper pass");
                    }
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("sweeper stopped");
                        return;
                    }
                }
            }
        }
    }
}

/// Spawn an `ExpirySweeper` task; the returned sender stops it when
/// set to `true`.
pub fn spawn_expiry_sweeper(
    stock: Arc<Stock>,
    interval: Duration,
) -> (JoinHandle<()>, watch::Sender<bool>) {
    let (tx, rx) = watch::channel(false);
    let sweeper = ExpirySweeper::new(stock, interval);
    let handle = tokio::spawn(sweeper.run(rx));
    (handle, tx)
}
