//! Sweep scheduling.
//!
//! The store is synchronous, so each sweep runs on the blocking pool under a
//! deadline. A sweep that outlives its deadline keeps running in the
//! background and holds the sweeper's guard until it finishes, so the next
//! tick reports `SweepInProgress` instead of starting a second pass.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use playground_store::{RetentionSweeper, Store, StoreError, SweepReport};

/// A retention sweep bound to its schedule parameters.
pub struct SweepJob {
    sweeper: Arc<RetentionSweeper<dyn Store>>,
    day_diff: i32,
    timeout: Duration,
}

impl SweepJob {
    /// Create a job sweeping `store` with the given window and deadline.
    pub fn new(store: Arc<dyn Store>, day_diff: i32, timeout: Duration) -> Self {
        Self {
            sweeper: Arc::new(RetentionSweeper::new(store)),
            day_diff,
            timeout,
        }
    }

    /// Run one sweep under the job's deadline.
    ///
    /// # Errors
    ///
    /// - `StoreError::DeadlineExceeded` if the sweep did not finish in time.
    /// - `StoreError::PartialFailure` if some snippets could not be deleted.
    /// - Any error from the sweep itself.
    pub async fn run_once(&self) -> Result<SweepReport, StoreError> {
        let sweeper = Arc::clone(&self.sweeper);
        let day_diff = self.day_diff;
        let task = tokio::task::spawn_blocking(move || sweeper.delete_unused_snippets(day_diff));

        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(StoreError::Database(format!("sweep task failed: {e}"))),
            Err(_) => Err(StoreError::DeadlineExceeded(self.timeout)),
        }
    }

    /// Sweep every `every` until `shutdown` resolves. The first sweep starts
    /// immediately. Failed sweeps are logged and retried on the next tick.
    pub async fn run_scheduled<F>(&self, every: Duration, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => {
                    tracing::info!("Shutdown requested, stopping sweep schedule");
                    break;
                }
                _ = ticker.tick() => {
                    log_outcome(&self.run_once().await);
                }
            }
        }
    }
}

/// Log the outcome of one sweep.
pub fn log_outcome(outcome: &Result<SweepReport, StoreError>) {
    match outcome {
        Ok(report) => {
            tracing::info!(deleted = report.deleted.len(), scanned = report.scanned, "Sweep succeeded");
        }
        Err(StoreError::PartialFailure { failed, succeeded }) => {
            tracing::warn!(
                succeeded,
                failed = failed.len(),
                failed_ids = ?failed,
                "Sweep finished with failures, retrying on next run"
            );
        }
        Err(e) if e.is_transient() => {
            tracing::warn!(error = %e, "Sweep did not complete, retrying on next run");
        }
        Err(e) => {
            tracing::error!(error = %e, "Sweep failed");
        }
    }
}
