//! Retention sweeper.
//!
//! Deletes user snippets whose last visit is at least `day_diff` days old.
//! Curated `PG_EXAMPLES` snippets are never touched. A failed deletion does
//! not stop the sweep; every failure is reported back to the caller.
//!
//! Expiry is checked twice: once over the scan, and again by the store at
//! delete time, so a snippet visited or rewritten mid-sweep survives. Only
//! one sweep runs per store, however many sweepers share it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use playground_core::{is_expired, Origin, SnippetEntity, SnippetId};

use crate::error::{Result, StoreError};
use crate::Store;

/// Outcome of one sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Number of `PG_USER` snippets examined.
    pub scanned: usize,
    /// Snippets that were deleted.
    pub deleted: Vec<SnippetId>,
    /// Snippets that were due for deletion but could not be deleted.
    pub failed: Vec<SnippetId>,
    /// Candidates that were no longer expired, or gone, when deleted.
    pub skipped: usize,
}

impl SweepReport {
    /// Convert into a result, failing with `PartialFailure` if any deletion failed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::PartialFailure` naming every snippet that was not deleted.
    pub fn into_result(self) -> Result<Self> {
        if self.failed.is_empty() {
            return Ok(self);
        }
        Err(StoreError::PartialFailure {
            failed: self.failed.iter().map(ToString::to_string).collect(),
            succeeded: self.deleted.len(),
        })
    }
}

/// Periodic deleter of unused user snippets. At most one sweep runs at a time
/// per store.
pub struct RetentionSweeper<S: Store + ?Sized> {
    store: Arc<S>,
}

impl<S: Store + ?Sized> RetentionSweeper<S> {
    /// Create a sweeper over `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Delete every `PG_USER` snippet unused for at least `day_diff` days.
    ///
    /// # Errors
    ///
    /// - `StoreError::InvalidInput` if `day_diff` is negative.
    /// - `StoreError::SweepInProgress` if another sweep is running.
    /// - `StoreError::PartialFailure` if some deletions failed; the others stay deleted.
    /// - `StoreError::Database` if the scan fails.
    pub fn delete_unused_snippets(&self, day_diff: i32) -> Result<SweepReport> {
        self.sweep(day_diff, Utc::now())?.into_result()
    }

    /// Run one sweep against a fixed clock and return the full report.
    ///
    /// Individual deletion failures are collected in the report instead of
    /// failing the call.
    ///
    /// # Errors
    ///
    /// Returns an error if `day_diff` is negative, a sweep is already running,
    /// or the scan fails.
    pub fn sweep(&self, day_diff: i32, now: DateTime<Utc>) -> Result<SweepReport> {
        if day_diff < 0 {
            return Err(StoreError::InvalidInput(format!(
                "day_diff must not be negative, got {day_diff}"
            )));
        }
        let _guard = SweepGuard::acquire(self.store.as_ref())?;

        let snippets = self.store.find_snippets(Some(Origin::PgUser))?;
        let mut report = SweepReport {
            scanned: snippets.len(),
            ..SweepReport::default()
        };

        for (id, entity) in snippets {
            if !is_expired(&entity, now, day_diff) {
                continue;
            }
            let still_expired = |current: &SnippetEntity| is_expired(current, now, day_diff);
            match self.store.delete_snippet_if(&id, &still_expired) {
                Ok(true) => {
                    tracing::debug!(snippet_id = %id, last_visited = %entity.last_visited, "Deleted unused snippet");
                    report.deleted.push(id);
                }
                Ok(false) => {
                    tracing::debug!(snippet_id = %id, "Snippet changed since scan, keeping it");
                    report.skipped += 1;
                }
                Err(e) => {
                    tracing::warn!(snippet_id = %id, error = %e, "Failed to delete unused snippet");
                    report.failed.push(id);
                }
            }
        }

        tracing::info!(
            day_diff,
            scanned = report.scanned,
            deleted = report.deleted.len(),
            failed = report.failed.len(),
            skipped = report.skipped,
            "Retention sweep finished"
        );

        Ok(report)
    }
}

/// Holds the store's sweep mark for the duration of a sweep.
struct SweepGuard<'a, S: Store + ?Sized>(&'a S);

impl<'a, S: Store + ?Sized> SweepGuard<'a, S> {
    fn acquire(store: &'a S) -> Result<Self> {
        if !store.try_begin_sweep() {
            return Err(StoreError::SweepInProgress);
        }
        Ok(Self(store))
    }
}

impl<S: Store + ?Sized> Drop for SweepGuard<'_, S> {
    fn drop(&mut self) {
        self.0.end_sweep();
    }
}
