//! Retention policy for user snippets.
//!
//! The sweeper evaluates this predicate over scanned snippets; keeping it free
//! of any store dependency lets the boundary cases be tested directly.

use chrono::{DateTime, Utc};

use crate::{Origin, SnippetEntity};

/// Whole days elapsed from `last_visited` to `now`, floored. Zero for visits in the future.
#[must_use]
pub fn age_in_days(last_visited: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - last_visited).num_days().max(0)
}

/// Whether a snippet is due for deletion at `now` with a retention window of `day_diff` days.
///
/// Only `PG_USER` snippets expire. The boundary is inclusive: a snippet last
/// visited exactly `day_diff` days ago is expired. A snippet visited in the
/// future never is.
#[must_use]
pub fn is_expired(snippet: &SnippetEntity, now: DateTime<Utc>, day_diff: i32) -> bool {
    if snippet.origin != Origin::PgUser || snippet.last_visited > now {
        return false;
    }
    age_in_days(snippet.last_visited, now) >= i64::from(day_diff)
}
