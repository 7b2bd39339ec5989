//! Core record operations: submitting work for a day and aggregating
//! daily, weekly and monthly totals.
//!
//! Both operations run against the [`RecordStore`] trait rather than a
//! concrete database, so the arithmetic can be tested without touching
//! disk. The production implementation lives in `db::records`.

mod stats;
mod upsert;

pub use stats::{get_stats, month_start, week_start, StatsSummary};
pub use upsert::update_record;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::TimeRecord;

/// Whether an upsert created a fresh record or added to an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// Storage backend for per-day time records.
///
/// Dates are `YYYY-MM-DD` strings, which sort lexicographically in
/// chronological order. Implementations must make `upsert_increment`
/// atomic per (user, date) key: two concurrent submissions for the
/// same day must both land in the stored totals.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch the record for one user on one date, if any.
    async fn find_by_user_and_date(
        &self,
        user_id: &str,
        date: &str,
    ) -> Result<Option<TimeRecord>>;

    /// Add the given amounts to the record for (user, date), creating
    /// the record if it does not exist yet.
    async fn upsert_increment(
        &self,
        user_id: &str,
        date: &str,
        time_sec: i64,
        pomodoros: i64,
    ) -> Result<UpsertOutcome>;

    /// Sum all records for one user across an inclusive date range.
    async fn sum_in_range(&self, user_id: &str, start: &str, end: &str) -> Result<TimeRecord>;
}
