use serde::{Deserialize, Serialize};

/// Accumulated work for one user on one calendar day.
///
/// There is exactly one record per (user, date) pair. Submissions for
/// a day a user already has a record for add to these totals instead
/// of creating a second row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeRecord {
    /// Total seconds of tracked work for the day.
    pub time_sec: i64,
    /// Number of completed pomodoro sessions for the day.
    pub pomodoros: i64,
}
