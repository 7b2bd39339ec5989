use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::constants::DATE_FORMAT;
use crate::error::Result;
use crate::records::RecordStore;

/// Aggregated totals for one user as of a reference date.
///
/// Field names follow the wire format the frontend consumes.
#[derive(Debug, Serialize)]
pub struct StatsSummary {
    pub username: String,
    #[serde(rename = "secToday")]
    pub sec_today: i64,
    #[serde(rename = "pomoToday")]
    pub pomo_today: i64,
    #[serde(rename = "secWeek")]
    pub sec_week: i64,
    #[serde(rename = "pomoWeek")]
    pub pomo_week: i64,
    #[serde(rename = "secMonth")]
    pub sec_month: i64,
    #[serde(rename = "pomoMonth")]
    pub pomo_month: i64,
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// Compute daily, week-to-date and month-to-date totals for a user.
///
/// The week runs Monday through `date`, the month from the 1st through
/// `date`. Days after `date` never contribute, even when records for
/// them exist.
pub async fn get_stats(
    store: &dyn RecordStore,
    user_id: &str,
    username: &str,
    date: NaiveDate,
) -> Result<StatsSummary> {
    let day = date.format(DATE_FORMAT).to_string();
    let week_lo = week_start(date).format(DATE_FORMAT).to_string();
    let month_lo = month_start(date).format(DATE_FORMAT).to_string();

    let today = store
        .find_by_user_and_date(user_id, &day)
        .await?
        .unwrap_or_default();
    let week = store.sum_in_range(user_id, &week_lo, &day).await?;
    let month = store.sum_in_range(user_id, &month_lo, &day).await?;

    Ok(StatsSummary {
        username: username.to_string(),
        sec_today: today.time_sec,
        pomo_today: today.pomodoros,
        sec_week: week.time_sec,
        pomo_week: week.pomodoros,
        sec_month: month.time_sec,
        pomo_month: month.pomodoros,
    })
}
