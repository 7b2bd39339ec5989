use crate::constants::{ERR_RECORD_WRITE, MSG_RECORD_CREATED, MSG_RECORD_UPDATED};
use crate::error::{AppError, Result};
use crate::records::{RecordStore, UpsertOutcome};

/// Apply one submission to a user's record for a day.
///
/// The pomodoro flag counts as a completed session only when it is the
/// literal string `"true"`. Anything else, including `"True"` or a
/// boolean, adds zero. Returns the message describing whether a record
/// was created or an existing one updated.
pub async fn update_record(
    store: &dyn RecordStore,
    user_id: &str,
    date: &str,
    time_sec: i64,
    pomodoro: Option<&str>,
) -> Result<&'static str> {
    let pomodoros = i64::from(matches!(pomodoro, Some("true")));

    match store
        .upsert_increment(user_id, date, time_sec, pomodoros)
        .await
    {
        Ok(UpsertOutcome::Created) => Ok(MSG_RECORD_CREATED),
        Ok(UpsertOutcome::Updated) => Ok(MSG_RECORD_UPDATED),
        Err(e) => {
            tracing::error!("Failed to upsert time record: {:?}", e);
            Err(AppError::UpdateFailure(ERR_RECORD_WRITE.to_string()))
        }
    }
}
