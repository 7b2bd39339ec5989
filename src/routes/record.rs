use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::auth::AuthUser;
use crate::error::Result;
use crate::records::update_record;
use crate::routes::validation::{parse_time, validate_date};
use crate::routes::MessageResponse;
use crate::AppState;

/// A work submission. `time` arrives as a number or numeric string
/// depending on the client; `pomodoro` is a free-form flag that only
/// counts when it is the string `"true"`.
#[derive(Debug, Deserialize)]
pub struct SendRecordRequest {
    #[serde(default)]
    pub time: Value,
    #[serde(default)]
    pub pomodoro: Value,
    #[serde(default)]
    pub date: String,
}

/// Record work against the authenticated user's day.
pub async fn send_record(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<SendRecordRequest>,
) -> Result<Json<MessageResponse>> {
    validate_date(&payload.date)?;
    let time_sec = parse_time(&payload.time)?;

    let message = update_record(
        &state.db,
        &user.user_id,
        &payload.date,
        time_sec,
        payload.pomodoro.as_str(),
    )
    .await?;

    tracing::debug!(
        username = %user.username,
        date = %payload.date,
        time_sec,
        "recorded submission"
    );

    Ok(Json(MessageResponse { message }))
}
