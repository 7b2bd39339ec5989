use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use chrono::Utc;
use redb::ReadableTable;
use serde::Deserialize;
use tokio::task;

use crate::auth::session_cookie;
use crate::constants::MSG_REGISTERED;
use crate::db::tables;
use crate::error::{AppError, Result};
use crate::models::{SessionRecord, UserRecord};
use crate::routes::MessageResponse;
use crate::security;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Create an account and log it in.
///
/// The username check and both inserts happen in one write
/// transaction, so two concurrent registrations of the same name
/// cannot both succeed. The response carries the session cookie, the
/// same as a login.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(AppError::MissingCredentials);
    }
    UserRecord::validate_username(&payload.username)?;
    UserRecord::validate_password(&payload.password)?;

    let db = state.db.clone();
    let username = payload.username.clone();
    let pepper = state.config.password_pepper.clone();
    let ttl_secs = state.config.session_ttl_secs;
    let token = security::generate_token();
    let stored_token = token.clone();

    task::spawn_blocking(move || -> Result<()> {
        let now = Utc::now().timestamp();
        let salt = security::generate_salt();
        let user = UserRecord {
            id: security::generate_user_id(),
            password_hash: security::hash_password(&payload.password, &salt, &pepper),
            salt,
            created_at: now,
        };
        let session = SessionRecord::new(user.id.clone(), payload.username.clone(), now, ttl_secs);

        let encoded_user = bincode::serialize(&user)?;
        let encoded_session = bincode::serialize(&session)?;

        let write_txn = db.begin_write()?;
        {
            let mut users = write_txn.open_table(tables::USERS)?;
            if users.get(payload.username.as_str())?.is_some() {
                return Err(AppError::UsernameTaken);
            }
            users.insert(payload.username.as_str(), encoded_user.as_slice())?;

            let mut sessions = write_txn.open_table(tables::SESSIONS)?;
            sessions.insert(stored_token.as_str(), encoded_session.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    })
    .await??;

    tracing::info!(username = %username, "registered new user");

    let cookie = session_cookie(&token, ttl_secs, state.config.secure_cookies());
    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(MessageResponse {
            message: MSG_REGISTERED,
        }),
    ))
}
