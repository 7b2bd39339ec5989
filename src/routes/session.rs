use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use redb::ReadableTable;
use serde::Deserialize;
use tokio::task;

use crate::auth::{self, clear_session_cookie, session_cookie, token_from_headers, AuthUser};
use crate::constants::{MSG_COOKIE_SET, MSG_LOGGED_IN, MSG_LOGGED_OUT};
use crate::db::{tables, Db};
use crate::error::{AppError, Result};
use crate::models::UserRecord;
use crate::routes::MessageResponse;
use crate::security;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

async fn find_user(db: &Db, username: &str) -> Result<Option<UserRecord>> {
    let db = db.clone();
    let username = username.to_string();

    task::spawn_blocking(move || -> Result<Option<UserRecord>> {
        let read_txn = db.begin_read()?;
        let users = read_txn.open_table(tables::USERS)?;

        match users.get(username.as_str())? {
            Some(guard) => {
                let user: UserRecord = bincode::deserialize(guard.value())?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    })
    .await?
}

/// Authenticate a user and hand out a session cookie.
///
/// Unknown usernames and wrong passwords produce the same rejection,
/// so the endpoint does not reveal which usernames exist.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(AppError::MissingCredentials);
    }

    let user = find_user(&state.db, &payload.username)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !security::verify_password(
        &payload.password,
        &user.salt,
        &state.config.password_pepper,
        &user.password_hash,
    ) {
        return Err(AppError::InvalidCredentials);
    }

    let token = auth::create_session(
        &state.db,
        &user.id,
        &payload.username,
        state.config.session_ttl_secs,
    )
    .await?;

    tracing::info!(username = %payload.username, "user logged in");

    let cookie = session_cookie(
        &token,
        state.config.session_ttl_secs,
        state.config.secure_cookies(),
    );
    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(MessageResponse {
            message: MSG_LOGGED_IN,
        }),
    ))
}

/// End the current session and clear the cookie.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let token = token_from_headers(&headers).ok_or(AppError::NoSessionToken)?;

    auth::destroy_session(&state.db, &token).await?;

    let cookie = clear_session_cookie(state.config.secure_cookies());
    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(MessageResponse {
            message: MSG_LOGGED_OUT,
        }),
    ))
}

/// Report whether the presented session cookie is still good.
///
/// The `AuthUser` extractor does the actual checking; reaching the
/// handler body means the session is valid.
pub async fn check_cookie(_user: AuthUser) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: MSG_COOKIE_SET,
    })
}
