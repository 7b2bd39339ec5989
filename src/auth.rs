//! Session authentication.
//!
//! Sessions are opaque tokens delivered in an `HttpOnly` cookie and
//! stored server-side with an expiry. Expired sessions are deleted the
//! next time their token is presented.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};
use chrono::Utc;
use redb::ReadableTable;
use tokio::task;

use crate::constants::AUTH_COOKIE;
use crate::db::{tables, Db};
use crate::error::{AppError, Result};
use crate::models::SessionRecord;
use crate::security;
use crate::AppState;

// ===== Cookie handling =====

/// Build the `Set-Cookie` value carrying a session token.
///
/// Production deployments serve the frontend from another origin, so
/// the cookie needs `SameSite=None; Secure` there. Local development
/// runs over plain HTTP and omits both.
pub fn session_cookie(token: &str, ttl_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; Path=/; Max-Age={}",
        AUTH_COOKIE, token, ttl_secs
    );
    if secure {
        cookie.push_str("; Secure; SameSite=None");
    }
    cookie
}

/// Build the `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie(secure: bool) -> String {
    let mut cookie = format!("{}=; HttpOnly; Path=/; Max-Age=0", AUTH_COOKIE);
    if secure {
        cookie.push_str("; Secure; SameSite=None");
    }
    cookie
}

/// Extract the session token from the request's `Cookie` headers.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    for value in headers.get_all(header::COOKIE) {
        let Ok(raw) = value.to_str() else {
            continue;
        };
        for pair in raw.split(';') {
            let token = pair
                .trim()
                .strip_prefix(AUTH_COOKIE)
                .and_then(|rest| rest.strip_prefix('='));
            match token {
                Some(token) if !token.is_empty() => return Some(token.to_string()),
                _ => {}
            }
        }
    }
    None
}

// ===== Session storage =====

/// Create a session for a user and return its token.
pub async fn create_session(db: &Db, user_id: &str, username: &str, ttl_secs: i64) -> Result<String> {
    let db = db.clone();
    let user_id = user_id.to_string();
    let username = username.to_string();
    let token = security::generate_token();
    let stored_token = token.clone();

    task::spawn_blocking(move || -> Result<()> {
        let session = SessionRecord::new(user_id, username, Utc::now().timestamp(), ttl_secs);
        let encoded = bincode::serialize(&session)?;

        let write_txn = db.begin_write()?;
        {
            let mut sessions = write_txn.open_table(tables::SESSIONS)?;
            sessions.insert(stored_token.as_str(), encoded.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    })
    .await??;

    Ok(token)
}

/// Remove a session. Removing a token that does not exist is not an
/// error, so logout is idempotent.
pub async fn destroy_session(db: &Db, token: &str) -> Result<()> {
    let db = db.clone();
    let token = token.to_string();

    task::spawn_blocking(move || -> Result<()> {
        let write_txn = db.begin_write()?;
        {
            let mut sessions = write_txn.open_table(tables::SESSIONS)?;
            sessions.remove(token.as_str())?;
        }
        write_txn.commit()?;
        Ok(())
    })
    .await?
}

/// Look up a session by token.
///
/// Returns `None` for unknown or expired tokens. An expired session is
/// removed from storage on the way out.
pub async fn resolve_session(db: &Db, token: &str) -> Result<Option<SessionRecord>> {
    let db = db.clone();
    let token = token.to_string();

    task::spawn_blocking(move || -> Result<Option<SessionRecord>> {
        let session = {
            let read_txn = db.begin_read()?;
            let sessions = read_txn.open_table(tables::SESSIONS)?;
            match sessions.get(token.as_str())? {
                Some(guard) => bincode::deserialize::<SessionRecord>(guard.value())?,
                None => return Ok(None),
            }
        };

        if session.is_valid(Utc::now().timestamp()) {
            return Ok(Some(session));
        }

        let write_txn = db.begin_write()?;
        {
            let mut sessions = write_txn.open_table(tables::SESSIONS)?;
            sessions.remove(token.as_str())?;
        }
        write_txn.commit()?;

        Ok(None)
    })
    .await?
}

// ===== Request extractor =====

/// The authenticated user behind a request.
///
/// Extracting this from a request without a cookie rejects with 401,
/// as does a token that is unknown or expired.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub username: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let token = token_from_headers(&parts.headers).ok_or(AppError::Unauthorized)?;
        let session = resolve_session(&state.db, &token)
            .await?
            .ok_or(AppError::InvalidSession)?;

        Ok(AuthUser {
            user_id: session.user_id,
            username: session.username,
        })
    }
}
