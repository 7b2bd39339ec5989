use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::constants::{ERR_DATE_FORMAT, ERR_MISSING_CREDENTIALS, ERR_NO_SESSION_TOKEN};

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] redb::Error),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("{}", ERR_MISSING_CREDENTIALS)]
    MissingCredentials,

    #[error("{}", ERR_NO_SESSION_TOKEN)]
    NoSessionToken,

    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired session")]
    InvalidSession,

    #[error("{}", ERR_DATE_FORMAT)]
    InvalidDate,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    UpdateFailure(String),
}

/// Implement IntoResponse to convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::Transaction(ref e) => {
                tracing::error!("Transaction error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::Table(ref e) => {
                tracing::error!("Table error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::Storage(ref e) => {
                tracing::error!("Storage error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::Commit(ref e) => {
                tracing::error!("Commit error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::Serialization(ref e) => {
                tracing::error!("Serialization error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::TaskJoin(ref e) => {
                tracing::error!("Task join error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::UsernameTaken => (StatusCode::CONFLICT, "Username already taken"),
            AppError::InvalidCredentials => {
                (StatusCode::BAD_REQUEST, "Invalid username or password")
            }
            AppError::MissingCredentials => (StatusCode::BAD_REQUEST, ERR_MISSING_CREDENTIALS),
            AppError::NoSessionToken => (StatusCode::BAD_REQUEST, ERR_NO_SESSION_TOKEN),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Authentication required"),
            AppError::InvalidSession => (StatusCode::UNAUTHORIZED, "Invalid or expired session"),
            AppError::InvalidDate => (StatusCode::BAD_REQUEST, ERR_DATE_FORMAT),
            AppError::InvalidInput(ref msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::UpdateFailure(ref msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;
