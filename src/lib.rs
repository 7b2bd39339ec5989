//! Backend for a pomodoro time tracker.
//!
//! Users register and log in with cookie sessions, submit the time
//! they worked each day, and read back daily, week-to-date and
//! month-to-date totals. Everything is stored in a single embedded
//! database file.

pub mod auth;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod records;
pub mod routes;
pub mod security;

use axum::routing::{delete, get, post};
use axum::Router;

pub use config::Config;
pub use db::{open_database, Db};
pub use error::{AppError, Result};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub config: Config,
}

impl AppState {
    pub fn new(db: Db, config: Config) -> Self {
        AppState { db, config }
    }
}

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health_check))
        .route("/register", post(routes::register))
        .route("/login", post(routes::login))
        .route("/logout", delete(routes::logout))
        .route("/checkCookie", get(routes::check_cookie))
        .route("/sendRecord", post(routes::send_record))
        .route("/main-stats", get(routes::main_stats))
        .with_state(state)
}
