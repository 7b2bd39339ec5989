use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::error::Result;
use crate::records::{get_stats, StatsSummary};
use crate::routes::validation::validate_date;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    #[serde(default)]
    pub date: String,
}

/// Daily, week-to-date and month-to-date totals for the authenticated
/// user, relative to the client-supplied date.
///
/// The client sends its own local date; the server clock never decides
/// which day a request belongs to.
pub async fn main_stats(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsSummary>> {
    let date = validate_date(&query.date)?;

    let stats = get_stats(&state.db, &user.user_id, &user.username, date).await?;

    Ok(Json(stats))
}
