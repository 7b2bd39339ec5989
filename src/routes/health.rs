use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::AppState;

/// Liveness probe.
///
/// Opens a read transaction so a wedged database shows up as unhealthy
/// instead of a hollow 200. Never rejects; monitoring reads the body.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let db = state.db.clone();
    let db_status = tokio::task::spawn_blocking(move || match db.begin_read() {
        Ok(_) => "connected",
        Err(e) => {
            tracing::error!("Database health check failed: {:?}", e);
            "disconnected"
        }
    })
    .await
    .unwrap_or("error");

    Json(json!({
        "status": if db_status == "connected" { "healthy" } else { "unhealthy" },
        "database": db_status,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
