use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;

use crate::database::manager::DatabaseManager;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/healthz", get(healthz))
}

/// Liveness plus a database ping
async fn healthz() -> impl IntoResponse {
    match DatabaseManager::health_check().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "ok": true, "database": "ok" }))),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "ok": false, "database": e.to_string() })),
        ),
    }
}
