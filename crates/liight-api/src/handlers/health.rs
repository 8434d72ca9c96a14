//! Liveness and connectivity checks.

use axum::{http::StatusCode, response::IntoResponse, Json};

/// Liveness check: the process is running.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "ok", "message": "Server is running" })),
    )
}

/// Lets the site confirm the API base URL is reachable.
pub async fn connectivity_check() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "Backend connected!" }))
}
