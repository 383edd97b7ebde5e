use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::app::errors;

pub async fn health() -> axum::response::Response {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"}))).into_response()
}

/// Fallback for unknown paths, so every error carries the same body shape.
pub async fn unknown_path() -> axum::response::Response {
    errors::json_error(StatusCode::NOT_FOUND, "no such resource")
}
