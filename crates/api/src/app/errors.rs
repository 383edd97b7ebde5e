use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use serde_json::json;

use bazaar_core::DomainError;

/// Map a domain error to an HTTP response.
///
/// The mapping kind → status lives only here; the services raise errors at
/// the point of detection and never translate them themselves. `Internal`
/// detail is logged and replaced with a generic message.
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, msg),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, msg),
        DomainError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, msg),
        DomainError::Internal(detail) => {
            tracing::error!(%detail, "internal error");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
        }
    }
}

/// Structured error body: status code, message, timestamp.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "status": status.as_u16(),
            "message": message.into(),
            "time": Utc::now().to_rfc3339(),
        })),
    )
        .into_response()
}
