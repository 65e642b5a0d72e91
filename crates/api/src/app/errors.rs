use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use oficina_core::DomainError;

/// Map a typed failure to its HTTP response.
///
/// Storage detail stays in the logs; the caller gets a generic message,
/// never a raw diagnostic.
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        DomainError::Authentication(msg) => {
            json_error(StatusCode::UNAUTHORIZED, "authentication_failed", msg)
        }
        DomainError::Unauthorized => unauthorized_response(),
        DomainError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, "not_found", msg),
        DomainError::Storage(detail) => {
            tracing::error!(detail = %detail, "storage failure");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage_error",
                "internal storage failure",
            )
        }
    }
}

pub fn unauthorized_response() -> axum::response::Response {
    json_error(
        StatusCode::UNAUTHORIZED,
        "unauthorized",
        "authentication required: send a valid token as 'Authorization: Bearer {token}'",
    )
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
