use std::sync::Arc;

use axum::{
    Json,
    extract::Extension,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::context::AuthContext;

/// `POST /api/auth/register`
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CredentialsRequest>,
) -> axum::response::Response {
    let Some(email) = body.email else {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", "email is required");
    };
    let Some(password) = body.password else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "password is required",
        );
    };
    if !email.contains('@') {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "invalid email format",
        );
    }

    match services.auth.register(&email, &password) {
        Ok(identity) => {
            (StatusCode::CREATED, Json(dto::identity_to_json(&identity))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// `POST /api/auth/login`
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CredentialsRequest>,
) -> axum::response::Response {
    let (Some(email), Some(password)) = (body.email, body.password) else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "email and password are required",
        );
    };

    match services.auth.login(&email, &password) {
        Ok(login) => (StatusCode::OK, Json(dto::login_to_json(&login))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// `POST /api/auth/logout`
///
/// Tokens are stateless, so logout is client-side discard; the server only
/// acknowledges (and logs the subject when a token is present).
pub async fn logout(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
) -> axum::response::Response {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    if let Some(user_id) = token.and_then(|t| services.auth.identity_of(t.trim())) {
        tracing::info!(user_id = %user_id, "logout");
    }

    Json(serde_json::json!({
        "message": "logout successful; discard the token on the client",
    }))
    .into_response()
}

/// `GET /api/auth/verify` — the middleware already validated the token.
pub async fn verify(Extension(ctx): Extension<AuthContext>) -> axum::response::Response {
    Json(serde_json::json!({
        "valid": true,
        "userId": ctx.user_id(),
        "email": ctx.email(),
    }))
    .into_response()
}

/// `GET /api/auth/me`
pub async fn me(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<AuthContext>,
) -> axum::response::Response {
    match services.auth.profile(ctx.user_id()) {
        Ok(identity) => Json(dto::identity_to_json(&identity)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
