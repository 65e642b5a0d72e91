use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use oficina_auth::AccessGate;

use crate::app::errors;
use crate::context::AuthContext;

#[derive(Clone)]
pub struct AuthState {
    pub gate: Arc<AccessGate>,
}

/// Verify the bearer token and insert an [`AuthContext`] extension, or
/// answer 401 without reaching the handler. The gate never discloses why a
/// token was rejected.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match state.gate.claims(header) {
        Ok(claims) => {
            req.extensions_mut()
                .insert(AuthContext::new(claims.sub, claims.email));
            next.run(req).await
        }
        Err(_) => errors::unauthorized_response(),
    }
}
