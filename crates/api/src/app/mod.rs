//! HTTP application wiring (axum router + service construction).
//!
//! Layout:
//! - `services.rs`: store/service construction from [`Config`]
//! - `routes/`: HTTP handlers, one file per area
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{
    Extension, Router,
    routing::{get, post},
};

use oficina_auth::AccessGate;
use oficina_store::StoreError;

use crate::config::Config;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(config: &Config) -> Result<Router, StoreError> {
    let services = services::build_services(config)?;
    let gate = AccessGate::new(services.tokens.clone());
    Ok(router(Arc::new(services), gate))
}

fn router(services: Arc<services::AppServices>, gate: AccessGate) -> Router {
    let auth_state = middleware::AuthState {
        gate: Arc::new(gate),
    };

    // Protected routes: require a valid bearer token.
    let protected = Router::new()
        .route("/api/auth/verify", get(routes::auth::verify))
        .route("/api/auth/me", get(routes::auth::me))
        .nest("/api/data", routes::data::router())
        .route("/api/billing/summary", get(routes::billing::summary))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/logout", post(routes::auth::logout))
        .merge(protected)
        .layer(Extension(services))
}
