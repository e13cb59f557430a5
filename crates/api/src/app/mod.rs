//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: the CRM service and token issuer shared by every handler
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::{get, post}, Extension, Router};
use tower::ServiceBuilder;

use lodgex_infra::{Config, ServiceResult};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: &Config) -> ServiceResult<Router> {
    let services = Arc::new(services::build_services(config).await?);
    Ok(router(services, &config.jwt_secret))
}

/// Router over already-built services.
pub fn router(services: Arc<AppServices>, jwt_secret: &str) -> Router {
    let jwt = Arc::new(lodgex_auth::Hs256JwtValidator::new(jwt_secret.as_bytes()));
    let auth_state = middleware::AuthState { jwt };

    // Protected routes: require a valid bearer token.
    let protected = routes::router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/auth/login", post(routes::session::login))
        .merge(protected)
        .layer(ServiceBuilder::new().layer(Extension(services)))
}
