use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use chrono::{TimeZone, Utc};
use tracing::{info, warn};

use lodgex_core::UserId;

use crate::app::{dto, errors, services::AppServices};
use crate::context::PrincipalContext;

/// POST /auth/login
///
/// Dev login: issues a token for the requested role, acting as that role's demo user.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    let name = body.role.demo_user_name();
    let (token, claims) = match services.tokens.issue(UserId::new(), name, body.role, Utc::now()) {
        Ok(issued) => issued,
        Err(e) => {
            warn!(error = %e, "token issue failed");
            return errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "token_error", e.to_string());
        }
    };

    if let Err(e) = services.crm.record_login(body.role).await {
        return errors::service_error_to_response(e);
    }
    info!(role = body.role.as_str(), "dev login");

    let expires_at = Utc.timestamp_opt(claims.exp, 0).single().unwrap_or_else(Utc::now);
    (
        StatusCode::OK,
        Json(dto::LoginResponse {
            token,
            expires_at,
            user: dto::UserView {
                id: claims.sub,
                name: claims.name,
                role: claims.role,
            },
        }),
    )
        .into_response()
}

/// POST /auth/logout
///
/// Tokens are stateless; this only records the logout.
pub async fn logout(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    match services.crm.record_logout(principal.name()).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
