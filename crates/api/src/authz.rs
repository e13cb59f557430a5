//! Route-level authorization guard.
//!
//! Handlers call [`require`] before touching the service, so the service stays
//! auth-agnostic.

use axum::{http::StatusCode, response::Response};

use lodgex_auth::{authorize, Permission};

use crate::app::errors::json_error;
use crate::context::PrincipalContext;

/// Check `permission` for the caller; the error is a ready 403 response.
pub fn require(principal: &PrincipalContext, permission: &Permission) -> Result<(), Response> {
    authorize(principal.principal(), permission)
        .map_err(|e| json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string()))
}
