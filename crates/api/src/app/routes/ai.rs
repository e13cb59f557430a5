use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use lodgex_auth::permissions::AI_USE;

use crate::app::routes::common::respond;
use crate::app::{dto, services::AppServices};
use crate::authz::require;
use crate::context::PrincipalContext;

/// POST /ai/insight
///
/// Always 200 with some text; the assistant falls back to a canned reply.
pub async fn insight(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::InsightRequest>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &AI_USE) {
        return resp;
    }
    respond(
        StatusCode::OK,
        services
            .crm
            .insight(body.subject)
            .await
            .map(|text| dto::TextResponse { text }),
    )
}

pub async fn guest_email(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::GuestEmailRequest>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &AI_USE) {
        return resp;
    }
    let text = services.crm.draft_guest_email(&body.guest_name, body.kind).await;
    (StatusCode::OK, Json(dto::TextResponse { text })).into_response()
}
