use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};

use lodgex_auth::permissions::{BOOKINGS_WRITE, INTEGRATIONS_READ, INTEGRATIONS_WRITE};
use lodgex_core::IntegrationId;

use crate::app::routes::common::{list, respond};
use crate::app::{dto, errors, services::AppServices};
use crate::authz::require;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_integrations))
        .route("/sync", post(sync))
        .route("/:id", put(set_status))
}

pub async fn list_integrations(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &INTEGRATIONS_READ) {
        return resp;
    }
    list(services.crm.list_integrations())
}

/// PUT /integrations/:id with `{"status": "Connected" | "Disconnected"}`
pub async fn set_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::IntegrationStatusRequest>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &INTEGRATIONS_WRITE) {
        return resp;
    }
    let id: IntegrationId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    respond(
        StatusCode::OK,
        services
            .crm
            .set_integration_status(principal.name(), id, body.status)
            .await,
    )
}

/// POST /integrations/sync
///
/// Pulls one booking from a connected channel. It lands as a normal booking,
/// so both integration and booking write access are required.
pub async fn sync(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::SyncRequest>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &INTEGRATIONS_WRITE) {
        return resp;
    }
    if let Err(resp) = require(&principal, &BOOKINGS_WRITE) {
        return resp;
    }
    respond(
        StatusCode::CREATED,
        services.crm.sync_channel(principal.name(), &body.integration).await,
    )
}
