use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};

use lodgex_activity::{NewAuditEntry, NewTemplate, TemplateVars};
use lodgex_auth::permissions::{
    ARCHIVE_READ, ARCHIVE_WRITE, AUDIT_READ, AUDIT_WRITE, TEMPLATES_READ, TEMPLATES_WRITE,
};
use lodgex_core::{ArchiveId, NotificationId, TemplateId};

use crate::app::routes::common::{list, no_content, respond};
use crate::app::routes::system;
use crate::app::{dto, errors, services::AppServices};
use crate::authz::require;
use crate::context::PrincipalContext;

pub fn audit_router() -> Router {
    Router::new().route("/", get(list_audit).post(record_audit))
}

/// Notifications belong to the whole team; any signed-in user may read and clear them.
pub fn notifications_router() -> Router {
    Router::new()
        .route("/", get(list_notifications))
        .route("/stream", get(system::stream))
        .route("/read-all", post(mark_all_read))
        .route("/:id/read", post(mark_read))
}

pub fn archive_router() -> Router {
    Router::new()
        .route("/", get(list_archive))
        .route("/:id", delete(delete_from_archive))
        .route("/:id/restore", post(restore))
}

pub fn templates_router() -> Router {
    Router::new()
        .route("/", get(list_templates).post(create_template))
        .route("/:id", delete(delete_template))
        .route("/:id/render", post(render_template))
}

// -------------------------
// Audit
// -------------------------

pub async fn list_audit(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &AUDIT_READ) {
        return resp;
    }
    list(services.crm.list_audit())
}

pub async fn record_audit(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<NewAuditEntry>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &AUDIT_WRITE) {
        return resp;
    }
    respond(
        StatusCode::ACCEPTED,
        services.crm.record_audit(principal.name(), body).await,
    )
}

// -------------------------
// Notifications
// -------------------------

pub async fn list_notifications(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    list(services.crm.list_notifications())
}

pub async fn mark_read(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: NotificationId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    respond(StatusCode::OK, services.crm.mark_notification_read(id).await)
}

pub async fn mark_all_read(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.crm.mark_all_notifications_read().await {
        Ok(updated) => (StatusCode::OK, Json(dto::CountResponse { updated })).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

// -------------------------
// Archive
// -------------------------

pub async fn list_archive(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &ARCHIVE_READ) {
        return resp;
    }
    list(services.crm.list_archive())
}

/// POST /archive/:id/restore
///
/// 409 if a restored booking would now overlap a live one.
pub async fn restore(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &ARCHIVE_WRITE) {
        return resp;
    }
    let id: ArchiveId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    respond(
        StatusCode::OK,
        services.crm.restore_from_archive(principal.name(), id).await,
    )
}

pub async fn delete_from_archive(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &ARCHIVE_WRITE) {
        return resp;
    }
    let id: ArchiveId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    no_content(services.crm.delete_from_archive(principal.name(), id).await)
}

// -------------------------
// Templates
// -------------------------

pub async fn list_templates(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &TEMPLATES_READ) {
        return resp;
    }
    list(services.crm.list_templates())
}

pub async fn create_template(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<NewTemplate>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &TEMPLATES_WRITE) {
        return resp;
    }
    respond(
        StatusCode::CREATED,
        services.crm.create_template(principal.name(), body).await,
    )
}

pub async fn delete_template(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &TEMPLATES_WRITE) {
        return resp;
    }
    let id: TemplateId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    no_content(services.crm.delete_template(principal.name(), id).await)
}

pub async fn render_template(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(vars): Json<TemplateVars>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &TEMPLATES_READ) {
        return resp;
    }
    let id: TemplateId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    respond(
        StatusCode::OK,
        services
            .crm
            .render_template(id, &vars)
            .map(|text| dto::TextResponse { text }),
    )
}
