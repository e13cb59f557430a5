use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};

use lodgex_auth::permissions::{DASHBOARD_READ, FINANCE_READ, FINANCE_WRITE, IMPORT};
use lodgex_core::FinanceRecordId;
use lodgex_finance::NewFinanceRecord;
use lodgex_infra::ImportBatch;

use crate::app::routes::common::{list, no_content, respond};
use crate::app::{errors, services::AppServices};
use crate::authz::require;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_finance).post(create_record))
        .route("/:id", delete(delete_record))
}

pub async fn list_finance(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &FINANCE_READ) {
        return resp;
    }
    list(services.crm.list_finance())
}

pub async fn create_record(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<NewFinanceRecord>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &FINANCE_WRITE) {
        return resp;
    }
    respond(
        StatusCode::CREATED,
        services.crm.create_finance_record(principal.name(), body).await,
    )
}

pub async fn delete_record(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &FINANCE_WRITE) {
        return resp;
    }
    let id: FinanceRecordId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    no_content(services.crm.delete_finance_record(principal.name(), id).await)
}

/// POST /import
///
/// Body: `{"bookings": [...], "finance": [...]}` with complete records.
pub async fn import(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<ImportBatch>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &IMPORT) {
        return resp;
    }
    respond(StatusCode::OK, services.crm.import(principal.name(), body).await)
}

pub async fn dashboard(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &DASHBOARD_READ) {
        return resp;
    }
    respond(StatusCode::OK, services.crm.dashboard())
}
