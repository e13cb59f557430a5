use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use lodgex_auth::permissions::{
    GUESTS_READ, GUESTS_WRITE, OWNERS_READ, OWNERS_STATEMENT, OWNERS_WRITE, STAFF_READ, STAFF_WRITE,
};
use lodgex_core::{OwnerId, StaffId};
use lodgex_parties::{NewGuest, NewOwner, NewStaffMember, StaffUpdate};

use crate::app::routes::common::{list, respond};
use crate::app::{errors, services::AppServices};
use crate::authz::require;
use crate::context::PrincipalContext;

pub fn guests_router() -> Router {
    Router::new().route("/", get(list_guests).post(create_guest))
}

pub fn owners_router() -> Router {
    Router::new()
        .route("/", get(list_owners).post(create_owner))
        .route("/:id/statement", get(owner_statement))
}

pub fn staff_router() -> Router {
    Router::new()
        .route("/", get(list_staff).post(create_staff))
        .route("/:id", put(update_staff))
}

// -------------------------
// Guests
// -------------------------

pub async fn list_guests(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &GUESTS_READ) {
        return resp;
    }
    list(services.crm.list_guests())
}

pub async fn create_guest(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<NewGuest>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &GUESTS_WRITE) {
        return resp;
    }
    respond(StatusCode::CREATED, services.crm.create_guest(principal.name(), body).await)
}

// -------------------------
// Owners
// -------------------------

pub async fn list_owners(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &OWNERS_READ) {
        return resp;
    }
    list(services.crm.list_owners())
}

pub async fn create_owner(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<NewOwner>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &OWNERS_WRITE) {
        return resp;
    }
    respond(StatusCode::CREATED, services.crm.create_owner(principal.name(), body).await)
}

/// GET /owners/:id/statement
pub async fn owner_statement(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &OWNERS_STATEMENT) {
        return resp;
    }
    let id: OwnerId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    respond(StatusCode::OK, services.crm.owner_statement(id))
}

// -------------------------
// Staff
// -------------------------

pub async fn list_staff(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &STAFF_READ) {
        return resp;
    }
    list(services.crm.list_staff())
}

pub async fn create_staff(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<NewStaffMember>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &STAFF_WRITE) {
        return resp;
    }
    respond(StatusCode::CREATED, services.crm.create_staff(principal.name(), body).await)
}

pub async fn update_staff(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<StaffUpdate>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &STAFF_WRITE) {
        return resp;
    }
    let id: StaffId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    respond(StatusCode::OK, services.crm.update_staff(principal.name(), id, body).await)
}
