use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use lodgex_auth::permissions::{BOOKINGS_READ, PROPERTIES_READ, PROPERTIES_WRITE};
use lodgex_core::{DocumentId, PropertyId};
use lodgex_properties::{NewProperty, NewPropertyDocument, PropertyUpdate};

use crate::app::routes::common::{list, no_content, respond};
use crate::app::{dto, errors, services::AppServices};
use crate::authz::require;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_properties).post(create_property))
        .route("/:id", get(get_property).put(update_property).delete(delete_property))
        .route("/:id/availability", get(availability))
        .route("/:id/documents", get(list_documents).post(add_document))
}

pub async fn list_properties(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &PROPERTIES_READ) {
        return resp;
    }
    list(services.crm.list_properties())
}

pub async fn get_property(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &PROPERTIES_READ) {
        return resp;
    }
    let id: PropertyId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    respond(StatusCode::OK, services.crm.get_property(id))
}

pub async fn create_property(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<NewProperty>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &PROPERTIES_WRITE) {
        return resp;
    }
    respond(
        StatusCode::CREATED,
        services.crm.create_property(principal.name(), body).await,
    )
}

pub async fn update_property(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<PropertyUpdate>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &PROPERTIES_WRITE) {
        return resp;
    }
    let id: PropertyId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    respond(
        StatusCode::OK,
        services.crm.update_property(principal.name(), id, body).await,
    )
}

/// DELETE /properties/:id
///
/// Moves the property into the archive and returns the archive entry.
pub async fn delete_property(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &PROPERTIES_WRITE) {
        return resp;
    }
    let id: PropertyId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    respond(StatusCode::OK, services.crm.delete_property(principal.name(), id).await)
}

/// GET /properties/:id/availability?start=YYYY-MM-DD&end=YYYY-MM-DD
pub async fn availability(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Query(query): Query<dto::AvailabilityQuery>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &BOOKINGS_READ) {
        return resp;
    }
    let id: PropertyId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    respond(
        StatusCode::OK,
        services.crm.check_availability(id, query.start, query.end),
    )
}

pub async fn list_documents(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &PROPERTIES_READ) {
        return resp;
    }
    let id: PropertyId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    list(services.crm.list_documents(id))
}

pub async fn add_document(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<NewPropertyDocument>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &PROPERTIES_WRITE) {
        return resp;
    }
    let id: PropertyId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    respond(
        StatusCode::CREATED,
        services.crm.add_document(principal.name(), id, body).await,
    )
}

pub async fn delete_document(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &PROPERTIES_WRITE) {
        return resp;
    }
    let id: DocumentId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    no_content(services.crm.delete_document(principal.name(), id).await)
}
