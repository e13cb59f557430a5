use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use lodgex_auth::permissions::{BOOKINGS_READ, BOOKINGS_WRITE};
use lodgex_bookings::{BookingUpdate, NewBooking};
use lodgex_core::BookingId;

use crate::app::routes::common::{list, respond};
use crate::app::{errors, services::AppServices};
use crate::authz::require;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route("/:id", get(get_booking).put(update_booking))
}

pub async fn list_bookings(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &BOOKINGS_READ) {
        return resp;
    }
    list(services.crm.list_bookings())
}

pub async fn get_booking(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &BOOKINGS_READ) {
        return resp;
    }
    let id: BookingId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    respond(StatusCode::OK, services.crm.get_booking(id))
}

/// POST /bookings
///
/// 409 when the dates overlap a live booking on the same property.
pub async fn create_booking(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<NewBooking>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &BOOKINGS_WRITE) {
        return resp;
    }
    respond(
        StatusCode::CREATED,
        services.crm.create_booking(principal.name(), body).await,
    )
}

pub async fn update_booking(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<BookingUpdate>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &BOOKINGS_WRITE) {
        return resp;
    }
    let id: BookingId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    respond(
        StatusCode::OK,
        services.crm.update_booking(principal.name(), id, body).await,
    )
}
