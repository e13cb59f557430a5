use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use lodgex_infra::ServiceResult;

use crate::app::errors;

/// `status` with the JSON body, or the mapped service error.
pub fn respond<T: Serialize>(status: StatusCode, result: ServiceResult<T>) -> axum::response::Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// `{"items": [...]}` listing.
pub fn list<T: Serialize>(result: ServiceResult<Vec<T>>) -> axum::response::Response {
    match result {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// 204 on success.
pub fn no_content(result: ServiceResult<()>) -> axum::response::Response {
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
