use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use tracing::error;

use lodgex_core::DomainError;
use lodgex_infra::{RemoteError, ServiceError};

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Domain(domain) => domain_error_to_response(domain),
        ServiceError::Remote(RemoteError::Conflict(msg)) => json_error(StatusCode::CONFLICT, "conflict", msg),
        ServiceError::Remote(e) => {
            error!(error = %e, "remote store error");
            json_error(StatusCode::BAD_GATEWAY, "remote_error", e.to_string())
        }
        ServiceError::Feed(e) => json_error(StatusCode::BAD_GATEWAY, "feed_unavailable", e.to_string()),
        ServiceError::Store(e) => {
            error!(error = %e, "working set store error");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound(what) => json_error(StatusCode::NOT_FOUND, "not_found", format!("{what} not found")),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
        DomainError::Unauthorized => json_error(StatusCode::FORBIDDEN, "unauthorized", "unauthorized"),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Parse a path id, answering 400 on garbage.
pub fn parse_id<T>(raw: &str) -> Result<T, axum::response::Response>
where
    T: core::str::FromStr<Err = DomainError>,
{
    raw.parse().map_err(domain_error_to_response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodgex_core::BookingId;

    #[test]
    fn domain_errors_map_to_statuses() {
        let cases = [
            (DomainError::validation("x"), StatusCode::BAD_REQUEST),
            (DomainError::invalid_id("x"), StatusCode::BAD_REQUEST),
            (DomainError::not_found("booking"), StatusCode::NOT_FOUND),
            (DomainError::conflict("x"), StatusCode::CONFLICT),
            (DomainError::invariant("x"), StatusCode::UNPROCESSABLE_ENTITY),
            (DomainError::Unauthorized, StatusCode::FORBIDDEN),
        ];
        for (err, status) in cases {
            assert_eq!(service_error_to_response(err.into()).status(), status);
        }
    }

    #[test]
    fn remote_conflict_is_409() {
        let resp = service_error_to_response(RemoteError::Conflict("overlap".to_string()).into());
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn bad_ids_are_400() {
        let err = parse_id::<BookingId>("not-a-uuid").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
