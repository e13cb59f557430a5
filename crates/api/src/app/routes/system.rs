use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::sse::{Event as SseEvent, KeepAlive, Sse},
    response::IntoResponse,
    Json,
};
use tokio_stream::{wrappers::BroadcastStream, StreamExt};
use tracing::debug;

use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(principal): Extension<PrincipalContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "id": principal.user_id().to_string(),
        "name": principal.name(),
        "role": principal.role().as_str(),
        "permissions": principal.permissions().iter().map(|p| p.as_str()).collect::<Vec<_>>(),
    }))
}

/// GET /notifications/stream
///
/// Live notifications as Server-Sent Events. The channel is lossy: a client that
/// falls behind skips the notifications it missed.
pub async fn stream(
    Extension(services): Extension<Arc<AppServices>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<SseEvent, std::convert::Infallible>>> {
    let rx = services.crm.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|msg| match msg {
        Ok(notification) => {
            let data = serde_json::to_string(&notification).unwrap_or_else(|_| "{}".to_string());
            Some(Ok(SseEvent::default().event("notification").data(data)))
        }
        Err(lagged) => {
            debug!(error = %lagged, "notification stream lagged");
            None
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}
