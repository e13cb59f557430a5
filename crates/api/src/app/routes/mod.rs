use axum::{
    routing::{delete, get, post},
    Router,
};

pub mod activity;
pub mod ai;
pub mod bookings;
pub mod common;
pub mod finance;
pub mod integrations;
pub mod people;
pub mod properties;
pub mod session;
pub mod system;
pub mod work;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/auth/logout", post(session::logout))
        .nest("/properties", properties::router())
        .route("/documents/:id", delete(properties::delete_document))
        .nest("/bookings", bookings::router())
        .nest("/guests", people::guests_router())
        .nest("/owners", people::owners_router())
        .nest("/staff", people::staff_router())
        .nest("/tasks", work::tasks_router())
        .nest("/automations", work::automations_router())
        .nest("/finance", finance::router())
        .route("/import", post(finance::import))
        .route("/dashboard", get(finance::dashboard))
        .nest("/audit", activity::audit_router())
        .nest("/notifications", activity::notifications_router())
        .nest("/archive", activity::archive_router())
        .nest("/templates", activity::templates_router())
        .nest("/integrations", integrations::router())
        .route("/ai/insight", post(ai::insight))
        .route("/ai/guest-email", post(ai::guest_email))
}
