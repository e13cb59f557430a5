use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};

use lodgex_auth::permissions::{AUTOMATIONS_READ, AUTOMATIONS_WRITE, TASKS_CREATE, TASKS_READ, TASKS_UPDATE};
use lodgex_automation::NewAutomationRule;
use lodgex_core::{AutomationRuleId, TaskId};
use lodgex_tasks::{NewTask, TaskUpdate};

use crate::app::routes::common::{list, no_content, respond};
use crate::app::{errors, services::AppServices};
use crate::authz::require;
use crate::context::PrincipalContext;

pub fn tasks_router() -> Router {
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/:id", put(update_task))
}

pub fn automations_router() -> Router {
    Router::new()
        .route("/", get(list_automations).post(create_automation))
        .route("/:id", delete(delete_automation))
        .route("/:id/toggle", post(toggle_automation))
}

pub async fn list_tasks(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &TASKS_READ) {
        return resp;
    }
    list(services.crm.list_tasks())
}

pub async fn create_task(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<NewTask>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &TASKS_CREATE) {
        return resp;
    }
    respond(StatusCode::CREATED, services.crm.create_task(principal.name(), body).await)
}

/// PUT /tasks/:id
///
/// Cleaners and maintenance staff hold TASKS_UPDATE so they can move their own work along.
pub async fn update_task(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<TaskUpdate>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &TASKS_UPDATE) {
        return resp;
    }
    let id: TaskId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    respond(StatusCode::OK, services.crm.update_task(principal.name(), id, body).await)
}

pub async fn list_automations(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &AUTOMATIONS_READ) {
        return resp;
    }
    list(services.crm.list_automations())
}

pub async fn create_automation(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<NewAutomationRule>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &AUTOMATIONS_WRITE) {
        return resp;
    }
    respond(
        StatusCode::CREATED,
        services.crm.create_automation(principal.name(), body).await,
    )
}

pub async fn delete_automation(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &AUTOMATIONS_WRITE) {
        return resp;
    }
    let id: AutomationRuleId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    no_content(services.crm.delete_automation(principal.name(), id).await)
}

pub async fn toggle_automation(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = require(&principal, &AUTOMATIONS_WRITE) {
        return resp;
    }
    let id: AutomationRuleId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    respond(StatusCode::OK, services.crm.toggle_automation(id).await)
}
