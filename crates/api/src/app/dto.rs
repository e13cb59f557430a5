use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use lodgex_ai::EmailKind;
use lodgex_auth::Role;
use lodgex_core::UserId;
use lodgex_infra::InsightSubject;
use lodgex_integrations::IntegrationStatus;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct IntegrationStatusRequest {
    pub status: IntegrationStatus,
}

#[derive(Debug, Deserialize)]
pub struct SyncRequest {
    /// Integration name, e.g. "Airbnb".
    pub integration: String,
}

#[derive(Debug, Deserialize)]
pub struct InsightRequest {
    pub subject: InsightSubject,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestEmailRequest {
    pub guest_name: String,
    pub kind: EmailKind,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: UserId,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserView,
}

#[derive(Debug, Serialize)]
pub struct TextResponse {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub updated: usize,
}
