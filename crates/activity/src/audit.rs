use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lodgex_core::{AuditEntryId, Entity};

/// Actor name used when nobody is logged in (automations, channel syncs).
pub const SYSTEM_USER: &str = "System";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Login,
}

/// Append-only audit trail entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: AuditEntryId,
    pub timestamp: DateTime<Utc>,
    pub user: String,
    pub action: AuditAction,
    /// Entity area, e.g. "Booking" or "Auth".
    pub entity: String,
    pub details: String,
}

impl Entity for AuditEntry {
    type Id = AuditEntryId;

    fn id(&self) -> AuditEntryId {
        self.id
    }
}

/// Client-submitted audit entry (the actor comes from the session when omitted).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAuditEntry {
    #[serde(default)]
    pub user: Option<String>,
    pub action: AuditAction,
    pub entity: String,
    pub details: String,
}

impl AuditEntry {
    pub fn new(
        id: AuditEntryId,
        user: impl Into<String>,
        action: AuditAction,
        entity: impl Into<String>,
        details: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        let user = user.into();
        Self {
            id,
            timestamp: at,
            user: if user.trim().is_empty() { SYSTEM_USER.to_string() } else { user },
            action,
            entity: entity.into(),
            details: details.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_actor_is_recorded_as_system() {
        let entry = AuditEntry::new(AuditEntryId::new(), "", AuditAction::Create, "Task", "Created task", Utc::now());
        assert_eq!(entry.user, SYSTEM_USER);
    }

    #[test]
    fn actions_serialize_uppercase() {
        assert_eq!(serde_json::to_value(AuditAction::Login).unwrap(), serde_json::json!("LOGIN"));
    }
}
