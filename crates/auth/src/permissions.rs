use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::Role;

/// Permission identifier.
///
/// Permissions are opaque strings (e.g. "bookings.write"). The wildcard `"*"` grants
/// everything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "*"
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

pub const WILDCARD: Permission = Permission::from_static("*");

pub const PROPERTIES_READ: Permission = Permission::from_static("properties.read");
pub const PROPERTIES_WRITE: Permission = Permission::from_static("properties.write");
pub const BOOKINGS_READ: Permission = Permission::from_static("bookings.read");
pub const BOOKINGS_WRITE: Permission = Permission::from_static("bookings.write");
pub const GUESTS_READ: Permission = Permission::from_static("guests.read");
pub const GUESTS_WRITE: Permission = Permission::from_static("guests.write");
pub const OWNERS_READ: Permission = Permission::from_static("owners.read");
pub const OWNERS_WRITE: Permission = Permission::from_static("owners.write");
pub const OWNERS_STATEMENT: Permission = Permission::from_static("owners.statement");
pub const STAFF_READ: Permission = Permission::from_static("staff.read");
pub const STAFF_WRITE: Permission = Permission::from_static("staff.write");
pub const TASKS_READ: Permission = Permission::from_static("tasks.read");
pub const TASKS_CREATE: Permission = Permission::from_static("tasks.create");
pub const TASKS_UPDATE: Permission = Permission::from_static("tasks.update");
pub const FINANCE_READ: Permission = Permission::from_static("finance.read");
pub const FINANCE_WRITE: Permission = Permission::from_static("finance.write");
pub const AUTOMATIONS_READ: Permission = Permission::from_static("automations.read");
pub const AUTOMATIONS_WRITE: Permission = Permission::from_static("automations.write");
pub const AUDIT_READ: Permission = Permission::from_static("audit.read");
pub const AUDIT_WRITE: Permission = Permission::from_static("audit.write");
pub const INTEGRATIONS_READ: Permission = Permission::from_static("integrations.read");
pub const INTEGRATIONS_WRITE: Permission = Permission::from_static("integrations.write");
pub const ARCHIVE_READ: Permission = Permission::from_static("archive.read");
pub const ARCHIVE_WRITE: Permission = Permission::from_static("archive.write");
pub const TEMPLATES_READ: Permission = Permission::from_static("templates.read");
pub const TEMPLATES_WRITE: Permission = Permission::from_static("templates.write");
pub const IMPORT: Permission = Permission::from_static("import");
pub const DASHBOARD_READ: Permission = Permission::from_static("dashboard.read");
pub const AI_USE: Permission = Permission::from_static("ai.use");
pub const SETTINGS: Permission = Permission::from_static("settings");

/// Every named permission (the wildcard excluded).
pub const ALL: [Permission; 30] = [
    PROPERTIES_READ,
    PROPERTIES_WRITE,
    BOOKINGS_READ,
    BOOKINGS_WRITE,
    GUESTS_READ,
    GUESTS_WRITE,
    OWNERS_READ,
    OWNERS_WRITE,
    OWNERS_STATEMENT,
    STAFF_READ,
    STAFF_WRITE,
    TASKS_READ,
    TASKS_CREATE,
    TASKS_UPDATE,
    FINANCE_READ,
    FINANCE_WRITE,
    AUTOMATIONS_READ,
    AUTOMATIONS_WRITE,
    AUDIT_READ,
    AUDIT_WRITE,
    INTEGRATIONS_READ,
    INTEGRATIONS_WRITE,
    ARCHIVE_READ,
    ARCHIVE_WRITE,
    TEMPLATES_READ,
    TEMPLATES_WRITE,
    IMPORT,
    DASHBOARD_READ,
    AI_USE,
    SETTINGS,
];

/// Static role → permission policy.
pub fn permissions_for_role(role: Role) -> Vec<Permission> {
    match role {
        Role::Admin => vec![WILDCARD],
        Role::Manager => ALL
            .into_iter()
            .filter(|p| *p != AUDIT_READ && *p != SETTINGS)
            .collect(),
        Role::Cleaner | Role::Maintenance => vec![TASKS_READ, TASKS_UPDATE],
        Role::Owner => vec![PROPERTIES_READ, BOOKINGS_READ, OWNERS_STATEMENT, FINANCE_READ],
        Role::Guest => vec![BOOKINGS_READ],
    }
}
