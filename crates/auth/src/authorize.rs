use thiserror::Error;

use crate::{Permission, Principal};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),
}

/// Check a principal against a required permission.
///
/// Pure policy check: no IO, no panics.
pub fn authorize(principal: &Principal, required: &Permission) -> Result<(), AuthzError> {
    let granted = principal
        .permissions
        .iter()
        .any(|p| p.is_wildcard() || p == required);

    if granted {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::{AUDIT_READ, BOOKINGS_READ, FINANCE_WRITE, OWNERS_STATEMENT, TASKS_UPDATE};
    use crate::Role;
    use lodgex_core::UserId;

    fn principal(role: Role) -> Principal {
        Principal::new(UserId::new(), role.demo_user_name(), role)
    }

    #[test]
    fn admin_wildcard_grants_everything() {
        assert!(authorize(&principal(Role::Admin), &AUDIT_READ).is_ok());
    }

    #[test]
    fn manager_cannot_read_audit_log() {
        assert_eq!(
            authorize(&principal(Role::Manager), &AUDIT_READ),
            Err(AuthzError::Forbidden("audit.read".to_string()))
        );
    }

    #[test]
    fn owner_reads_statements_but_cannot_write_finance() {
        let owner = principal(Role::Owner);
        assert!(authorize(&owner, &OWNERS_STATEMENT).is_ok());
        assert!(authorize(&owner, &FINANCE_WRITE).is_err());
    }

    #[test]
    fn cleaner_updates_tasks_only() {
        let cleaner = principal(Role::Cleaner);
        assert!(authorize(&cleaner, &TASKS_UPDATE).is_ok());
        assert!(authorize(&cleaner, &BOOKINGS_READ).is_err());
    }
}
