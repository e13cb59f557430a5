//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

macro_rules! uuid_newtype {
    ($(#[$meta:meta])* $t:ident, $name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $t(Uuid);

        impl $t {
            /// Create a new identifier.
            ///
            /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
            /// for determinism.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $t {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $t {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$t> for Uuid {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = Uuid::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(uuid))
            }
        }
    };
}

uuid_newtype!(
    /// Identifier of a rentable property.
    PropertyId, "PropertyId"
);
uuid_newtype!(
    /// Identifier of a document attached to a property.
    DocumentId, "DocumentId"
);
uuid_newtype!(GuestId, "GuestId");
uuid_newtype!(OwnerId, "OwnerId");
uuid_newtype!(StaffId, "StaffId");
uuid_newtype!(
    /// Identifier of a booking (reservation).
    BookingId, "BookingId"
);
uuid_newtype!(TaskId, "TaskId");
uuid_newtype!(FinanceRecordId, "FinanceRecordId");
uuid_newtype!(AutomationRuleId, "AutomationRuleId");
uuid_newtype!(AuditEntryId, "AuditEntryId");
uuid_newtype!(NotificationId, "NotificationId");
uuid_newtype!(IntegrationId, "IntegrationId");
uuid_newtype!(ArchiveId, "ArchiveId");
uuid_newtype!(TemplateId, "TemplateId");
uuid_newtype!(
    /// Identifier of an authenticated user (actor identity).
    UserId, "UserId"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrips_display() {
        let id = BookingId::new();
        let parsed: BookingId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn parse_error_names_the_id_type() {
        let err = "not-a-uuid".parse::<PropertyId>().unwrap_err();
        match err {
            DomainError::InvalidId(msg) => assert!(msg.starts_with("PropertyId")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
