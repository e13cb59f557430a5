use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lodgex_bookings::Channel;
use lodgex_core::{DomainError, DomainResult, Entity, IntegrationId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntegrationCategory {
    Channel,
    Payment,
    Communication,
    Tools,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntegrationStatus {
    Connected,
    Disconnected,
    Syncing,
    Error,
}

impl IntegrationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            IntegrationStatus::Connected => "Connected",
            IntegrationStatus::Disconnected => "Disconnected",
            IntegrationStatus::Syncing => "Syncing",
            IntegrationStatus::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    pub id: IntegrationId,
    pub name: String,
    pub category: IntegrationCategory,
    pub description: String,
    pub status: IntegrationStatus,
    pub icon: String,
    #[serde(default)]
    pub last_sync: Option<DateTime<Utc>>,
}

impl Entity for Integration {
    type Id = IntegrationId;

    fn id(&self) -> IntegrationId {
        self.id
    }
}

impl Integration {
    /// Connect or disconnect. `Syncing` and `Error` are set by the system only.
    pub fn with_status(&self, status: IntegrationStatus) -> DomainResult<Self> {
        match status {
            IntegrationStatus::Connected | IntegrationStatus::Disconnected => Ok(Self {
                status,
                ..self.clone()
            }),
            other => Err(DomainError::validation(format!(
                "integration status can only be set to Connected or Disconnected, not {}",
                other.as_str()
            ))),
        }
    }

    /// The booking channel this integration feeds, if it is a connected channel.
    pub fn syncable_channel(&self) -> DomainResult<Channel> {
        if self.category != IntegrationCategory::Channel {
            return Err(DomainError::validation(format!("{} is not a booking channel", self.name)));
        }
        if self.status != IntegrationStatus::Connected {
            return Err(DomainError::validation(format!("{} is not connected.", self.name)));
        }
        Channel::from_name(&self.name)
            .ok_or_else(|| DomainError::validation(format!("{} is not a supported channel", self.name)))
    }

    pub fn synced_at(&self, at: DateTime<Utc>) -> Self {
        Self {
            last_sync: Some(at),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn integration(name: &str, category: IntegrationCategory, status: IntegrationStatus) -> Integration {
        Integration {
            id: IntegrationId::new(),
            name: name.to_string(),
            category,
            description: String::new(),
            status,
            icon: name.to_lowercase(),
            last_sync: None,
        }
    }

    #[test]
    fn only_connected_channels_sync() {
        let airbnb = integration("Airbnb", IntegrationCategory::Channel, IntegrationStatus::Connected);
        assert_eq!(airbnb.syncable_channel().unwrap(), Channel::Airbnb);

        let vrbo = integration("Vrbo", IntegrationCategory::Channel, IntegrationStatus::Disconnected);
        assert!(vrbo.syncable_channel().is_err());

        let stripe = integration("Stripe", IntegrationCategory::Payment, IntegrationStatus::Connected);
        assert!(stripe.syncable_channel().is_err());
    }

    #[test]
    fn clients_cannot_set_error_status() {
        let qb = integration("QuickBooks", IntegrationCategory::Tools, IntegrationStatus::Disconnected);
        assert!(qb.with_status(IntegrationStatus::Error).is_err());
        assert_eq!(
            qb.with_status(IntegrationStatus::Connected).unwrap().status,
            IntegrationStatus::Connected
        );
    }
}
