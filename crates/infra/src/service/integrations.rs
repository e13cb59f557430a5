use rand::seq::SliceRandom;
use tracing::{info, instrument};

use lodgex_activity::AuditAction;
use lodgex_bookings::Booking;
use lodgex_core::{DomainError, IntegrationId};
use lodgex_integrations::{Integration, IntegrationStatus, Listing};

use super::CrmService;
use crate::error::ServiceResult;
use crate::remote::Collection;

impl CrmService {
    pub fn list_integrations(&self) -> ServiceResult<Vec<Integration>> {
        Ok(self.store.integrations().list()?)
    }

    /// Connect or disconnect an integration.
    #[instrument(skip(self), fields(integration_id = %id, status = status.as_str()), err)]
    pub async fn set_integration_status(
        &self,
        actor: &str,
        id: IntegrationId,
        status: IntegrationStatus,
    ) -> ServiceResult<Integration> {
        let integration = self
            .store
            .integrations()
            .get(id)?
            .ok_or_else(|| DomainError::not_found(format!("integration {id}")))?
            .with_status(status)?;
        self.store.integrations().upsert(integration.clone())?;
        self.mirror(Collection::Integrations, &integration).await;

        self.audit(
            actor,
            AuditAction::Update,
            "Integration",
            format!("{} integration {id}", status.as_str()),
        )
        .await?;
        Ok(integration)
    }

    /// Pull one external booking from a connected channel into a random active property.
    ///
    /// The booking goes through [`CrmService::create_booking`], so it gets the same
    /// availability check and side effects as a direct booking.
    #[instrument(skip(self), err)]
    pub async fn sync_channel(&self, actor: &str, integration_name: &str) -> ServiceResult<Booking> {
        let integration = self
            .store
            .integrations()
            .list()?
            .into_iter()
            .find(|i| i.name.eq_ignore_ascii_case(integration_name.trim()))
            .ok_or_else(|| DomainError::not_found(format!("integration {integration_name}")))?;
        let channel = integration.syncable_channel()?;

        let bookable: Vec<_> = self
            .store
            .properties()
            .list()?
            .into_iter()
            .filter(|p| p.is_bookable())
            .collect();
        let listing = bookable
            .choose(&mut rand::thread_rng())
            .map(|p| Listing {
                property_id: p.id,
                property_name: p.name.clone(),
                price_per_night: p.price_per_night,
            })
            .ok_or_else(|| DomainError::validation("no active property to sync a booking into"))?;

        let incoming = self.feed.next_booking(channel, &listing, Self::today()).await?;
        let booking = self.create_booking(actor, incoming).await?;

        let synced = integration.synced_at(Self::now());
        self.store.integrations().upsert(synced.clone())?;
        self.mirror(Collection::Integrations, &synced).await;
        info!(channel = %channel, reference = %booking.reference, "channel sync imported booking");
        Ok(booking)
    }
}
