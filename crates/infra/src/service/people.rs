//! Guests, owners and staff.

use tracing::instrument;

use lodgex_activity::AuditAction;
use lodgex_core::{DomainError, GuestId, OwnerId, StaffId};
use lodgex_finance::{owner_statement, OwnerStatement};
use lodgex_parties::{Guest, NewGuest, NewOwner, NewStaffMember, Owner, StaffMember, StaffUpdate};

use super::CrmService;
use crate::error::ServiceResult;
use crate::remote::Collection;

impl CrmService {
    pub fn list_guests(&self) -> ServiceResult<Vec<Guest>> {
        Ok(self.store.guests().list()?)
    }

    #[instrument(skip(self, input), err)]
    pub async fn create_guest(&self, actor: &str, input: NewGuest) -> ServiceResult<Guest> {
        let guest = Guest::register(GuestId::new(), input)?;
        self.store.guests().upsert(guest.clone())?;
        self.mirror(Collection::Guests, &guest).await;

        self.audit(actor, AuditAction::Create, "Guest", format!("Added guest {}", guest.name))
            .await?;
        Ok(guest)
    }

    pub fn list_owners(&self) -> ServiceResult<Vec<Owner>> {
        Ok(self.store.owners().list()?)
    }

    #[instrument(skip(self, input), err)]
    pub async fn create_owner(&self, actor: &str, input: NewOwner) -> ServiceResult<Owner> {
        let owner = Owner::register(OwnerId::new(), input)?;
        self.store.owners().upsert(owner.clone())?;
        self.mirror(Collection::Owners, &owner).await;

        self.audit(actor, AuditAction::Create, "Owner", format!("Added owner {}", owner.name))
            .await?;
        Ok(owner)
    }

    /// Payout statement over the owner's properties.
    pub fn owner_statement(&self, owner_id: OwnerId) -> ServiceResult<OwnerStatement> {
        let owner = self
            .store
            .owners()
            .get(owner_id)?
            .ok_or_else(|| DomainError::not_found(format!("owner {owner_id}")))?;

        Ok(owner_statement(
            &owner,
            &self.store.properties().list()?,
            &self.store.bookings().list()?,
            &self.store.tasks().list()?,
            &self.store.finance().list()?,
        ))
    }

    pub fn list_staff(&self) -> ServiceResult<Vec<StaffMember>> {
        Ok(self.store.staff().list()?)
    }

    #[instrument(skip(self, input), err)]
    pub async fn create_staff(&self, actor: &str, input: NewStaffMember) -> ServiceResult<StaffMember> {
        let member = StaffMember::hire(StaffId::new(), input, Self::today())?;
        self.store.staff().upsert(member.clone())?;
        self.mirror(Collection::Staff, &member).await;

        self.audit(actor, AuditAction::Create, "Staff", format!("Added staff member {}", member.name))
            .await?;
        Ok(member)
    }

    #[instrument(skip(self, update), fields(staff_id = %id), err)]
    pub async fn update_staff(&self, actor: &str, id: StaffId, update: StaffUpdate) -> ServiceResult<StaffMember> {
        let member = self
            .store
            .staff()
            .get(id)?
            .ok_or_else(|| DomainError::not_found(format!("staff member {id}")))?
            .updated(update)?;
        self.store.staff().upsert(member.clone())?;
        self.mirror(Collection::Staff, &member).await;

        self.audit(actor, AuditAction::Update, "Staff", format!("Updated staff {}", member.name))
            .await?;
        Ok(member)
    }
}
