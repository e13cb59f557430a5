use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use lodgex_activity::{AuditAction, Level, SYSTEM_USER};
use lodgex_automation::plan_for_booking;
use lodgex_bookings::{find_conflict, Booking, BookingContext, BookingUpdate, NewBooking};
use lodgex_core::{BookingId, DomainError, FinanceRecordId, PropertyId, StayRange, TaskId};
use lodgex_finance::revenue_for_booking;
use lodgex_tasks::Task;

use super::CrmService;
use crate::error::{RemoteError, ServiceError, ServiceResult};
use crate::remote::Collection;

/// Answer to an availability query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub available: bool,
    /// Reference of the first clashing booking, if any.
    pub conflict: Option<String>,
}

fn generate_reference() -> String {
    format!("BK-{:04}", rand::thread_rng().gen_range(0..10_000))
}

impl CrmService {
    pub fn list_bookings(&self) -> ServiceResult<Vec<Booking>> {
        Ok(self.store.bookings().list()?)
    }

    pub fn get_booking(&self, id: BookingId) -> ServiceResult<Booking> {
        self.store
            .bookings()
            .get(id)?
            .ok_or_else(|| DomainError::not_found(format!("booking {id}")).into())
    }

    /// Whether `[start, end)` is free on the property.
    pub fn check_availability(&self, property_id: PropertyId, start: NaiveDate, end: NaiveDate) -> ServiceResult<Availability> {
        self.get_property(property_id)?;
        StayRange::new(start, end)?;

        let bookings = self.store.bookings().list()?;
        let conflict = find_conflict(&bookings, property_id, start, end).map(|b| b.reference.clone());
        Ok(Availability {
            available: conflict.is_none(),
            conflict,
        })
    }

    /// Create a booking and run its side effects: revenue line, audit entry,
    /// notification, then automation rules.
    #[instrument(
        skip(self, input),
        fields(property_id = %input.property_id, check_in = %input.check_in, check_out = %input.check_out),
        err
    )]
    pub async fn create_booking(&self, actor: &str, input: NewBooking) -> ServiceResult<Booking> {
        let property = self.get_property(input.property_id)?;
        let stay = input.stay()?;

        let guest_id = match input.guest_id {
            Some(id) => Some(id),
            None => self
                .store
                .guests()
                .list()?
                .into_iter()
                .find(|g| g.matches_name(&input.guest_name))
                .map(|g| g.id),
        };
        let total_amount = match input.total_amount {
            Some(total) => total,
            None => property
                .price_per_night
                .checked_times(stay.nights())
                .ok_or_else(|| DomainError::validation("total amount overflows"))?,
        };
        let reference = input.reference.clone().unwrap_or_else(generate_reference);

        let booking = Booking::open(
            BookingId::new(),
            input,
            BookingContext {
                reference,
                property_name: property.name.clone(),
                guest_id,
                total_amount,
            },
        )?;

        self.commit_booking(&booking).await?;
        info!(booking_id = %booking.id, reference = %booking.reference, "booking created");

        let revenue = revenue_for_booking(FinanceRecordId::new(), &booking, Self::today());
        self.store.finance().upsert(revenue.clone())?;
        self.mirror(Collection::Finance, &revenue).await;

        self.audit(actor, AuditAction::Create, "Booking", format!("Created booking {}", booking.reference))
            .await?;
        self.notify(
            "New Booking",
            format!("{} booked {}", booking.guest_name, booking.property_name),
            Level::Success,
        )
        .await?;

        self.run_automations(&booking).await?;
        Ok(booking)
    }

    async fn run_automations(&self, booking: &Booking) -> ServiceResult<()> {
        let rules = self.store.automations().list()?;
        for planned in plan_for_booking(&rules, booking) {
            let task = Task::create(TaskId::new(), planned.task)?;
            self.store.tasks().upsert(task.clone())?;
            self.mirror(Collection::Tasks, &task).await;
            self.audit(SYSTEM_USER, AuditAction::Create, "Task", format!("Created task: {}", task.title))
                .await?;

            if let Some(rule) = self.store.automations().get(planned.rule_id)? {
                let rule = rule.ran_at(Self::now());
                self.store.automations().upsert(rule.clone())?;
                self.mirror(Collection::Automations, &rule).await;
            }
            info!(rule_id = %planned.rule_id, task_id = %task.id, "automation fired");
            self.notify("Automation Triggered", planned.notice, Level::Info).await?;
        }
        Ok(())
    }

    /// Change status and/or payment status. Illegal lifecycle moves are rejected.
    #[instrument(skip(self, update), fields(booking_id = %id), err)]
    pub async fn update_booking(&self, actor: &str, id: BookingId, update: BookingUpdate) -> ServiceResult<Booking> {
        let booking = self.get_booking(id)?.updated(&update)?;
        self.store.bookings().upsert(booking.clone())?;

        if let Some(remote) = &self.remote {
            if let Err(err) = remote.save_booking(&booking).await {
                self.remote_failed("bookings", err);
            }
        }

        self.audit(
            actor,
            AuditAction::Update,
            "Booking",
            format!("Updated booking {} status to {}", booking.reference, booking.status),
        )
        .await?;
        Ok(booking)
    }

    /// Add a complete booking record without creation side effects. It gets the same
    /// id and availability guards as a new booking.
    pub(super) async fn import_booking(&self, booking: Booking) -> ServiceResult<()> {
        self.commit_booking(&booking).await
    }

    /// Insert locally under the availability guard, then through the remote's guarded
    /// insert. A remote conflict undoes the local insert and is returned; any other
    /// remote failure leaves the local booking in place.
    async fn commit_booking(&self, booking: &Booking) -> ServiceResult<()> {
        self.store.insert_booking_if_available(booking.clone())?;

        let Some(remote) = &self.remote else {
            return Ok(());
        };
        match remote.insert_booking(booking).await {
            Ok(()) => Ok(()),
            Err(RemoteError::Conflict(msg)) => {
                self.store.bookings().remove(booking.id)?;
                warn!(booking_id = %booking.id, reference = %booking.reference, %msg, "remote refused booking");
                Err(ServiceError::Remote(RemoteError::Conflict(msg)))
            }
            Err(err) => {
                self.remote_failed("bookings", err);
                Ok(())
            }
        }
    }
}
