//! Working-set storage.
//!
//! Every collection is a [`Table`] keyed by its entity id. [`RecordStore`] names the
//! collections explicitly, so the service never reaches for an ambient global.

pub mod memory;

pub use memory::{InMemoryStore, InMemoryTable};

use lodgex_activity::{ArchivedItem, AuditEntry, Notification, Template};
use lodgex_automation::AutomationRule;
use lodgex_bookings::{ensure_available, Booking};
use lodgex_core::{DomainError, DomainResult, Entity};
use lodgex_finance::FinanceRecord;
use lodgex_integrations::Integration;
use lodgex_parties::{Guest, Owner, StaffMember};
use lodgex_properties::{Property, PropertyDocument};
use lodgex_tasks::Task;

use crate::error::StoreError;

/// One collection of entities, in insertion order.
pub trait Table<T: Entity>: Send + Sync {
    fn get(&self, id: T::Id) -> Result<Option<T>, StoreError>;
    fn list(&self) -> Result<Vec<T>, StoreError>;
    /// Insert, or replace the row with the same id in place.
    fn upsert(&self, row: T) -> Result<(), StoreError>;
    fn remove(&self, id: T::Id) -> Result<Option<T>, StoreError>;
    /// Insert `row` only if `guard` accepts the current rows. The check and the insert
    /// share one write lock.
    fn insert_guarded(&self, row: T, guard: &dyn Fn(&[T]) -> DomainResult<()>) -> Result<(), StoreError>;
    /// Apply `change` to every row; returns how many rows there were.
    fn update_all(&self, change: &dyn Fn(&mut T)) -> Result<usize, StoreError>;
    fn replace_all(&self, rows: Vec<T>) -> Result<(), StoreError>;
}

pub trait RecordStore: Send + Sync {
    fn properties(&self) -> &dyn Table<Property>;
    fn documents(&self) -> &dyn Table<PropertyDocument>;
    fn guests(&self) -> &dyn Table<Guest>;
    fn owners(&self) -> &dyn Table<Owner>;
    fn staff(&self) -> &dyn Table<StaffMember>;
    fn bookings(&self) -> &dyn Table<Booking>;
    fn tasks(&self) -> &dyn Table<Task>;
    fn finance(&self) -> &dyn Table<FinanceRecord>;
    fn automations(&self) -> &dyn Table<AutomationRule>;
    fn audit(&self) -> &dyn Table<AuditEntry>;
    fn notifications(&self) -> &dyn Table<Notification>;
    fn integrations(&self) -> &dyn Table<Integration>;
    fn archive(&self) -> &dyn Table<ArchivedItem>;
    fn templates(&self) -> &dyn Table<Template>;

    /// Insert a new `booking`. Refused when its id is already taken, or when it holds
    /// dates that overlap a date-holding booking on the same property.
    fn insert_booking_if_available(&self, booking: Booking) -> Result<(), StoreError> {
        let (id, property_id, start, end) = (booking.id, booking.property_id, booking.check_in(), booking.check_out());
        let holds_dates = booking.holds_dates();
        self.bookings().insert_guarded(booking, &|rows| {
            if rows.iter().any(|b| b.id == id) {
                return Err(DomainError::conflict(format!("booking {id} already exists")));
            }
            if holds_dates {
                ensure_available(rows, property_id, start, end)?;
            }
            Ok(())
        })
    }
}
