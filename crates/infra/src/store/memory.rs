use std::sync::RwLock;

use lodgex_activity::{ArchivedItem, AuditEntry, Notification, Template};
use lodgex_automation::AutomationRule;
use lodgex_bookings::Booking;
use lodgex_core::{DomainResult, Entity};
use lodgex_finance::FinanceRecord;
use lodgex_integrations::Integration;
use lodgex_parties::{Guest, Owner, StaffMember};
use lodgex_properties::{Property, PropertyDocument};
use lodgex_tasks::Task;

use super::{RecordStore, Table};
use crate::error::StoreError;

/// `RwLock<Vec<T>>` table. Lookups are linear; working sets are small.
#[derive(Debug)]
pub struct InMemoryTable<T> {
    name: &'static str,
    rows: RwLock<Vec<T>>,
}

impl<T> InMemoryTable<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rows: RwLock::new(Vec::new()),
        }
    }

    fn poisoned<E>(&self, _: E) -> StoreError {
        StoreError::Poisoned(self.name)
    }
}

impl<T> Table<T> for InMemoryTable<T>
where
    T: Entity + Clone + Send + Sync,
{
    fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        let rows = self.rows.read().map_err(|e| self.poisoned(e))?;
        Ok(rows.iter().find(|r| r.id() == id).cloned())
    }

    fn list(&self) -> Result<Vec<T>, StoreError> {
        let rows = self.rows.read().map_err(|e| self.poisoned(e))?;
        Ok(rows.clone())
    }

    fn upsert(&self, row: T) -> Result<(), StoreError> {
        let mut rows = self.rows.write().map_err(|e| self.poisoned(e))?;
        match rows.iter_mut().find(|r| r.id() == row.id()) {
            Some(existing) => *existing = row,
            None => rows.push(row),
        }
        Ok(())
    }

    fn remove(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        let mut rows = self.rows.write().map_err(|e| self.poisoned(e))?;
        Ok(rows.iter().position(|r| r.id() == id).map(|i| rows.remove(i)))
    }

    fn insert_guarded(&self, row: T, guard: &dyn Fn(&[T]) -> DomainResult<()>) -> Result<(), StoreError> {
        let mut rows = self.rows.write().map_err(|e| self.poisoned(e))?;
        guard(&rows)?;
        rows.push(row);
        Ok(())
    }

    fn update_all(&self, change: &dyn Fn(&mut T)) -> Result<usize, StoreError> {
        let mut rows = self.rows.write().map_err(|e| self.poisoned(e))?;
        rows.iter_mut().for_each(|r| change(r));
        Ok(rows.len())
    }

    fn replace_all(&self, new_rows: Vec<T>) -> Result<(), StoreError> {
        let mut rows = self.rows.write().map_err(|e| self.poisoned(e))?;
        *rows = new_rows;
        Ok(())
    }
}

/// In-memory working set for all collections.
#[derive(Debug)]
pub struct InMemoryStore {
    properties: InMemoryTable<Property>,
    documents: InMemoryTable<PropertyDocument>,
    guests: InMemoryTable<Guest>,
    owners: InMemoryTable<Owner>,
    staff: InMemoryTable<StaffMember>,
    bookings: InMemoryTable<Booking>,
    tasks: InMemoryTable<Task>,
    finance: InMemoryTable<FinanceRecord>,
    automations: InMemoryTable<AutomationRule>,
    audit: InMemoryTable<AuditEntry>,
    notifications: InMemoryTable<Notification>,
    integrations: InMemoryTable<Integration>,
    archive: InMemoryTable<ArchivedItem>,
    templates: InMemoryTable<Template>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            properties: InMemoryTable::new("properties"),
            documents: InMemoryTable::new("documents"),
            guests: InMemoryTable::new("guests"),
            owners: InMemoryTable::new("owners"),
            staff: InMemoryTable::new("staff"),
            bookings: InMemoryTable::new("bookings"),
            tasks: InMemoryTable::new("tasks"),
            finance: InMemoryTable::new("finance"),
            automations: InMemoryTable::new("automations"),
            audit: InMemoryTable::new("audit"),
            notifications: InMemoryTable::new("notifications"),
            integrations: InMemoryTable::new("integrations"),
            archive: InMemoryTable::new("archive"),
            templates: InMemoryTable::new("templates"),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for InMemoryStore {
    fn properties(&self) -> &dyn Table<Property> {
        &self.properties
    }

    fn documents(&self) -> &dyn Table<PropertyDocument> {
        &self.documents
    }

    fn guests(&self) -> &dyn Table<Guest> {
        &self.guests
    }

    fn owners(&self) -> &dyn Table<Owner> {
        &self.owners
    }

    fn staff(&self) -> &dyn Table<StaffMember> {
        &self.staff
    }

    fn bookings(&self) -> &dyn Table<Booking> {
        &self.bookings
    }

    fn tasks(&self) -> &dyn Table<Task> {
        &self.tasks
    }

    fn finance(&self) -> &dyn Table<FinanceRecord> {
        &self.finance
    }

    fn automations(&self) -> &dyn Table<AutomationRule> {
        &self.automations
    }

    fn audit(&self) -> &dyn Table<AuditEntry> {
        &self.audit
    }

    fn notifications(&self) -> &dyn Table<Notification> {
        &self.notifications
    }

    fn integrations(&self) -> &dyn Table<Integration> {
        &self.integrations
    }

    fn archive(&self) -> &dyn Table<ArchivedItem> {
        &self.archive
    }

    fn templates(&self) -> &dyn Table<Template> {
        &self.templates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodgex_bookings::{BookingContext, BookingStatus, Channel, NewBooking, PaymentStatus};
    use lodgex_core::{BookingId, DomainError, Money, PropertyId};
    use std::sync::Arc;

    fn booking(property_id: PropertyId, check_in: &str, check_out: &str) -> Booking {
        Booking::open(
            BookingId::new(),
            NewBooking {
                guest_name: "Alice Johnson".to_string(),
                guest_id: None,
                property_id,
                check_in: check_in.parse().unwrap(),
                check_out: check_out.parse().unwrap(),
                status: BookingStatus::Confirmed,
                payment_status: PaymentStatus::Paid,
                total_amount: None,
                channel: Channel::Direct,
                reference: None,
            },
            BookingContext {
                reference: "BK-7732".to_string(),
                property_name: "Downtown Luxury Loft".to_string(),
                guest_id: None,
                total_amount: Money(45_000),
            },
        )
        .unwrap()
    }

    #[test]
    fn upsert_replaces_in_place() {
        let store = InMemoryStore::new();
        let p = PropertyId::new();
        let first = booking(p, "2023-10-01", "2023-10-05");
        let second = booking(p, "2023-10-05", "2023-10-08");
        store.bookings().upsert(first.clone()).unwrap();
        store.bookings().upsert(second.clone()).unwrap();

        let cancelled = Booking {
            status: BookingStatus::Cancelled,
            ..first.clone()
        };
        store.bookings().upsert(cancelled).unwrap();

        let rows = store.bookings().list().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, first.id);
        assert_eq!(rows[0].status, BookingStatus::Cancelled);
        assert_eq!(store.bookings().remove(second.id).unwrap(), Some(second));
        assert!(store.bookings().get(first.id).unwrap().is_some());
    }

    #[test]
    fn guarded_insert_rejects_overlap() {
        let store = InMemoryStore::new();
        let p = PropertyId::new();
        store
            .insert_booking_if_available(booking(p, "2023-10-01", "2023-10-05"))
            .unwrap();

        let err = store
            .insert_booking_if_available(booking(p, "2023-10-04", "2023-10-08"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Rejected(DomainError::Conflict(_))));

        store
            .insert_booking_if_available(booking(p, "2023-10-05", "2023-10-08"))
            .unwrap();
        assert_eq!(store.bookings().list().unwrap().len(), 2);
    }

    #[test]
    fn guarded_insert_never_replaces_an_existing_booking() {
        let store = InMemoryStore::new();
        let p = PropertyId::new();
        let original = booking(p, "2023-10-01", "2023-10-05");
        store.insert_booking_if_available(original.clone()).unwrap();

        let downgraded = Booking {
            status: BookingStatus::Pending,
            ..original.clone()
        };
        let err = store.insert_booking_if_available(downgraded).unwrap_err();
        assert!(matches!(err, StoreError::Rejected(DomainError::Conflict(_))));

        let rows = store.bookings().list().unwrap();
        assert_eq!(rows, vec![original]);
    }

    #[test]
    fn cancelled_bookings_insert_without_an_availability_check() {
        let store = InMemoryStore::new();
        let p = PropertyId::new();
        store
            .insert_booking_if_available(booking(p, "2023-10-01", "2023-10-05"))
            .unwrap();

        let cancelled = Booking {
            status: BookingStatus::Cancelled,
            ..booking(p, "2023-10-02", "2023-10-04")
        };
        store.insert_booking_if_available(cancelled).unwrap();
        assert_eq!(store.bookings().list().unwrap().len(), 2);
    }

    #[test]
    fn concurrent_inserts_admit_exactly_one() {
        let store = Arc::new(InMemoryStore::new());
        let p = PropertyId::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store
                        .insert_booking_if_available(booking(p, "2023-12-20", "2023-12-27"))
                        .is_ok()
                })
            })
            .collect();
        let admitted = handles.into_iter().map(|h| h.join().unwrap()).filter(|ok| *ok).count();

        assert_eq!(admitted, 1);
        assert_eq!(store.bookings().list().unwrap().len(), 1);
    }
}
