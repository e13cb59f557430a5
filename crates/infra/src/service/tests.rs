use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use lodgex_activity::{ArchivedRecord, AuditAction, Level};
use lodgex_ai::EmailKind;
use lodgex_automation::{Action, NewAutomationRule, Trigger};
use lodgex_bookings::{Booking, BookingStatus, BookingUpdate, Channel, NewBooking, PaymentStatus};
use lodgex_core::{DomainError, IntegrationId, Money, PropertyId, StayRange};
use lodgex_finance::{RecordKind, ACCOMMODATION};
use lodgex_integrations::{Integration, IntegrationCategory, IntegrationStatus, SimulatedChannelFeed};
use lodgex_parties::{ContactInfo, NewGuest, NewOwner};
use lodgex_properties::{NewProperty, PropertyStatus};
use lodgex_tasks::{TaskKind, TaskStatus, TaskUpdate};

use super::*;
use crate::error::{RemoteError, ServiceError};
use crate::remote::{Collection, RemoteStore, Snapshot};
use crate::store::InMemoryStore;

const ADMIN: &str = "Admin User";

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// Remote that rejects every write.
struct OfflineRemote;

#[async_trait]
impl RemoteStore for OfflineRemote {
    async fn load(&self) -> Result<Snapshot, RemoteError> {
        Err(offline())
    }

    async fn insert_booking(&self, _booking: &Booking) -> Result<(), RemoteError> {
        Err(offline())
    }

    async fn save_booking(&self, _booking: &Booking) -> Result<(), RemoteError> {
        Err(offline())
    }

    async fn upsert(&self, _collection: Collection, _id: Uuid, _data: serde_json::Value) -> Result<(), RemoteError> {
        Err(offline())
    }

    async fn delete(&self, _collection: Collection, _id: Uuid) -> Result<(), RemoteError> {
        Err(offline())
    }
}

fn offline() -> RemoteError {
    RemoteError::Database {
        operation: "test",
        message: "connection refused".to_string(),
    }
}

/// Remote that remembers what it was sent.
#[derive(Default)]
struct RecordingRemote {
    bookings: Mutex<Vec<Uuid>>,
    records: Mutex<Vec<(Collection, Uuid)>>,
    deleted: Mutex<Vec<(Collection, Uuid)>>,
}

#[async_trait]
impl RemoteStore for RecordingRemote {
    async fn load(&self) -> Result<Snapshot, RemoteError> {
        Ok(Snapshot::default())
    }

    async fn insert_booking(&self, booking: &Booking) -> Result<(), RemoteError> {
        self.bookings.lock().unwrap().push(*booking.id.as_uuid());
        Ok(())
    }

    async fn save_booking(&self, booking: &Booking) -> Result<(), RemoteError> {
        self.bookings.lock().unwrap().push(*booking.id.as_uuid());
        Ok(())
    }

    async fn upsert(&self, collection: Collection, id: Uuid, _data: serde_json::Value) -> Result<(), RemoteError> {
        self.records.lock().unwrap().push((collection, id));
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<(), RemoteError> {
        self.deleted.lock().unwrap().push((collection, id));
        Ok(())
    }
}

/// Remote whose guarded booking insert always finds a clash.
struct ConflictRemote;

#[async_trait]
impl RemoteStore for ConflictRemote {
    async fn load(&self) -> Result<Snapshot, RemoteError> {
        Ok(Snapshot::default())
    }

    async fn insert_booking(&self, booking: &Booking) -> Result<(), RemoteError> {
        Err(RemoteError::Conflict(format!("booking {} overlaps BK-0001 in the remote store", booking.reference)))
    }

    async fn save_booking(&self, _booking: &Booking) -> Result<(), RemoteError> {
        Ok(())
    }

    async fn upsert(&self, _collection: Collection, _id: Uuid, _data: serde_json::Value) -> Result<(), RemoteError> {
        Ok(())
    }

    async fn delete(&self, _collection: Collection, _id: Uuid) -> Result<(), RemoteError> {
        Ok(())
    }
}

/// Empty working set with one owner and one active loft at 150.00 per night.
async fn service_with_loft() -> (CrmService, PropertyId) {
    let service = CrmService::new(Arc::new(InMemoryStore::new()));
    let property_id = add_loft(&service).await;
    (service, property_id)
}

async fn add_loft(service: &CrmService) -> PropertyId {
    let owner = service
        .create_owner(
            ADMIN,
            NewOwner {
                name: "Robert Fox".to_string(),
                contact: ContactInfo::new("robert@example.com", "555-0101"),
            },
        )
        .await
        .unwrap();
    service
        .create_property(
            ADMIN,
            NewProperty {
                name: "Downtown Luxury Loft".to_string(),
                code: "DT-001".to_string(),
                address: "123 Main St, Downtown".to_string(),
                status: PropertyStatus::Active,
                image_url: String::new(),
                units: 1,
                owner_id: owner.id,
                price_per_night: Money(15_000),
                unit_type: "Loft".to_string(),
                amenities: vec![],
                description: None,
            },
        )
        .await
        .unwrap()
        .id
}

fn stay(property_id: PropertyId, check_in: &str, check_out: &str) -> NewBooking {
    NewBooking {
        guest_name: "Alice Johnson".to_string(),
        guest_id: None,
        property_id,
        check_in: d(check_in),
        check_out: d(check_out),
        status: BookingStatus::Confirmed,
        payment_status: PaymentStatus::Paid,
        total_amount: None,
        channel: Channel::Direct,
        reference: None,
    }
}

async fn add_turnover_rule(service: &CrmService) {
    service
        .create_automation(
            ADMIN,
            NewAutomationRule {
                name: "Auto-Schedule Cleaning".to_string(),
                description: String::new(),
                active: true,
                trigger: Trigger::BookingConfirmed,
                action: Action::CreateTask { kind: TaskKind::Cleaning },
            },
        )
        .await
        .unwrap();
}

fn sync_warnings(service: &CrmService) -> usize {
    service
        .list_notifications()
        .unwrap()
        .iter()
        .filter(|n| n.level == Level::Warning && n.title == "Sync Warning")
        .count()
}

#[tokio::test]
async fn booking_creation_runs_side_effects_in_order() {
    let (service, property_id) = service_with_loft().await;
    add_turnover_rule(&service).await;
    let mut events = service.subscribe();

    let booking = service
        .create_booking(ADMIN, stay(property_id, "2023-10-25", "2023-10-28"))
        .await
        .unwrap();

    assert_eq!(booking.property_name, "Downtown Luxury Loft");
    assert_eq!(booking.total_amount, Money(45_000));
    assert!(booking.reference.starts_with("BK-"));

    let revenue: Vec<_> = service
        .list_finance()
        .unwrap()
        .into_iter()
        .filter(|r| r.reference_id.as_deref() == Some(booking.id.to_string().as_str()))
        .collect();
    assert_eq!(revenue.len(), 1);
    assert_eq!(revenue[0].kind, RecordKind::Revenue);
    assert_eq!(revenue[0].amount, Money(45_000));
    assert_eq!(revenue[0].category, ACCOMMODATION);

    let tasks = service.list_tasks().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Turnover Cleaning - Alice Johnson");
    assert_eq!(tasks[0].due_date, d("2023-10-28"));

    let rules = service.list_automations().unwrap();
    assert!(rules[0].last_run.is_some());

    let audit = service.list_audit().unwrap();
    assert!(audit
        .iter()
        .any(|e| e.details == format!("Created booking {}", booking.reference) && e.user == ADMIN));

    let first = events.recv().await.unwrap();
    assert_eq!(first.title, "New Booking");
    assert_eq!(first.message, "Alice Johnson booked Downtown Luxury Loft");
    assert_eq!(events.recv().await.unwrap().title, "Automation Triggered");
}

#[tokio::test]
async fn overlapping_stays_conflict_and_adjacent_stays_do_not() {
    let (service, property_id) = service_with_loft().await;
    service
        .create_booking(ADMIN, stay(property_id, "2023-10-01", "2023-10-05"))
        .await
        .unwrap();

    let err = service
        .create_booking(ADMIN, stay(property_id, "2023-10-04", "2023-10-08"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::Conflict(_))));

    let free = service
        .check_availability(property_id, d("2023-10-05"), d("2023-10-08"))
        .unwrap();
    assert!(free.available);
    let taken = service
        .check_availability(property_id, d("2023-10-02"), d("2023-10-03"))
        .unwrap();
    assert!(!taken.available);
    assert!(taken.conflict.is_some());

    service
        .create_booking(ADMIN, stay(property_id, "2023-10-05", "2023-10-08"))
        .await
        .unwrap();
    // Only the two accepted bookings produced revenue.
    assert_eq!(service.list_finance().unwrap().len(), 2);
}

#[tokio::test]
async fn cancelled_bookings_release_their_dates() {
    let (service, property_id) = service_with_loft().await;
    let booking = service
        .create_booking(ADMIN, stay(property_id, "2023-12-20", "2023-12-27"))
        .await
        .unwrap();
    service
        .update_booking(
            ADMIN,
            booking.id,
            BookingUpdate {
                status: Some(BookingStatus::Cancelled),
                payment_status: Some(PaymentStatus::Refunded),
            },
        )
        .await
        .unwrap();

    assert!(service
        .create_booking(ADMIN, stay(property_id, "2023-12-22", "2023-12-24"))
        .await
        .is_ok());
}

#[tokio::test]
async fn illegal_transitions_are_invariant_violations() {
    let (service, property_id) = service_with_loft().await;
    let booking = service
        .create_booking(ADMIN, stay(property_id, "2023-10-01", "2023-10-05"))
        .await
        .unwrap();
    let to = |status| BookingUpdate {
        status: Some(status),
        payment_status: None,
    };

    service.update_booking(ADMIN, booking.id, to(BookingStatus::CheckedIn)).await.unwrap();
    let err = service
        .update_booking(ADMIN, booking.id, to(BookingStatus::Confirmed))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::InvariantViolation(_))));
    assert_eq!(service.get_booking(booking.id).unwrap().status, BookingStatus::CheckedIn);
}

#[tokio::test]
async fn unknown_property_is_not_found() {
    let service = CrmService::new(Arc::new(InMemoryStore::new()));
    let err = service
        .create_booking(ADMIN, stay(PropertyId::new(), "2023-10-01", "2023-10-05"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::NotFound(_))));
}

#[tokio::test]
async fn bookings_link_to_a_known_guest_by_name() {
    let (service, property_id) = service_with_loft().await;
    let guest = service
        .create_guest(
            ADMIN,
            NewGuest {
                name: "Alice Johnson".to_string(),
                contact: ContactInfo::new("alice@example.com", ""),
                total_stays: 0,
                total_spent: Money::ZERO,
                last_stay: None,
                rating: 5,
            },
        )
        .await
        .unwrap();

    let mut input = stay(property_id, "2023-11-01", "2023-11-03");
    input.guest_name = "alice johnson".to_string();
    let booking = service.create_booking(ADMIN, input).await.unwrap();
    assert_eq!(booking.guest_id, Some(guest.id));
}

#[tokio::test]
async fn remote_failure_keeps_the_local_write_and_warns() {
    let (service, property_id) = service_with_loft().await;
    let service = service.with_remote(Arc::new(OfflineRemote));

    let booking = service
        .create_booking(ADMIN, stay(property_id, "2023-10-01", "2023-10-05"))
        .await
        .unwrap();
    assert!(service.get_booking(booking.id).is_ok());
    // Booking insert and the revenue line each failed; the audit mirror stays quiet.
    assert_eq!(sync_warnings(&service), 2);
}

#[tokio::test]
async fn remote_conflict_undoes_the_booking_before_side_effects() {
    let (service, property_id) = service_with_loft().await;
    add_turnover_rule(&service).await;
    let service = service.with_remote(Arc::new(ConflictRemote));
    let audit_before = service.list_audit().unwrap().len();

    let err = service
        .create_booking(ADMIN, stay(property_id, "2023-10-01", "2023-10-05"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Remote(RemoteError::Conflict(_))));
    assert!(service.list_bookings().unwrap().is_empty());
    assert!(service.list_finance().unwrap().is_empty());
    assert!(service.list_tasks().unwrap().is_empty());
    assert_eq!(service.list_audit().unwrap().len(), audit_before);
}

#[tokio::test]
async fn default_total_that_overflows_is_a_validation_error() {
    let (service, property_id) = service_with_loft().await;
    let mut property = service.get_property(property_id).unwrap();
    property.price_per_night = Money(i64::MAX / 2);
    service.store.properties().upsert(property).unwrap();

    let err = service
        .create_booking(ADMIN, stay(property_id, "2023-10-01", "2023-10-04"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::Validation(_))));
    assert!(service.list_bookings().unwrap().is_empty());
}

#[tokio::test]
async fn audit_mirror_failures_are_silent() {
    let service = CrmService::new(Arc::new(InMemoryStore::new())).with_remote(Arc::new(OfflineRemote));
    service.record_logout("Admin User").await.unwrap();

    assert_eq!(sync_warnings(&service), 0);
    assert_eq!(service.list_audit().unwrap()[0].details, "User logged out");
}

#[tokio::test]
async fn writes_are_mirrored() {
    let remote = Arc::new(RecordingRemote::default());
    let (service, property_id) = service_with_loft().await;
    let service = service.with_remote(remote.clone());

    let booking = service
        .create_booking(ADMIN, stay(property_id, "2023-10-01", "2023-10-05"))
        .await
        .unwrap();
    service.delete_property(ADMIN, property_id).await.unwrap();

    assert_eq!(remote.bookings.lock().unwrap().as_slice(), &[*booking.id.as_uuid()]);
    let records = remote.records.lock().unwrap();
    assert!(records.iter().any(|(c, _)| *c == Collection::Finance));
    assert!(records.iter().any(|(c, _)| *c == Collection::Archive));
    assert!(remote
        .deleted
        .lock()
        .unwrap()
        .contains(&(Collection::Properties, *property_id.as_uuid())));
}

#[tokio::test]
async fn deleted_property_round_trips_through_the_archive() {
    let (service, property_id) = service_with_loft().await;

    let item = service.delete_property(ADMIN, property_id).await.unwrap();
    assert_eq!(item.name, "Downtown Luxury Loft");
    assert_eq!(item.archived_by, ADMIN);
    assert!(service.list_properties().unwrap().is_empty());
    assert!(service
        .list_notifications()
        .unwrap()
        .iter()
        .any(|n| n.title == "Property Deleted" && n.level == Level::Warning));

    service.restore_from_archive(ADMIN, item.id).await.unwrap();
    assert_eq!(service.get_property(property_id).unwrap().name, "Downtown Luxury Loft");
    assert!(service.list_archive().unwrap().is_empty());
    assert_eq!(
        service.list_audit().unwrap()[0].details,
        "Restored Property: Downtown Luxury Loft"
    );
}

#[tokio::test]
async fn restoring_a_clashing_booking_is_refused() {
    let (service, property_id) = service_with_loft().await;
    let live = service
        .create_booking(ADMIN, stay(property_id, "2024-01-10", "2024-01-15"))
        .await
        .unwrap();

    let archived = lodgex_activity::ArchivedItem::archive(
        lodgex_core::ArchiveId::new(),
        ArchivedRecord::Booking(Booking {
            id: lodgex_core::BookingId::new(),
            reference: "BK-OLD-001".to_string(),
            ..live
        }),
        ADMIN,
        chrono::Utc::now(),
    );
    service.store.archive().upsert(archived.clone()).unwrap();

    let err = service.restore_from_archive(ADMIN, archived.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::Conflict(_))));
    assert_eq!(service.list_archive().unwrap().len(), 1);
}

#[tokio::test]
async fn task_status_changes_notify() {
    let (service, property_id) = service_with_loft().await;
    let task = service
        .create_task(
            ADMIN,
            lodgex_tasks::NewTask::open("Fix leaky faucet", TaskKind::Maintenance, property_id, d("2023-10-26")),
        )
        .await
        .unwrap();
    assert_eq!(service.list_notifications().unwrap()[0].title, "Task Assigned");

    service
        .update_task(
            "Marcus Johnson",
            task.id,
            TaskUpdate {
                status: Some(TaskStatus::Completed),
                ..TaskUpdate::default()
            },
        )
        .await
        .unwrap();

    let latest = &service.list_notifications().unwrap()[0];
    assert_eq!(latest.title, "Task Status Updated");
    assert_eq!(latest.message, "\"Fix leaky faucet\" moved to Completed");
    assert_eq!(latest.level, Level::Success);
}

#[tokio::test]
async fn channel_sync_books_through_the_normal_path() {
    let (service, _) = service_with_loft().await;
    let service = service.with_feed(Arc::new(SimulatedChannelFeed::seeded(7)));
    let airbnb = Integration {
        id: IntegrationId::new(),
        name: "Airbnb".to_string(),
        category: IntegrationCategory::Channel,
        description: String::new(),
        status: IntegrationStatus::Connected,
        icon: "airbnb".to_string(),
        last_sync: None,
    };
    service.store.integrations().upsert(airbnb.clone()).unwrap();

    let booking = service.sync_channel(ADMIN, "airbnb").await.unwrap();
    assert_eq!(booking.channel, Channel::Airbnb);
    assert_eq!(booking.status, BookingStatus::Confirmed);
    assert_eq!(service.list_finance().unwrap().len(), 1);
    assert!(service.list_integrations().unwrap()[0].last_sync.is_some());

    service
        .set_integration_status(ADMIN, airbnb.id, IntegrationStatus::Disconnected)
        .await
        .unwrap();
    let err = service.sync_channel(ADMIN, "Airbnb").await.unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::Validation(_))));
}

#[tokio::test]
async fn import_appends_records_without_side_effects() {
    let (service, property_id) = service_with_loft().await;
    add_turnover_rule(&service).await;
    let existing = service
        .create_booking(ADMIN, stay(property_id, "2023-10-01", "2023-10-05"))
        .await
        .unwrap();

    let imported = Booking {
        id: lodgex_core::BookingId::new(),
        reference: "IMP-1".to_string(),
        stay: StayRange::new(d("2023-10-05"), d("2023-10-09")).unwrap(),
        ..existing
    };
    let summary = service
        .import(
            ADMIN,
            ImportBatch {
                bookings: vec![imported],
                finance: vec![],
            },
        )
        .await
        .unwrap();

    assert_eq!(summary.bookings, 1);
    assert_eq!(service.list_bookings().unwrap().len(), 2);
    assert_eq!(service.list_finance().unwrap().len(), 1);
    assert_eq!(service.list_tasks().unwrap().len(), 1);
    assert_eq!(service.list_notifications().unwrap()[0].message, "Imported 1 bookings and 0 finance records.");
}

#[tokio::test]
async fn import_refuses_overlapping_and_existing_bookings() {
    let (service, property_id) = service_with_loft().await;
    let existing = service
        .create_booking(ADMIN, stay(property_id, "2023-10-01", "2023-10-05"))
        .await
        .unwrap();

    let free = Booking {
        id: lodgex_core::BookingId::new(),
        reference: "IMP-1".to_string(),
        stay: StayRange::new(d("2023-11-01"), d("2023-11-03")).unwrap(),
        ..existing.clone()
    };
    let overlapping = Booking {
        id: lodgex_core::BookingId::new(),
        reference: "IMP-2".to_string(),
        ..existing.clone()
    };
    let err = service
        .import(
            ADMIN,
            ImportBatch {
                bookings: vec![free.clone(), overlapping],
                finance: vec![],
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::Conflict(_))));
    // Records before the refused one stay.
    let ids: Vec<_> = service.list_bookings().unwrap().into_iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![existing.id, free.id]);

    service
        .update_booking(ADMIN, existing.id, BookingUpdate { status: Some(BookingStatus::Cancelled), payment_status: None })
        .await
        .unwrap();
    let revived = Booking {
        status: BookingStatus::Pending,
        ..existing.clone()
    };
    let err = service
        .import(
            ADMIN,
            ImportBatch {
                bookings: vec![revived],
                finance: vec![],
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::Conflict(_))));
    assert_eq!(service.get_booking(existing.id).unwrap().status, BookingStatus::Cancelled);
}

#[tokio::test]
async fn owner_statement_nets_fee_and_expenses() {
    let (service, property_id) = service_with_loft().await;
    let owner_id = service.get_property(property_id).unwrap().owner_id;

    let mut input = stay(property_id, "2023-10-01", "2023-10-05");
    input.total_amount = Some(Money(100_000));
    service.create_booking(ADMIN, input).await.unwrap();
    service
        .create_finance_record(
            ADMIN,
            lodgex_finance::NewFinanceRecord {
                date: None,
                description: "Plumbing Repair".to_string(),
                amount: Money(-10_000),
                kind: RecordKind::Expense,
                category: "Maintenance".to_string(),
                reference_id: None,
                property_id: Some(property_id),
            },
        )
        .await
        .unwrap();

    let statement = service.owner_statement(owner_id).unwrap();
    assert_eq!(statement.gross_revenue, Money(100_000));
    assert_eq!(statement.management_fee, Money(20_000));
    assert_eq!(statement.expenses, Money(10_000));
    assert_eq!(statement.net_payout, Money(70_000));
}

#[tokio::test]
async fn seeded_dashboard_is_consistent() {
    let service = CrmService::seeded().unwrap();
    let summary = service.dashboard().unwrap();

    let finance = service.list_finance().unwrap();
    let revenue: Money = finance
        .iter()
        .filter(|r| r.kind == RecordKind::Revenue)
        .map(|r| r.amount)
        .sum();
    assert_eq!(summary.total_revenue, revenue);
    assert_eq!(summary.net_income, summary.total_revenue - summary.total_expenses);
    assert_eq!(summary.tasks_by_status.values().sum::<usize>(), service.list_tasks().unwrap().len());
    assert_eq!(
        summary.bookings_by_channel.values().sum::<usize>(),
        service.list_bookings().unwrap().len()
    );
}

#[tokio::test]
async fn notifications_can_be_marked_read() {
    let service = CrmService::seeded().unwrap();
    let unread = service.list_notifications().unwrap().iter().filter(|n| !n.read).count();
    assert!(unread > 0);

    assert_eq!(service.mark_all_notifications_read().await.unwrap(), unread);
    assert!(service.list_notifications().unwrap().iter().all(|n| n.read));
}

#[tokio::test]
async fn login_is_audited_as_the_demo_user() {
    let service = CrmService::new(Arc::new(InMemoryStore::new()));
    service.record_login(lodgex_auth::Role::Cleaner).await.unwrap();

    let entry = &service.list_audit().unwrap()[0];
    assert_eq!(entry.action, AuditAction::Login);
    assert_eq!(entry.details, "User logged in as Cleaner");
    assert_eq!(entry.user, lodgex_auth::Role::Cleaner.demo_user_name());
}

#[tokio::test]
async fn simulated_assistant_answers_without_a_key() {
    let service = CrmService::seeded().unwrap();
    let insight = service.insight(InsightSubject::Bookings).await.unwrap();
    assert!(!insight.is_empty());

    let email = service.draft_guest_email("Alice", EmailKind::CheckIn).await;
    assert!(email.starts_with("Simulation Mode: Dear Alice"));
}
