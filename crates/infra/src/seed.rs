//! Mock working set for demos and local runs.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use lodgex_activity::{
    ArchivedItem, ArchivedRecord, AuditAction, AuditEntry, Level, Notification, Template, TemplateCategory,
    TemplateKind,
};
use lodgex_automation::{Action, AutomationRule, Trigger};
use lodgex_bookings::{Booking, BookingStatus, Channel, PaymentStatus};
use lodgex_core::{
    ArchiveId, AuditEntryId, AutomationRuleId, BookingId, DocumentId, DomainError, DomainResult, FinanceRecordId,
    GuestId, IntegrationId, Money, NotificationId, OwnerId, PropertyId, StaffId, StayRange, TaskId, TemplateId,
};
use lodgex_finance::{FinanceRecord, RecordKind, ACCOMMODATION};
use lodgex_integrations::{Integration, IntegrationCategory, IntegrationStatus};
use lodgex_parties::{
    ContactInfo, Guest, Owner, OwnerStatus, StaffDocument, StaffDocumentKind, StaffMember, StaffRole, StaffStatus,
};
use lodgex_properties::{DocumentKind, Property, PropertyDocument, PropertyStatus};
use lodgex_tasks::{ApprovalStatus, Priority, Task, TaskKind, TaskStatus};

use crate::remote::Snapshot;

fn date(s: &str) -> DomainResult<NaiveDate> {
    s.parse()
        .map_err(|e| DomainError::validation(format!("bad seed date {s}: {e}")))
}

fn money(major: i64) -> Money {
    Money(major * 100)
}

/// The demo portfolio: three owners, four properties, three bookings and the records
/// that hang off them. Relative timestamps are anchored at `now`.
pub fn mock_snapshot(now: DateTime<Utc>) -> DomainResult<Snapshot> {
    let owner = |name: &str, email: &str, phone: &str, count: u32| Owner {
        id: OwnerId::new(),
        name: name.to_string(),
        contact: ContactInfo::new(email, phone),
        properties_count: count,
        status: OwnerStatus::Active,
    };
    let owners = vec![
        owner("John Doe", "john@example.com", "+1 555 0101", 2),
        owner("Jane Smith", "jane@example.com", "+1 555 0102", 1),
        owner("Robert Brown", "robert@investor.com", "+1 555 0103", 5),
    ];

    let guest = |name: &str, email: &str, phone: &str, stays: u32, spent: i64, last: &str, rating: u8| {
        Ok::<_, DomainError>(Guest {
            id: GuestId::new(),
            name: name.to_string(),
            contact: ContactInfo::new(email, phone),
            total_stays: stays,
            total_spent: money(spent),
            last_stay: Some(date(last)?),
            rating,
        })
    };
    let guests = vec![
        guest("Alice Johnson", "alice@test.com", "+1 555 9999", 3, 1500, "2023-10-28", 5)?,
        guest("Michael Smith", "mike@test.com", "+1 555 8888", 1, 1200, "2023-11-07", 4)?,
        guest("Sarah Connor", "sarah@test.com", "+1 555 7777", 5, 4500, "2023-10-29", 5)?,
    ];

    let staff = vec![
        StaffMember {
            id: StaffId::new(),
            name: "David Wilson".to_string(),
            role: StaffRole::Manager,
            contact: ContactInfo::new("david@lodgex.com", "+1 555 1111"),
            status: StaffStatus::Active,
            avatar_url: None,
            joined_date: date("2022-03-15")?,
            documents: vec![StaffDocument {
                id: DocumentId::new(),
                name: "Employment Contract".to_string(),
                kind: StaffDocumentKind::Contract,
                url: "#".to_string(),
                upload_date: date("2022-03-15")?,
                size: "1.2 MB".to_string(),
            }],
        },
        StaffMember {
            id: StaffId::new(),
            name: "Elena Rodriguez".to_string(),
            role: StaffRole::Cleaner,
            contact: ContactInfo::new("elena@lodgex.com", "+1 555 2222"),
            status: StaffStatus::Active,
            avatar_url: None,
            joined_date: date("2023-01-10")?,
            documents: vec![StaffDocument {
                id: DocumentId::new(),
                name: "ID Card Copy".to_string(),
                kind: StaffDocumentKind::Id,
                url: "#".to_string(),
                upload_date: date("2023-01-10")?,
                size: "0.5 MB".to_string(),
            }],
        },
        StaffMember {
            id: StaffId::new(),
            name: "Marcus Johnson".to_string(),
            role: StaffRole::Maintenance,
            contact: ContactInfo::new("marcus@lodgex.com", "+1 555 3333"),
            status: StaffStatus::OnLeave,
            avatar_url: None,
            joined_date: date("2023-05-22")?,
            documents: Vec::new(),
        },
        StaffMember {
            id: StaffId::new(),
            name: "Sarah Admin".to_string(),
            role: StaffRole::Admin,
            contact: ContactInfo::new("admin@lodgex.com", "+1 555 0000"),
            status: StaffStatus::Active,
            avatar_url: None,
            joined_date: date("2021-11-01")?,
            documents: Vec::new(),
        },
    ];

    let property = |n: u32,
                    name: &str,
                    code: &str,
                    address: &str,
                    status: PropertyStatus,
                    units: u32,
                    owner_id: OwnerId,
                    price: i64,
                    unit_type: &str,
                    amenities: &[&str],
                    description: &str| Property {
        id: PropertyId::new(),
        name: name.to_string(),
        code: code.to_string(),
        address: address.to_string(),
        status,
        image_url: format!("https://picsum.photos/400/300?random={n}"),
        units,
        owner_id,
        price_per_night: money(price),
        unit_type: unit_type.to_string(),
        amenities: amenities.iter().map(|a| a.to_string()).collect(),
        description: Some(description.to_string()),
    };
    let properties = vec![
        property(
            1,
            "Downtown Luxury Loft",
            "DT-001",
            "123 Main St, Downtown",
            PropertyStatus::Active,
            1,
            owners[0].id,
            150,
            "Loft",
            &["Wifi", "Pool", "Gym", "Parking"],
            "A beautiful loft in the heart of the city with amazing views.",
        ),
        property(
            2,
            "Seaside Villa Retreat",
            "SS-042",
            "45 Ocean Dr, Beachside",
            PropertyStatus::Active,
            1,
            owners[1].id,
            300,
            "Villa",
            &["Beach Access", "Private Pool", "BBQ"],
            "Relax by the ocean in this stunning private villa.",
        ),
        property(
            3,
            "Mountain View Cabin",
            "MT-105",
            "789 Pine Way, Highlands",
            PropertyStatus::Maintenance,
            1,
            owners[0].id,
            120,
            "Cabin",
            &["Fireplace", "Hiking Trails", "Pet Friendly"],
            "Cozy cabin perfect for winter getaways.",
        ),
        property(
            4,
            "Urban Studio Complex",
            "US-200",
            "88 Market St, City Center",
            PropertyStatus::Active,
            12,
            owners[2].id,
            90,
            "Studio",
            &["Wifi", "Smart TV", "Kitchenette"],
            "Efficient and modern studios for business travelers.",
        ),
    ];
    let [loft, villa, _cabin, studio] = [&properties[0], &properties[1], &properties[2], &properties[3]];

    let document = |property: &Property, name: &str, kind: DocumentKind, uploaded: &str, size: &str| {
        Ok::<_, DomainError>(PropertyDocument {
            id: DocumentId::new(),
            property_id: property.id,
            name: name.to_string(),
            kind,
            url: "#".to_string(),
            upload_date: date(uploaded)?,
            size: size.to_string(),
        })
    };
    let documents = vec![
        document(loft, "Management Contract 2023", DocumentKind::Contract, "2023-01-15", "2.4 MB")?,
        document(loft, "Insurance Policy", DocumentKind::Other, "2023-02-10", "1.1 MB")?,
        document(villa, "Floor Plan", DocumentKind::Photo, "2023-03-22", "4.5 MB")?,
        document(loft, "Utility Invoice Oct", DocumentKind::Invoice, "2023-10-05", "0.5 MB")?,
    ];

    let booking = |reference: &str,
                   guest: &Guest,
                   property: &Property,
                   check_in: &str,
                   check_out: &str,
                   status: BookingStatus,
                   payment_status: PaymentStatus,
                   total: i64,
                   channel: Channel| {
        Ok::<_, DomainError>(Booking {
            id: BookingId::new(),
            reference: reference.to_string(),
            guest_id: Some(guest.id),
            guest_name: guest.name.clone(),
            property_id: property.id,
            property_name: property.name.clone(),
            stay: StayRange::new(date(check_in)?, date(check_out)?)?,
            status,
            payment_status,
            total_amount: money(total),
            channel,
        })
    };
    let bookings = vec![
        booking(
            "BK-7732",
            &guests[0],
            loft,
            "2023-10-25",
            "2023-10-28",
            BookingStatus::Confirmed,
            PaymentStatus::Paid,
            450,
            Channel::Airbnb,
        )?,
        booking(
            "BK-9921",
            &guests[1],
            villa,
            "2023-11-01",
            "2023-11-07",
            BookingStatus::Pending,
            PaymentStatus::Pending,
            1200,
            Channel::BookingCom,
        )?,
        booking(
            "BK-1002",
            &guests[2],
            studio,
            "2023-10-27",
            "2023-10-29",
            BookingStatus::Completed,
            PaymentStatus::Paid,
            200,
            Channel::Direct,
        )?,
    ];

    let task = |title: &str,
                kind: TaskKind,
                priority: Priority,
                status: TaskStatus,
                property: &Property,
                due: &str,
                description: &str| {
        Ok::<_, DomainError>(Task {
            id: TaskId::new(),
            title: title.to_string(),
            kind,
            priority,
            status,
            assignee: None,
            property_id: property.id,
            due_date: date(due)?,
            description: Some(description.to_string()),
            approval_status: ApprovalStatus::Approved,
        })
    };
    let tasks = vec![
        task(
            "Replace AC Filter",
            TaskKind::Maintenance,
            Priority::Medium,
            TaskStatus::Open,
            loft,
            "2023-10-30",
            "AC unit in master bedroom is making noise.",
        )?,
        task(
            "Deep Clean after Guest",
            TaskKind::Cleaning,
            Priority::High,
            TaskStatus::InProgress,
            villa,
            "2023-11-07",
            "Full turnover cleaning required.",
        )?,
        task(
            "Fix Leaky Faucet",
            TaskKind::Maintenance,
            Priority::Low,
            TaskStatus::Completed,
            studio,
            "2023-10-20",
            "Kitchen sink faucet dripping.",
        )?,
    ];

    let record = |on: &str, description: &str, amount: i64, kind: RecordKind, category: &str, reference: Option<String>| {
        Ok::<_, DomainError>(FinanceRecord {
            id: FinanceRecordId::new(),
            date: date(on)?,
            description: description.to_string(),
            amount: money(amount),
            kind,
            category: category.to_string(),
            reference_id: reference,
            property_id: None,
        })
    };
    let finance = vec![
        record(
            "2023-10-25",
            "Booking BK-7732 Payment",
            450,
            RecordKind::Revenue,
            ACCOMMODATION,
            Some(bookings[0].id.to_string()),
        )?,
        record(
            "2023-10-26",
            "Plumbing Repair",
            -120,
            RecordKind::Expense,
            "Maintenance",
            Some(tasks[2].id.to_string()),
        )?,
        record(
            "2023-10-29",
            "Booking BK-1002 Payment",
            200,
            RecordKind::Revenue,
            ACCOMMODATION,
            Some(bookings[2].id.to_string()),
        )?,
        record("2023-10-30", "Cleaning Supplies", -50, RecordKind::Expense, "Supplies", None)?,
    ];

    let rule = |name: &str, description: &str, active: bool, trigger: Trigger, action: Action, ago: Duration| {
        AutomationRule {
            id: AutomationRuleId::new(),
            name: name.to_string(),
            description: description.to_string(),
            active,
            trigger,
            action,
            last_run: Some(now - ago),
        }
    };
    let automations = vec![
        rule(
            "Auto-Create Cleaning Task",
            "Automatically creates a cleaning task when a booking status changes to Confirmed.",
            true,
            Trigger::BookingConfirmed,
            Action::CreateTask { kind: TaskKind::Cleaning },
            Duration::hours(2),
        ),
        rule(
            "Check-in Instructions",
            "Sends email with door codes and instructions 24 hours before check-in.",
            true,
            Trigger::BeforeCheckIn { hours: 24 },
            Action::SendEmail,
            Duration::minutes(10),
        ),
        rule(
            "Monthly Owner Report",
            "Generates PDF statement and emails it to owners on the 1st of each month.",
            false,
            Trigger::MonthlyOnDay { day: 1 },
            Action::GenerateOwnerReport,
            Duration::days(30),
        ),
        rule(
            "Long Stay Maintenance",
            "Schedules a mid-stay inspection for bookings longer than 7 nights.",
            true,
            Trigger::LongStay { min_nights: 7 },
            Action::CreateTask { kind: TaskKind::Maintenance },
            Duration::days(3),
        ),
    ];

    // Newest first.
    let audit = vec![
        (
            "Admin User",
            AuditAction::Create,
            "Booking",
            "Created booking BK-7732 manually",
            Duration::hours(1),
        ),
        (
            "Admin User",
            AuditAction::Update,
            "Property",
            "Updated price for Downtown Luxury Loft",
            Duration::hours(3),
        ),
        (
            "Staff Member",
            AuditAction::Update,
            "Task",
            "Marked Cleaning Task Deep Clean after Guest as In Progress",
            Duration::days(1),
        ),
        (
            "System",
            AuditAction::Create,
            "Task",
            "Auto-created cleaning task for Checkout BK-7732",
            Duration::days(2),
        ),
        (
            "Admin User",
            AuditAction::Login,
            "Auth",
            "Successful login from 192.168.1.1",
            Duration::days(2) + Duration::hours(8),
        ),
    ]
    .into_iter()
    .map(|(user, action, entity, details, ago)| {
        AuditEntry::new(AuditEntryId::new(), user, action, entity, details, now - ago)
    })
    .collect();

    let mut seen = Notification::new(
        NotificationId::new(),
        "Task Completed",
        "Maintenance: Fix Leaky Faucet marked as completed.",
        Level::Info,
        now - Duration::hours(1),
    );
    seen.mark_read();
    let notifications = vec![
        Notification::new(
            NotificationId::new(),
            "New Booking Confirmed",
            "Alice Johnson booked Downtown Luxury Loft (Oct 25-28)",
            Level::Success,
            now - Duration::minutes(10),
        ),
        seen,
    ];

    let integration = |name: &str,
                       category: IntegrationCategory,
                       description: &str,
                       status: IntegrationStatus,
                       icon: &str,
                       synced: Option<Duration>| Integration {
        id: IntegrationId::new(),
        name: name.to_string(),
        category,
        description: description.to_string(),
        status,
        icon: icon.to_string(),
        last_sync: synced.map(|ago| now - ago),
    };
    let integrations = vec![
        integration(
            "Airbnb",
            IntegrationCategory::Channel,
            "Sync bookings, availability, and messages.",
            IntegrationStatus::Connected,
            "airbnb",
            Some(Duration::minutes(5)),
        ),
        integration(
            "Booking.com",
            IntegrationCategory::Channel,
            "Manage reservations and pricing.",
            IntegrationStatus::Connected,
            "booking",
            Some(Duration::hours(1)),
        ),
        integration(
            "Stripe",
            IntegrationCategory::Payment,
            "Process credit card payments.",
            IntegrationStatus::Connected,
            "stripe",
            Some(Duration::zero()),
        ),
        integration(
            "Vrbo",
            IntegrationCategory::Channel,
            "Sync listings with Expedia Group.",
            IntegrationStatus::Disconnected,
            "vrbo",
            None,
        ),
        integration(
            "Mailchimp",
            IntegrationCategory::Communication,
            "Sync guest emails for marketing.",
            IntegrationStatus::Disconnected,
            "mailchimp",
            None,
        ),
        integration(
            "QuickBooks",
            IntegrationCategory::Tools,
            "Automate accounting and invoicing.",
            IntegrationStatus::Error,
            "quickbooks",
            Some(Duration::hours(2)),
        ),
    ];

    let old_booking = Booking {
        id: BookingId::new(),
        reference: "BK-OLD-001".to_string(),
        guest_id: None,
        guest_name: "Former Guest".to_string(),
        property_id: loft.id,
        property_name: loft.name.clone(),
        stay: StayRange::new(date("2023-08-01")?, date("2023-08-04")?)?,
        status: BookingStatus::Completed,
        payment_status: PaymentStatus::Paid,
        total_amount: money(450),
        channel: Channel::Direct,
    };
    let duplicate_guest = Guest {
        id: GuestId::new(),
        name: "John Doe (Duplicate)".to_string(),
        contact: ContactInfo::new("", ""),
        total_stays: 0,
        total_spent: Money::ZERO,
        last_stay: None,
        rating: 5,
    };
    let old_task = Task {
        id: TaskId::new(),
        title: "Old Cleaning Task".to_string(),
        kind: TaskKind::Cleaning,
        priority: Priority::Low,
        status: TaskStatus::Completed,
        assignee: None,
        property_id: villa.id,
        due_date: date("2023-07-09")?,
        description: None,
        approval_status: ApprovalStatus::Approved,
    };
    let archive = vec![
        ArchivedItem::archive(
            ArchiveId::new(),
            ArchivedRecord::Booking(old_booking),
            "Admin User",
            now - Duration::days(45),
        ),
        ArchivedItem::archive(
            ArchiveId::new(),
            ArchivedRecord::Guest(duplicate_guest),
            "Admin User",
            now - Duration::days(70),
        ),
        ArchivedItem::archive(
            ArchiveId::new(),
            ArchivedRecord::Task(old_task),
            "Staff Member",
            now - Duration::days(100),
        ),
    ];

    let template = |name: &str, kind: TemplateKind, category: TemplateCategory, content: &str, updated: &str| {
        Ok::<_, DomainError>(Template {
            id: TemplateId::new(),
            name: name.to_string(),
            kind,
            category,
            content: content.to_string(),
            last_updated: date(updated)?,
        })
    };
    let templates = vec![
        template(
            "Check-in Instructions",
            TemplateKind::Email,
            TemplateCategory::Guest,
            "Dear {guest_name},\n\nWelcome to {property_name}! Here are your check-in details...",
            "2023-10-15",
        )?,
        template(
            "Standard Cleaning Checklist",
            TemplateKind::Checklist,
            TemplateCategory::Cleaning,
            r#"["Change sheets", "Vacuum floors", "Clean bathroom", "Refill amenities"]"#,
            "2023-09-01",
        )?,
        template(
            "Checkout Reminder",
            TemplateKind::Email,
            TemplateCategory::Guest,
            "Hi {guest_name},\n\nWe hope you enjoyed your stay. Just a reminder that checkout is at 11:00 AM.",
            "2023-10-20",
        )?,
    ];

    Ok(Snapshot {
        properties,
        documents,
        guests,
        owners,
        staff,
        bookings,
        tasks,
        finance,
        automations,
        audit,
        notifications,
        integrations,
        archive,
        templates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodgex_bookings::is_available;

    #[test]
    fn seed_is_consistent() {
        let snapshot = mock_snapshot(Utc::now()).unwrap();
        assert_eq!(snapshot.properties.len(), 4);
        assert_eq!(snapshot.bookings.len(), 3);
        assert_eq!(snapshot.integrations.len(), 6);

        for b in &snapshot.bookings {
            assert!(snapshot.properties.iter().any(|p| p.id == b.property_id));
            let others: Vec<_> = snapshot.bookings.iter().filter(|o| o.id != b.id).collect();
            assert!(is_available(others, b.property_id, b.check_in(), b.check_out()));
        }
    }
}
