//! Optional remote mirror of the working set.
//!
//! The working set is authoritative while the process runs. Writes are pushed to the
//! mirror after the local effect, and failures are reported but never rolled back.
//! The one exception is a booking the mirror refuses as overlapping: that insert is
//! undone locally and the conflict returned.

pub mod postgres;

pub use postgres::PostgresRemoteStore;

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use lodgex_activity::{ArchivedItem, AuditEntry, Notification, Template};
use lodgex_automation::AutomationRule;
use lodgex_bookings::Booking;
use lodgex_finance::FinanceRecord;
use lodgex_integrations::Integration;
use lodgex_parties::{Guest, Owner, StaffMember};
use lodgex_properties::{Property, PropertyDocument};
use lodgex_tasks::Task;

use crate::error::RemoteError;

/// Document collections mirrored as JSON. Bookings have their own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Properties,
    Documents,
    Guests,
    Owners,
    Staff,
    Tasks,
    Finance,
    Automations,
    Audit,
    Notifications,
    Integrations,
    Archive,
    Templates,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Properties => "properties",
            Collection::Documents => "documents",
            Collection::Guests => "guests",
            Collection::Owners => "owners",
            Collection::Staff => "staff",
            Collection::Tasks => "tasks",
            Collection::Finance => "finance",
            Collection::Automations => "automations",
            Collection::Audit => "audit",
            Collection::Notifications => "notifications",
            Collection::Integrations => "integrations",
            Collection::Archive => "archive",
            Collection::Templates => "templates",
        }
    }
}

impl core::fmt::Display for Collection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the mirror holds, in write order.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub properties: Vec<Property>,
    pub documents: Vec<PropertyDocument>,
    pub guests: Vec<Guest>,
    pub owners: Vec<Owner>,
    pub staff: Vec<StaffMember>,
    pub bookings: Vec<Booking>,
    pub tasks: Vec<Task>,
    pub finance: Vec<FinanceRecord>,
    pub automations: Vec<AutomationRule>,
    pub audit: Vec<AuditEntry>,
    pub notifications: Vec<Notification>,
    pub integrations: Vec<Integration>,
    pub archive: Vec<ArchivedItem>,
    pub templates: Vec<Template>,
}

impl Snapshot {
    /// No properties and no bookings: nothing worth resuming from.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.bookings.is_empty()
    }
}

#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn load(&self) -> Result<Snapshot, RemoteError>;

    /// Insert a new booking, re-checking availability in the same transaction.
    async fn insert_booking(&self, booking: &Booking) -> Result<(), RemoteError>;

    /// Insert or overwrite a booking without an availability check.
    async fn save_booking(&self, booking: &Booking) -> Result<(), RemoteError>;

    async fn upsert(&self, collection: Collection, id: Uuid, data: serde_json::Value) -> Result<(), RemoteError>;

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<(), RemoteError>;
}

/// Serialize `record` for [`RemoteStore::upsert`].
pub fn document<T: Serialize>(record: &T) -> Result<serde_json::Value, RemoteError> {
    serde_json::to_value(record).map_err(|e| RemoteError::Decode(e.to_string()))
}
