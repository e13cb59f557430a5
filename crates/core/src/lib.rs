//! `lodgex-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! typed identifiers, the domain error model, money, and stay date ranges.

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod stay;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{
    ArchiveId, AuditEntryId, AutomationRuleId, BookingId, DocumentId, FinanceRecordId, GuestId,
    IntegrationId, NotificationId, OwnerId, PropertyId, StaffId, TaskId, TemplateId, UserId,
};
pub use money::Money;
pub use stay::StayRange;
pub use value_object::ValueObject;
