//! Activity records: audit trail, notifications, the archive and message templates.
//!
//! Pure domain logic: no IO, no HTTP, no storage.

pub mod archive;
pub mod audit;
pub mod notification;
pub mod template;

pub use archive::{ArchivedItem, ArchivedRecord};
pub use audit::{AuditAction, AuditEntry, NewAuditEntry, SYSTEM_USER};
pub use notification::{Level, Notification};
pub use template::{NewTemplate, Template, TemplateCategory, TemplateKind, TemplateVars};
