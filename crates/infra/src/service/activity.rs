//! Audit trail, notifications, the archive and templates.

use tracing::instrument;

use lodgex_activity::{
    ArchivedItem, ArchivedRecord, AuditAction, AuditEntry, Level, NewAuditEntry, NewTemplate, Notification, Template,
    TemplateVars,
};
use lodgex_core::{ArchiveId, DomainError, NotificationId, TemplateId};

use super::CrmService;
use crate::error::ServiceResult;
use crate::remote::Collection;

impl CrmService {
    /// Newest first.
    pub fn list_audit(&self) -> ServiceResult<Vec<AuditEntry>> {
        let mut entries = self.store.audit().list()?;
        entries.reverse();
        Ok(entries)
    }

    /// Record a client-side audit entry. `actor` stands in when the entry names no user.
    pub async fn record_audit(&self, actor: &str, input: NewAuditEntry) -> ServiceResult<AuditEntry> {
        let user = input.user.unwrap_or_else(|| actor.to_string());
        self.audit(&user, input.action, &input.entity, input.details).await
    }

    /// Newest first.
    pub fn list_notifications(&self) -> ServiceResult<Vec<Notification>> {
        let mut items = self.store.notifications().list()?;
        items.reverse();
        Ok(items)
    }

    pub async fn mark_notification_read(&self, id: NotificationId) -> ServiceResult<Notification> {
        let mut notification = self
            .store
            .notifications()
            .get(id)?
            .ok_or_else(|| DomainError::not_found(format!("notification {id}")))?;
        notification.mark_read();
        self.store.notifications().upsert(notification.clone())?;
        self.mirror(Collection::Notifications, &notification).await;
        Ok(notification)
    }

    /// Returns how many notifications were unread.
    pub async fn mark_all_notifications_read(&self) -> ServiceResult<usize> {
        let unread: Vec<Notification> = self
            .store
            .notifications()
            .list()?
            .into_iter()
            .filter(|n| !n.read)
            .collect();
        self.store.notifications().update_all(&|n| n.mark_read())?;

        for mut notification in unread.iter().cloned() {
            notification.mark_read();
            self.mirror(Collection::Notifications, &notification).await;
        }
        Ok(unread.len())
    }

    /// Newest first.
    pub fn list_archive(&self) -> ServiceResult<Vec<ArchivedItem>> {
        let mut items = self.store.archive().list()?;
        items.reverse();
        Ok(items)
    }

    /// Put an archived record back into its collection.
    ///
    /// A restored booking that still holds dates must not clash with the live bookings;
    /// in that case the item stays archived and a conflict is returned.
    #[instrument(skip(self), fields(archive_id = %id), err)]
    pub async fn restore_from_archive(&self, actor: &str, id: ArchiveId) -> ServiceResult<ArchivedItem> {
        let item = self
            .store
            .archive()
            .get(id)?
            .ok_or_else(|| DomainError::not_found(format!("archived item {id}")))?;

        match &item.record {
            ArchivedRecord::Property(property) => {
                self.store.properties().upsert(property.clone())?;
                self.mirror(Collection::Properties, property).await;
            }
            ArchivedRecord::Booking(booking) => {
                if booking.holds_dates() {
                    self.store.insert_booking_if_available(booking.clone())?;
                } else {
                    self.store.bookings().upsert(booking.clone())?;
                }
                if let Some(remote) = &self.remote {
                    if let Err(err) = remote.save_booking(booking).await {
                        self.remote_failed("bookings", err);
                    }
                }
            }
            ArchivedRecord::Guest(guest) => {
                self.store.guests().upsert(guest.clone())?;
                self.mirror(Collection::Guests, guest).await;
            }
            ArchivedRecord::Task(task) => {
                self.store.tasks().upsert(task.clone())?;
                self.mirror(Collection::Tasks, task).await;
            }
        }

        self.store.archive().remove(id)?;
        self.mirror_delete(Collection::Archive, id).await;

        self.audit(
            actor,
            AuditAction::Update,
            "Archive",
            format!("Restored {}: {}", item.record.kind(), item.name),
        )
        .await?;
        self.notify(
            "Item Restored",
            format!("{} has been restored from archive", item.name),
            Level::Success,
        )
        .await?;
        Ok(item)
    }

    #[instrument(skip(self), fields(archive_id = %id), err)]
    pub async fn delete_from_archive(&self, actor: &str, id: ArchiveId) -> ServiceResult<()> {
        self.store
            .archive()
            .remove(id)?
            .ok_or_else(|| DomainError::not_found(format!("archived item {id}")))?;
        self.mirror_delete(Collection::Archive, id).await;

        self.audit(actor, AuditAction::Delete, "Archive", format!("Permanently deleted item {id}"))
            .await?;
        Ok(())
    }

    pub fn list_templates(&self) -> ServiceResult<Vec<Template>> {
        Ok(self.store.templates().list()?)
    }

    #[instrument(skip(self, input), err)]
    pub async fn create_template(&self, actor: &str, input: NewTemplate) -> ServiceResult<Template> {
        let template = Template::create(TemplateId::new(), input, Self::today())?;
        self.store.templates().upsert(template.clone())?;
        self.mirror(Collection::Templates, &template).await;

        self.audit(actor, AuditAction::Create, "Template", format!("Created template: {}", template.name))
            .await?;
        Ok(template)
    }

    #[instrument(skip(self), fields(template_id = %id), err)]
    pub async fn delete_template(&self, actor: &str, id: TemplateId) -> ServiceResult<()> {
        self.store
            .templates()
            .remove(id)?
            .ok_or_else(|| DomainError::not_found(format!("template {id}")))?;
        self.mirror_delete(Collection::Templates, id).await;

        self.audit(actor, AuditAction::Delete, "Template", format!("Deleted template {id}"))
            .await?;
        Ok(())
    }

    pub fn render_template(&self, id: TemplateId, vars: &TemplateVars) -> ServiceResult<String> {
        let template = self
            .store
            .templates()
            .get(id)?
            .ok_or_else(|| DomainError::not_found(format!("template {id}")))?;
        Ok(template.render(vars))
    }
}
