//! `CrmService`: the single entry point over the working set.
//!
//! Every write happens locally first, under the store's table locks, and is then pushed
//! to the optional remote mirror. A mirror failure is logged and surfaced as a Warning
//! notification; the local change stays.

mod activity;
mod bookings;
mod catalog;
mod integrations;
mod ledger;
mod people;
mod session;
mod work;

#[cfg(test)]
mod tests;

pub use bookings::Availability;
pub use ledger::{DashboardSummary, ImportBatch, ImportSummary};
pub use session::InsightSubject;

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use uuid::Uuid;

use lodgex_activity::{AuditAction, AuditEntry, Level, Notification};
use lodgex_ai::Assistant;
use lodgex_core::{AuditEntryId, Entity, NotificationId};
use lodgex_integrations::{ChannelFeed, SimulatedChannelFeed};

use crate::config::Config;
use crate::error::{RemoteError, ServiceResult};
use crate::gemini::GeminiClient;
use crate::remote::{document, Collection, PostgresRemoteStore, RemoteStore, Snapshot};
use crate::seed;
use crate::store::{InMemoryStore, RecordStore};

/// Capacity of the notification fan-out. Slow subscribers lose the oldest items.
const NOTIFICATION_BUFFER: usize = 64;

pub struct CrmService {
    store: Arc<dyn RecordStore>,
    remote: Option<Arc<dyn RemoteStore>>,
    feed: Arc<dyn ChannelFeed>,
    assistant: Assistant,
    notifications_tx: broadcast::Sender<Notification>,
}

impl CrmService {
    /// Service over `store` with no mirror, the simulated channel feed and simulated AI.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        let (notifications_tx, _) = broadcast::channel(NOTIFICATION_BUFFER);
        Self {
            store,
            remote: None,
            feed: Arc::new(SimulatedChannelFeed::new()),
            assistant: Assistant::simulated(),
            notifications_tx,
        }
    }

    /// In-memory service preloaded with the demo portfolio.
    pub fn seeded() -> ServiceResult<Self> {
        let service = Self::new(Arc::new(InMemoryStore::new()));
        service.load_snapshot(seed::mock_snapshot(Utc::now())?)?;
        Ok(service)
    }

    pub fn with_remote(mut self, remote: Arc<dyn RemoteStore>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn with_feed(mut self, feed: Arc<dyn ChannelFeed>) -> Self {
        self.feed = feed;
        self
    }

    pub fn with_assistant(mut self, assistant: Assistant) -> Self {
        self.assistant = assistant;
        self
    }

    /// Build the service the way `config` asks for.
    ///
    /// With persistence on, the working set is resumed from the remote snapshot. When that
    /// snapshot is empty or unreachable (or persistence is off) and `seed_mock` is set,
    /// the demo portfolio is loaded instead.
    pub async fn bootstrap(config: &Config) -> ServiceResult<Self> {
        let mut service = Self::new(Arc::new(InMemoryStore::new()));

        if let Some(key) = &config.gemini_api_key {
            let client = GeminiClient::new(key.clone(), config.gemini_model.clone());
            service = service.with_assistant(Assistant::new(Some(Arc::new(client))));
        }

        let mut resumed = false;
        if let Some(url) = &config.database_url {
            match PostgresRemoteStore::connect(url).await {
                Ok(remote) => {
                    match remote.load().await {
                        Ok(snapshot) if !snapshot.is_empty() => {
                            info!(
                                properties = snapshot.properties.len(),
                                bookings = snapshot.bookings.len(),
                                "resumed working set from remote store"
                            );
                            service.load_snapshot(snapshot)?;
                            resumed = true;
                        }
                        Ok(_) => info!("remote store is empty"),
                        Err(err) => warn!(error = %err, "remote snapshot unavailable"),
                    }
                    service = service.with_remote(Arc::new(remote));
                }
                Err(err) => warn!(error = %err, "remote store unreachable; running in memory only"),
            }
        }

        if !resumed && config.seed_mock {
            info!("seeding working set with mock data");
            service.load_snapshot(seed::mock_snapshot(Utc::now())?)?;
        }
        Ok(service)
    }

    /// Replace the whole working set.
    pub fn load_snapshot(&self, snapshot: Snapshot) -> ServiceResult<()> {
        let s = &self.store;
        s.properties().replace_all(snapshot.properties)?;
        s.documents().replace_all(snapshot.documents)?;
        s.guests().replace_all(snapshot.guests)?;
        s.owners().replace_all(snapshot.owners)?;
        s.staff().replace_all(snapshot.staff)?;
        s.bookings().replace_all(snapshot.bookings)?;
        s.tasks().replace_all(snapshot.tasks)?;
        s.finance().replace_all(snapshot.finance)?;
        s.automations().replace_all(snapshot.automations)?;
        s.audit().replace_all(snapshot.audit)?;
        s.notifications().replace_all(snapshot.notifications)?;
        s.integrations().replace_all(snapshot.integrations)?;
        s.archive().replace_all(snapshot.archive)?;
        s.templates().replace_all(snapshot.templates)?;
        Ok(())
    }

    pub fn assistant(&self) -> &Assistant {
        &self.assistant
    }

    /// Live notifications. Receivers that fall behind skip ahead (`Lagged`).
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notifications_tx.subscribe()
    }

    // ── Side-effect helpers ───────────────────────────────────────────

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    fn today() -> NaiveDate {
        Self::now().date_naive()
    }

    /// Append an audit entry and mirror it. Mirror failures are only debug-logged.
    async fn audit(&self, user: &str, action: AuditAction, entity: &str, details: impl Into<String>) -> ServiceResult<AuditEntry> {
        let entry = AuditEntry::new(AuditEntryId::new(), user, action, entity, details, Self::now());
        self.store.audit().upsert(entry.clone())?;

        if let Some(remote) = &self.remote {
            let pushed = match document(&entry) {
                Ok(data) => remote.upsert(Collection::Audit, entry.id.into(), data).await,
                Err(err) => Err(err),
            };
            if let Err(err) = pushed {
                debug!(error = %err, "audit entry not mirrored");
            }
        }
        Ok(entry)
    }

    /// Store and broadcast a notification without mirroring it.
    fn push_notification(&self, notification: Notification) -> ServiceResult<Notification> {
        self.store.notifications().upsert(notification.clone())?;
        // No subscribers is fine.
        let _ = self.notifications_tx.send(notification.clone());
        Ok(notification)
    }

    async fn notify(&self, title: &str, message: impl Into<String>, level: Level) -> ServiceResult<Notification> {
        let notification = self.push_notification(Notification::new(
            NotificationId::new(),
            title,
            message,
            level,
            Self::now(),
        ))?;
        if let Some(remote) = &self.remote {
            let pushed = match document(&notification) {
                Ok(data) => remote.upsert(Collection::Notifications, notification.id.into(), data).await,
                Err(err) => Err(err),
            };
            if let Err(err) = pushed {
                warn!(error = %err, "notification not mirrored");
            }
        }
        Ok(notification)
    }

    /// Push `record` to the mirror, reporting (not propagating) failure.
    async fn mirror<T>(&self, collection: Collection, record: &T)
    where
        T: Entity + Serialize + Sync,
        T::Id: Into<Uuid>,
    {
        let Some(remote) = &self.remote else {
            return;
        };
        let pushed = match document(record) {
            Ok(data) => remote.upsert(collection, record.id().into(), data).await,
            Err(err) => Err(err),
        };
        if let Err(err) = pushed {
            self.remote_failed(collection.as_str(), err);
        }
    }

    async fn mirror_delete(&self, collection: Collection, id: impl Into<Uuid>) {
        let Some(remote) = &self.remote else {
            return;
        };
        if let Err(err) = remote.delete(collection, id.into()).await {
            self.remote_failed(collection.as_str(), err);
        }
    }

    fn remote_failed(&self, what: &str, err: RemoteError) {
        warn!(error = %err, collection = what, "remote write failed; keeping local change");
        let warning = Notification::new(
            NotificationId::new(),
            "Sync Warning",
            format!("Saved locally, but the remote {what} write failed: {err}"),
            Level::Warning,
            Self::now(),
        );
        if let Err(err) = self.push_notification(warning) {
            warn!(error = %err, "could not record sync warning");
        }
    }
}

impl core::fmt::Debug for CrmService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CrmService")
            .field("mirrored", &self.remote.is_some())
            .field("assistant", &self.assistant)
            .finish_non_exhaustive()
    }
}
