use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lodgex_bookings::Booking;
use lodgex_core::{ArchiveId, Entity};
use lodgex_parties::Guest;
use lodgex_properties::Property;
use lodgex_tasks::Task;

/// A record removed from its collection, kept whole so it can be restored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ArchivedRecord {
    Property(Property),
    Booking(Booking),
    Guest(Guest),
    Task(Task),
}

impl ArchivedRecord {
    pub fn kind(&self) -> &'static str {
        match self {
            ArchivedRecord::Property(_) => "Property",
            ArchivedRecord::Booking(_) => "Booking",
            ArchivedRecord::Guest(_) => "Guest",
            ArchivedRecord::Task(_) => "Task",
        }
    }

    /// Display name shown in the archive list.
    pub fn label(&self) -> String {
        match self {
            ArchivedRecord::Property(p) => p.name.clone(),
            ArchivedRecord::Booking(b) => b.reference.clone(),
            ArchivedRecord::Guest(g) => g.name.clone(),
            ArchivedRecord::Task(t) => t.title.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedItem {
    pub id: ArchiveId,
    pub name: String,
    pub archived_at: DateTime<Utc>,
    pub archived_by: String,
    #[serde(flatten)]
    pub record: ArchivedRecord,
}

impl Entity for ArchivedItem {
    type Id = ArchiveId;

    fn id(&self) -> ArchiveId {
        self.id
    }
}

impl ArchivedItem {
    pub fn archive(id: ArchiveId, record: ArchivedRecord, by: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: record.label(),
            archived_at: at,
            archived_by: by.into(),
            record,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodgex_core::{PropertyId, TaskId};
    use lodgex_tasks::{NewTask, TaskKind};

    #[test]
    fn archived_task_round_trips_with_type_and_data() {
        let task = Task::create(
            TaskId::new(),
            NewTask::open("Old Cleaning", TaskKind::Cleaning, PropertyId::new(), "2023-07-10".parse().unwrap()),
        )
        .unwrap();
        let item = ArchivedItem::archive(ArchiveId::new(), ArchivedRecord::Task(task.clone()), "Admin User", Utc::now());

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "Task");
        assert_eq!(json["name"], "Old Cleaning");
        assert_eq!(json["data"]["title"], "Old Cleaning");

        let back: ArchivedItem = serde_json::from_value(json).unwrap();
        assert_eq!(back.record, ArchivedRecord::Task(task));
    }
}
