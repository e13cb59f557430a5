use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use lodgex_core::{DomainError, DomainResult, Entity, PropertyId, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    Cleaning,
    Maintenance,
}

impl TaskKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskKind::Cleaning => "Cleaning",
            TaskKind::Maintenance => "Maintenance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Board column. Tasks move freely between columns (including back to `Open`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Open, TaskStatus::InProgress, TaskStatus::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Open => "Open",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl core::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: TaskKind,
    pub priority: Priority,
    pub status: TaskStatus,
    #[serde(default)]
    pub assignee: Option<String>,
    pub property_id: PropertyId,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_approval")]
    pub approval_status: ApprovalStatus,
}

impl Entity for Task {
    type Id = TaskId;

    fn id(&self) -> TaskId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: TaskKind,
    #[serde(default = "default_priority")]
    pub priority: Priority,
    #[serde(default = "default_status")]
    pub status: TaskStatus,
    #[serde(default)]
    pub assignee: Option<String>,
    pub property_id: PropertyId,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_approval")]
    pub approval_status: ApprovalStatus,
}

fn default_priority() -> Priority {
    Priority::Medium
}

fn default_status() -> TaskStatus {
    TaskStatus::Open
}

fn default_approval() -> ApprovalStatus {
    ApprovalStatus::Approved
}

/// Partial update; `None` keeps the existing value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
    pub assignee: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub approval_status: Option<ApprovalStatus>,
}

impl NewTask {
    /// An open, approved task with the default priority.
    pub fn open(
        title: impl Into<String>,
        kind: TaskKind,
        property_id: PropertyId,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            kind,
            priority: default_priority(),
            status: default_status(),
            assignee: None,
            property_id,
            due_date,
            description: None,
            approval_status: default_approval(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Task {
    pub fn create(id: TaskId, input: NewTask) -> DomainResult<Self> {
        require_title(&input.title)?;
        Ok(Self {
            id,
            title: input.title,
            kind: input.kind,
            priority: input.priority,
            status: input.status,
            assignee: input.assignee,
            property_id: input.property_id,
            due_date: input.due_date,
            description: input.description,
            approval_status: input.approval_status,
        })
    }

    pub fn updated(&self, update: TaskUpdate) -> DomainResult<Self> {
        let mut next = self.clone();
        if let Some(v) = update.title {
            next.title = v;
        }
        if let Some(v) = update.priority {
            next.priority = v;
        }
        if let Some(v) = update.status {
            next.status = v;
        }
        if update.assignee.is_some() {
            next.assignee = update.assignee;
        }
        if let Some(v) = update.due_date {
            next.due_date = v;
        }
        if update.description.is_some() {
            next.description = update.description;
        }
        if let Some(v) = update.approval_status {
            next.approval_status = v;
        }
        require_title(&next.title)?;
        Ok(next)
    }

    pub fn is_open(&self) -> bool {
        self.status != TaskStatus::Completed
    }
}

fn require_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::validation("task title cannot be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn due() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 10, 30).unwrap()
    }

    #[test]
    fn new_task_json_defaults_to_open_and_approved() {
        let json = serde_json::json!({
            "title": "Replace AC Filter",
            "type": "Maintenance",
            "propertyId": PropertyId::new(),
            "dueDate": "2023-10-30"
        });
        let input: NewTask = serde_json::from_value(json).unwrap();
        let task = Task::create(TaskId::new(), input).unwrap();

        assert_eq!(task.status, TaskStatus::Open);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.approval_status, ApprovalStatus::Approved);
    }

    #[test]
    fn completed_task_can_be_reopened() {
        let task = Task::create(
            TaskId::new(),
            NewTask::open("Fix Leaky Faucet", TaskKind::Maintenance, PropertyId::new(), due()),
        )
        .unwrap();
        let done = task
            .updated(TaskUpdate {
                status: Some(TaskStatus::Completed),
                ..TaskUpdate::default()
            })
            .unwrap();
        assert!(!done.is_open());

        let reopened = done
            .updated(TaskUpdate {
                status: Some(TaskStatus::Open),
                ..TaskUpdate::default()
            })
            .unwrap();
        assert!(reopened.is_open());
    }

    #[test]
    fn blank_title_is_rejected() {
        let input = NewTask::open(" ", TaskKind::Cleaning, PropertyId::new(), due());
        assert!(matches!(
            Task::create(TaskId::new(), input),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn in_progress_serializes_with_space() {
        assert_eq!(
            serde_json::to_value(TaskStatus::InProgress).unwrap(),
            serde_json::json!("In Progress")
        );
    }
}
