use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lodgex_core::{Entity, NotificationId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub level: Level,
    pub read: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub link: Option<String>,
}

impl Entity for Notification {
    type Id = NotificationId;

    fn id(&self) -> NotificationId {
        self.id
    }
}

impl Notification {
    pub fn new(
        id: NotificationId,
        title: impl Into<String>,
        message: impl Into<String>,
        level: Level,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            message: message.into(),
            level,
            read: false,
            timestamp: at,
            link: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn mark_read(&mut self) {
        self.read = true;
    }
}
