//! Login/logout auditing and the AI assistant entry points.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use lodgex_activity::AuditAction;
use lodgex_ai::EmailKind;
use lodgex_auth::Role;

use super::CrmService;
use crate::error::ServiceResult;

/// Which collection an insight is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightSubject {
    Bookings,
    Tasks,
    Finance,
    Properties,
}

impl InsightSubject {
    fn context(self) -> &'static str {
        match self {
            InsightSubject::Bookings => "recent bookings",
            InsightSubject::Tasks => "operational tasks",
            InsightSubject::Finance => "financial records",
            InsightSubject::Properties => "property portfolio",
        }
    }
}

impl CrmService {
    pub async fn record_login(&self, role: Role) -> ServiceResult<()> {
        self.audit(
            role.demo_user_name(),
            AuditAction::Login,
            "Auth",
            format!("User logged in as {}", role.as_str()),
        )
        .await?;
        Ok(())
    }

    pub async fn record_logout(&self, actor: &str) -> ServiceResult<()> {
        self.audit(actor, AuditAction::Login, "Auth", "User logged out").await?;
        Ok(())
    }

    /// Short insight over the newest records of `subject`. Never fails on the AI side.
    #[instrument(skip(self), err)]
    pub async fn insight(&self, subject: InsightSubject) -> ServiceResult<String> {
        let context = subject.context();
        let text = match subject {
            InsightSubject::Bookings => {
                let rows = newest_first(self.store.bookings().list()?);
                self.assistant.insight(context, &rows).await
            }
            InsightSubject::Tasks => {
                let rows = newest_first(self.store.tasks().list()?);
                self.assistant.insight(context, &rows).await
            }
            InsightSubject::Finance => {
                let rows = newest_first(self.store.finance().list()?);
                self.assistant.insight(context, &rows).await
            }
            InsightSubject::Properties => {
                let rows = self.store.properties().list()?;
                self.assistant.insight(context, &rows).await
            }
        };
        Ok(text)
    }

    pub async fn draft_guest_email(&self, guest_name: &str, kind: EmailKind) -> String {
        self.assistant.guest_email(guest_name, kind).await
    }
}

fn newest_first<T>(mut rows: Vec<T>) -> Vec<T> {
    rows.reverse();
    rows
}
