use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use lodgex_core::{DocumentId, DomainResult, Entity, StaffId};

use crate::contact::{require_name, ContactInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffRole {
    Cleaner,
    Maintenance,
    Manager,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffStatus {
    Active,
    Inactive,
    #[serde(rename = "On Leave")]
    OnLeave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffDocumentKind {
    Contract,
    #[serde(rename = "ID")]
    Id,
    Certification,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffDocument {
    pub id: DocumentId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: StaffDocumentKind,
    pub url: String,
    pub upload_date: NaiveDate,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: StaffId,
    pub name: String,
    pub role: StaffRole,
    #[serde(flatten)]
    pub contact: ContactInfo,
    pub status: StaffStatus,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub joined_date: NaiveDate,
    #[serde(default)]
    pub documents: Vec<StaffDocument>,
}

impl Entity for StaffMember {
    type Id = StaffId;

    fn id(&self) -> StaffId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStaffMember {
    pub name: String,
    pub role: StaffRole,
    #[serde(flatten)]
    pub contact: ContactInfo,
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Defaults to the registration day.
    #[serde(default)]
    pub joined_date: Option<NaiveDate>,
    #[serde(default)]
    pub documents: Vec<StaffDocument>,
}

/// Partial update; `None` keeps the existing value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffUpdate {
    pub name: Option<String>,
    pub role: Option<StaffRole>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<StaffStatus>,
    pub avatar_url: Option<String>,
    pub documents: Option<Vec<StaffDocument>>,
}

impl StaffMember {
    pub fn hire(id: StaffId, input: NewStaffMember, today: NaiveDate) -> DomainResult<Self> {
        require_name(&input.name)?;
        input.contact.validate()?;
        Ok(Self {
            id,
            name: input.name,
            role: input.role,
            contact: input.contact,
            status: StaffStatus::Active,
            avatar_url: input.avatar_url,
            joined_date: input.joined_date.unwrap_or(today),
            documents: input.documents,
        })
    }

    pub fn updated(&self, update: StaffUpdate) -> DomainResult<Self> {
        let mut next = self.clone();
        if let Some(v) = update.name {
            next.name = v;
        }
        if let Some(v) = update.role {
            next.role = v;
        }
        if let Some(v) = update.email {
            next.contact.email = v;
        }
        if let Some(v) = update.phone {
            next.contact.phone = v;
        }
        if let Some(v) = update.status {
            next.status = v;
        }
        if update.avatar_url.is_some() {
            next.avatar_url = update.avatar_url;
        }
        if let Some(v) = update.documents {
            next.documents = v;
        }
        require_name(&next.name)?;
        next.contact.validate()?;
        Ok(next)
    }

    /// Staff on leave or inactive should not receive new task assignments.
    pub fn is_available(&self) -> bool {
        self.status == StaffStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 10, 30).unwrap()
    }

    fn elena() -> NewStaffMember {
        NewStaffMember {
            name: "Elena Rodriguez".to_string(),
            role: StaffRole::Cleaner,
            contact: ContactInfo::new("elena@lodgex.com", "+1 555 2222"),
            avatar_url: None,
            joined_date: None,
            documents: Vec::new(),
        }
    }

    #[test]
    fn hire_defaults_joined_date_and_status() {
        let member = StaffMember::hire(StaffId::new(), elena(), today()).unwrap();
        assert_eq!(member.joined_date, today());
        assert_eq!(member.status, StaffStatus::Active);
        assert!(member.is_available());
    }

    #[test]
    fn putting_staff_on_leave_makes_them_unavailable() {
        let member = StaffMember::hire(StaffId::new(), elena(), today()).unwrap();
        let on_leave = member
            .updated(StaffUpdate {
                status: Some(StaffStatus::OnLeave),
                ..StaffUpdate::default()
            })
            .unwrap();
        assert!(!on_leave.is_available());
        assert_eq!(
            serde_json::to_value(on_leave.status).unwrap(),
            serde_json::json!("On Leave")
        );
    }

    #[test]
    fn clearing_the_name_is_rejected() {
        let member = StaffMember::hire(StaffId::new(), elena(), today()).unwrap();
        let result = member.updated(StaffUpdate {
            name: Some(String::new()),
            ..StaffUpdate::default()
        });
        assert!(result.is_err());
    }
}
