use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use lodgex_core::{DomainError, DomainResult, Entity, TemplateId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateKind {
    Email,
    Checklist,
    Contract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateCategory {
    Guest,
    Cleaning,
    Owner,
    Maintenance,
}

/// Reusable message/checklist body. Checklists keep their items as a JSON array string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TemplateKind,
    pub category: TemplateCategory,
    pub content: String,
    pub last_updated: NaiveDate,
}

impl Entity for Template {
    type Id = TemplateId;

    fn id(&self) -> TemplateId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTemplate {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TemplateKind,
    pub category: TemplateCategory,
    pub content: String,
}

/// Values substituted into `{guest_name}` and `{property_name}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateVars {
    #[serde(default)]
    pub guest_name: Option<String>,
    #[serde(default)]
    pub property_name: Option<String>,
}

impl Template {
    pub fn create(id: TemplateId, input: NewTemplate, today: NaiveDate) -> DomainResult<Self> {
        if input.name.trim().is_empty() {
            return Err(DomainError::validation("template name cannot be empty"));
        }
        Ok(Self {
            id,
            name: input.name,
            kind: input.kind,
            category: input.category,
            content: input.content,
            last_updated: today,
        })
    }

    /// Fill in known placeholders. Placeholders without a value are left as-is.
    pub fn render(&self, vars: &TemplateVars) -> String {
        let mut out = self.content.clone();
        if let Some(guest) = &vars.guest_name {
            out = out.replace("{guest_name}", guest);
        }
        if let Some(property) = &vars.property_name {
            out = out.replace("{property_name}", property);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_in_email() -> Template {
        Template::create(
            TemplateId::new(),
            NewTemplate {
                name: "Check-in Instructions".to_string(),
                kind: TemplateKind::Email,
                category: TemplateCategory::Guest,
                content: "Dear {guest_name},\n\nWelcome to {property_name}!".to_string(),
            },
            NaiveDate::from_ymd_opt(2023, 10, 15).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn render_fills_both_placeholders() {
        let out = check_in_email().render(&TemplateVars {
            guest_name: Some("Alice Johnson".to_string()),
            property_name: Some("Seaside Villa Retreat".to_string()),
        });
        assert_eq!(out, "Dear Alice Johnson,\n\nWelcome to Seaside Villa Retreat!");
    }

    #[test]
    fn missing_values_leave_placeholders() {
        let out = check_in_email().render(&TemplateVars {
            guest_name: Some("Alice".to_string()),
            property_name: None,
        });
        assert!(out.contains("{property_name}"));
    }
}
