use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lodgex_core::{AutomationRuleId, DomainError, DomainResult, Entity};
use lodgex_tasks::TaskKind;

/// What makes a rule fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum Trigger {
    /// A booking is created in `Confirmed` status.
    BookingConfirmed,
    /// A booking is created with strictly more than `min_nights` nights.
    LongStay { min_nights: u32 },
    /// Scheduled relative to check-in. Stored only; booking creation never fires it.
    BeforeCheckIn { hours: u32 },
    /// Scheduled monthly. Stored only; booking creation never fires it.
    MonthlyOnDay { day: u8 },
}

impl Trigger {
    /// Whether this trigger is evaluated when a booking is created.
    pub fn fires_on_booking(&self) -> bool {
        matches!(self, Trigger::BookingConfirmed | Trigger::LongStay { .. })
    }
}

impl core::fmt::Display for Trigger {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Trigger::BookingConfirmed => f.write_str("Booking Created (Confirmed)"),
            Trigger::LongStay { min_nights } => write!(f, "Booking Created (> {min_nights} nights)"),
            Trigger::BeforeCheckIn { hours } => write!(f, "{hours}h Before Check-in"),
            Trigger::MonthlyOnDay { day } => write!(f, "Monthly (day {day})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum Action {
    CreateTask { kind: TaskKind },
    SendEmail,
    GenerateOwnerReport,
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Action::CreateTask { kind } => write!(f, "Create Task ({})", kind.as_str()),
            Action::SendEmail => f.write_str("Send Email"),
            Action::GenerateOwnerReport => f.write_str("Generate Report & Email"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationRule {
    pub id: AutomationRuleId,
    pub name: String,
    pub description: String,
    pub active: bool,
    pub trigger: Trigger,
    pub action: Action,
    #[serde(default)]
    pub last_run: Option<DateTime<Utc>>,
}

impl Entity for AutomationRule {
    type Id = AutomationRuleId;

    fn id(&self) -> AutomationRuleId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAutomationRule {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_active")]
    pub active: bool,
    pub trigger: Trigger,
    pub action: Action,
}

fn default_active() -> bool {
    true
}

impl AutomationRule {
    pub fn create(id: AutomationRuleId, input: NewAutomationRule) -> DomainResult<Self> {
        if input.name.trim().is_empty() {
            return Err(DomainError::validation("rule name cannot be empty"));
        }
        match input.trigger {
            Trigger::LongStay { min_nights: 0 } => {
                return Err(DomainError::validation("long-stay threshold must be at least 1 night"));
            }
            Trigger::BeforeCheckIn { hours: 0 } => {
                return Err(DomainError::validation("check-in lead time must be at least 1 hour"));
            }
            Trigger::MonthlyOnDay { day } if !(1..=31).contains(&day) => {
                return Err(DomainError::validation("day of month must be between 1 and 31"));
            }
            _ => {}
        }
        Ok(Self {
            id,
            name: input.name,
            description: input.description,
            active: input.active,
            trigger: input.trigger,
            action: input.action,
            last_run: None,
        })
    }

    pub fn toggled(&self) -> Self {
        Self {
            active: !self.active,
            ..self.clone()
        }
    }

    pub fn ran_at(&self, at: DateTime<Utc>) -> Self {
        Self {
            last_run: Some(at),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_json_is_internally_tagged() {
        let json = serde_json::to_value(Trigger::LongStay { min_nights: 7 }).unwrap();
        assert_eq!(json, serde_json::json!({"type": "LongStay", "minNights": 7}));

        let action: Action =
            serde_json::from_value(serde_json::json!({"type": "CreateTask", "kind": "Cleaning"})).unwrap();
        assert_eq!(action, Action::CreateTask { kind: TaskKind::Cleaning });
    }

    #[test]
    fn labels_match_the_dashboard_wording() {
        assert_eq!(Trigger::BookingConfirmed.to_string(), "Booking Created (Confirmed)");
        assert_eq!(Trigger::LongStay { min_nights: 7 }.to_string(), "Booking Created (> 7 nights)");
        assert_eq!(
            Action::CreateTask { kind: TaskKind::Maintenance }.to_string(),
            "Create Task (Maintenance)"
        );
    }

    #[test]
    fn zero_thresholds_are_rejected() {
        let input = NewAutomationRule {
            name: "Long Stay Maintenance".to_string(),
            description: String::new(),
            active: true,
            trigger: Trigger::LongStay { min_nights: 0 },
            action: Action::CreateTask { kind: TaskKind::Maintenance },
        };
        assert!(AutomationRule::create(AutomationRuleId::new(), input).is_err());
    }

    #[test]
    fn toggle_flips_active_only() {
        let rule = AutomationRule::create(
            AutomationRuleId::new(),
            NewAutomationRule {
                name: "Monthly Owner Report".to_string(),
                description: String::new(),
                active: false,
                trigger: Trigger::MonthlyOnDay { day: 1 },
                action: Action::GenerateOwnerReport,
            },
        )
        .unwrap();
        let on = rule.toggled();
        assert!(on.active);
        assert_eq!(on.trigger, rule.trigger);
        assert!(!on.toggled().active);
    }
}
