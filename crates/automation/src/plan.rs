use lodgex_bookings::{Booking, BookingStatus};
use lodgex_core::AutomationRuleId;
use lodgex_tasks::{NewTask, Priority, TaskKind};

use crate::rule::{Action, AutomationRule, Trigger};

/// A task an automation rule wants created for a booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTask {
    pub rule_id: AutomationRuleId,
    pub task: NewTask,
    /// Body of the "Automation Triggered" notification.
    pub notice: String,
}

/// Evaluate active rules against a freshly created booking, in rule order.
///
/// Only `CreateTask` actions produce work here; other actions are run by their own
/// schedules.
pub fn plan_for_booking(rules: &[AutomationRule], booking: &Booking) -> Vec<PlannedTask> {
    rules
        .iter()
        .filter(|r| r.active && r.trigger.fires_on_booking())
        .filter_map(|rule| {
            let Action::CreateTask { kind } = rule.action else {
                return None;
            };
            match rule.trigger {
                Trigger::BookingConfirmed if booking.status == BookingStatus::Confirmed => {
                    Some(turnover_task(rule.id, kind, booking))
                }
                Trigger::LongStay { min_nights } if booking.nights() > i64::from(min_nights) => {
                    Some(mid_stay_task(rule.id, kind, booking))
                }
                _ => None,
            }
        })
        .collect()
}

fn turnover_task(rule_id: AutomationRuleId, kind: TaskKind, booking: &Booking) -> PlannedTask {
    let (title, description) = match kind {
        TaskKind::Cleaning => (
            format!("Turnover Cleaning - {}", booking.guest_name),
            format!(
                "Auto-generated cleaning task for booking {}. Please clean unit after checkout on {}.",
                booking.reference,
                booking.check_out()
            ),
        ),
        TaskKind::Maintenance => (
            format!("Turnover Inspection - {}", booking.guest_name),
            format!(
                "Auto-generated inspection for booking {}. Inspect unit after checkout on {}.",
                booking.reference,
                booking.check_out()
            ),
        ),
    };
    PlannedTask {
        rule_id,
        task: NewTask::open(title, kind, booking.property_id, booking.check_out())
            .with_priority(Priority::High)
            .with_description(description),
        notice: format!("{} task automatically created", kind.as_str()),
    }
}

fn mid_stay_task(rule_id: AutomationRuleId, kind: TaskKind, booking: &Booking) -> PlannedTask {
    let noun = match kind {
        TaskKind::Cleaning => "Cleaning",
        TaskKind::Maintenance => "Inspection",
    };
    PlannedTask {
        rule_id,
        task: NewTask::open(
            format!("Mid-stay {noun} - {}", booking.guest_name),
            kind,
            booking.property_id,
            booking.stay.midpoint(),
        )
        .with_priority(Priority::Medium)
        .with_description(format!(
            "Auto-generated {} for long stay ({} nights). Check amenities and AC.",
            noun.to_lowercase(),
            booking.nights()
        )),
        notice: format!("Mid-stay {} task scheduled", noun.to_lowercase()),
    }
}
