//! Automation rules: typed triggers and actions evaluated against new bookings.
//!
//! Evaluation is pure. [`plan_for_booking`] returns the tasks a booking should spawn;
//! the service layer persists them and records `last_run`.

pub mod plan;
pub mod rule;

pub use plan::{plan_for_booking, PlannedTask};
pub use rule::{Action, AutomationRule, NewAutomationRule, Trigger};
