//! Task board and automation rules.

use tracing::{info, instrument};

use lodgex_activity::{AuditAction, Level};
use lodgex_automation::{AutomationRule, NewAutomationRule};
use lodgex_core::{AutomationRuleId, DomainError, TaskId};
use lodgex_tasks::{NewTask, Task, TaskStatus, TaskUpdate};

use super::CrmService;
use crate::error::ServiceResult;
use crate::remote::Collection;

impl CrmService {
    pub fn list_tasks(&self) -> ServiceResult<Vec<Task>> {
        Ok(self.store.tasks().list()?)
    }

    /// Create a task by hand. Automation-generated tasks go through booking creation.
    #[instrument(skip(self, input), fields(property_id = %input.property_id), err)]
    pub async fn create_task(&self, actor: &str, input: NewTask) -> ServiceResult<Task> {
        self.get_property(input.property_id)?;
        let task = Task::create(TaskId::new(), input)?;
        self.store.tasks().upsert(task.clone())?;
        self.mirror(Collection::Tasks, &task).await;

        self.audit(actor, AuditAction::Create, "Task", format!("Created task: {}", task.title))
            .await?;
        self.notify("Task Assigned", format!("New task created: {}", task.title), Level::Info)
            .await?;
        Ok(task)
    }

    #[instrument(skip(self, update), fields(task_id = %id), err)]
    pub async fn update_task(&self, actor: &str, id: TaskId, update: TaskUpdate) -> ServiceResult<Task> {
        let before = self
            .store
            .tasks()
            .get(id)?
            .ok_or_else(|| DomainError::not_found(format!("task {id}")))?;
        let task = before.updated(update)?;
        self.store.tasks().upsert(task.clone())?;
        self.mirror(Collection::Tasks, &task).await;

        self.audit(actor, AuditAction::Update, "Task", format!("Updated task: {}", task.title))
            .await?;
        if task.status != before.status {
            let level = match task.status {
                TaskStatus::Completed => Level::Success,
                _ => Level::Info,
            };
            self.notify(
                "Task Status Updated",
                format!("\"{}\" moved to {}", task.title, task.status),
                level,
            )
            .await?;
        }
        Ok(task)
    }

    pub fn list_automations(&self) -> ServiceResult<Vec<AutomationRule>> {
        Ok(self.store.automations().list()?)
    }

    #[instrument(skip(self, input), err)]
    pub async fn create_automation(&self, actor: &str, input: NewAutomationRule) -> ServiceResult<AutomationRule> {
        let rule = AutomationRule::create(AutomationRuleId::new(), input)?;
        self.store.automations().upsert(rule.clone())?;
        self.mirror(Collection::Automations, &rule).await;

        self.audit(
            actor,
            AuditAction::Create,
            "Automation",
            format!("Created automation rule: {}", rule.name),
        )
        .await?;
        Ok(rule)
    }

    #[instrument(skip(self), fields(rule_id = %id), err)]
    pub async fn delete_automation(&self, actor: &str, id: AutomationRuleId) -> ServiceResult<()> {
        self.store
            .automations()
            .remove(id)?
            .ok_or_else(|| DomainError::not_found(format!("automation rule {id}")))?;
        self.mirror_delete(Collection::Automations, id).await;

        self.audit(actor, AuditAction::Delete, "Automation", format!("Deleted automation rule {id}"))
            .await?;
        Ok(())
    }

    /// Flip a rule between active and paused.
    #[instrument(skip(self), fields(rule_id = %id), err)]
    pub async fn toggle_automation(&self, id: AutomationRuleId) -> ServiceResult<AutomationRule> {
        let rule = self
            .store
            .automations()
            .get(id)?
            .ok_or_else(|| DomainError::not_found(format!("automation rule {id}")))?
            .toggled();
        self.store.automations().upsert(rule.clone())?;
        self.mirror(Collection::Automations, &rule).await;
        info!(active = rule.active, "automation rule toggled");
        Ok(rule)
    }
}
