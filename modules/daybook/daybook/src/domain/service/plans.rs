use std::sync::Arc;

use chrono::NaiveDate;
use daybook_kit::SecurityContext;
use daybook_sdk::{Goal, WeeklyPlan};

use super::{ServiceConfig, ensure_identity};
use crate::domain::calendar::week_start;
use crate::domain::error::DomainError;
use crate::domain::fields::{PlanFields, max_len, required_text};
use crate::domain::repos::PlansRepository;

/// Weekly goal plans keyed by the Monday that starts the week.
pub struct PlansService {
    repo: Arc<dyn PlansRepository>,
    config: ServiceConfig,
}

impl PlansService {
    pub fn new(repo: Arc<dyn PlansRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    /// The plan for the week containing `today`. A week with no saved plan
    /// yields an empty, unsaved plan (`id` is `None`) and writes nothing.
    pub async fn get_current(
        &self,
        ctx: &SecurityContext,
        today: NaiveDate,
    ) -> Result<WeeklyPlan, DomainError> {
        let monday = week_start(today);
        let found = self.repo.find_by_week(ctx, monday).await?;
        Ok(found.unwrap_or_else(|| WeeklyPlan {
            id: None,
            user_id: ctx.user_id(),
            user_email: ctx.email().to_owned(),
            week_start_date: monday,
            goals: Vec::new(),
            created_at: None,
            updated_at: None,
        }))
    }

    /// Replace the goals of the week containing `today`.
    pub async fn put_current(
        &self,
        ctx: &SecurityContext,
        today: NaiveDate,
        goals: Vec<Goal>,
    ) -> Result<WeeklyPlan, DomainError> {
        ensure_identity(ctx)?;
        self.validate_goals(&goals)?;
        let monday = week_start(today);
        let plan = self.repo.upsert_goals(ctx, monday, &goals).await?;
        tracing::debug!(week_start = %monday, goals = plan.goals.len(), "weekly plan saved");
        Ok(plan)
    }

    fn validate_goals(&self, goals: &[Goal]) -> Result<(), DomainError> {
        if goals.len() > self.config.max_goals {
            return Err(DomainError::validation(
                PlanFields::GOALS,
                format!("at most {} goals allowed", self.config.max_goals),
            ));
        }
        let max = self.config.max_field_length;
        for (i, goal) in goals.iter().enumerate() {
            let at = |name: &str| format!("{}[{i}].{name}", PlanFields::GOALS);
            required_text(&at("id"), &goal.id, max)?;
            required_text(&at("title"), &goal.title, max)?;
            if let Some(description) = &goal.description {
                max_len(&at("description"), description, max)?;
            }
        }
        Ok(())
    }
}
