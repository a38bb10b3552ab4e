use std::sync::Arc;

use chrono::{Days, NaiveDate};
use daybook_kit::SecurityContext;
use daybook_sdk::{CustomTask, DailyFocus, DailyFocusPatch, DaySummary, FocusStats};

use super::{ServiceConfig, ensure_identity};
use crate::domain::calendar::WINDOW_DAYS;
use crate::domain::error::DomainError;
use crate::domain::fields::{FocusFields, max_len, required_text};
use crate::domain::repos::FocusRepository;
use crate::domain::stats;

/// Daily focus records and the statistics derived from them.
pub struct FocusService {
    repo: Arc<dyn FocusRepository>,
    config: ServiceConfig,
}

impl FocusService {
    pub fn new(repo: Arc<dyn FocusRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    /// Read-only; an absent record stays absent.
    pub async fn get_today(
        &self,
        ctx: &SecurityContext,
        day: NaiveDate,
    ) -> Result<Option<DailyFocus>, DomainError> {
        self.repo.find_by_date(ctx, day).await
    }

    /// Merge `patch` into the record for `day`, creating it on first write.
    pub async fn upsert_today(
        &self,
        ctx: &SecurityContext,
        day: NaiveDate,
        patch: DailyFocusPatch,
    ) -> Result<DailyFocus, DomainError> {
        ensure_identity(ctx)?;
        self.validate_patch(&patch)?;
        let saved = self.repo.upsert(ctx, day, &patch).await?;
        tracing::debug!(%day, record_id = %saved.id, "focus day saved");
        Ok(saved)
    }

    /// The seven days ending at `today`, oldest first, gaps filled.
    pub async fn week(
        &self,
        ctx: &SecurityContext,
        today: NaiveDate,
    ) -> Result<Vec<DaySummary>, DomainError> {
        let from = today
            .checked_sub_days(Days::new(WINDOW_DAYS - 1))
            .unwrap_or(today);
        let records = self.repo.find_in_range(ctx, from, today).await?;
        Ok(stats::summarize_week(today, &records))
    }

    pub async fn stats(
        &self,
        ctx: &SecurityContext,
        today: NaiveDate,
    ) -> Result<FocusStats, DomainError> {
        let window = self.week(ctx, today).await?;
        Ok(stats::aggregate(&window))
    }

    fn validate_patch(&self, patch: &DailyFocusPatch) -> Result<(), DomainError> {
        let max = self.config.max_field_length;
        if let Some(v) = &patch.main_focus {
            max_len(FocusFields::MAIN_FOCUS, v, max)?;
        }
        if let Some(v) = &patch.notes {
            max_len(FocusFields::NOTES, v, max)?;
        }
        if let Some(v) = &patch.reflection {
            max_len(FocusFields::REFLECTION, v, max)?;
        }
        if let Some(tasks) = &patch.custom_tasks {
            self.validate_tasks(tasks)?;
        }
        Ok(())
    }

    fn validate_tasks(&self, tasks: &[CustomTask]) -> Result<(), DomainError> {
        if tasks.len() > self.config.max_custom_tasks {
            return Err(DomainError::validation(
                FocusFields::CUSTOM_TASKS,
                format!("at most {} tasks allowed", self.config.max_custom_tasks),
            ));
        }
        let max = self.config.max_field_length;
        for (i, task) in tasks.iter().enumerate() {
            required_text(&format!("{}[{i}].id", FocusFields::CUSTOM_TASKS), &task.id, max)?;
            required_text(
                &format!("{}[{i}].title", FocusFields::CUSTOM_TASKS),
                &task.title,
                max,
            )?;
        }
        Ok(())
    }
}
