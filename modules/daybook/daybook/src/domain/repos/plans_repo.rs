use async_trait::async_trait;
use chrono::NaiveDate;
use daybook_kit::SecurityContext;
use daybook_sdk::{Goal, WeeklyPlan};

use crate::domain::error::DomainError;

/// Storage of one plan per (user, week start).
#[async_trait]
pub trait PlansRepository: Send + Sync {
    async fn find_by_week(
        &self,
        ctx: &SecurityContext,
        week_start: NaiveDate,
    ) -> Result<Option<WeeklyPlan>, DomainError>;

    /// Atomically create or replace the goals of the plan for `week_start`.
    async fn upsert_goals(
        &self,
        ctx: &SecurityContext,
        week_start: NaiveDate,
        goals: &[Goal],
    ) -> Result<WeeklyPlan, DomainError>;
}
