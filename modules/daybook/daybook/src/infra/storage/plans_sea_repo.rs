use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use daybook_kit::SecurityContext;
use daybook_sdk::{Goal, WeeklyPlan};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::db::{db_err, json_err};
use super::entity::weekly_plan::{ActiveModel as PlanAM, Column, Entity as PlanEntity};
use crate::domain::error::DomainError;
use crate::domain::repos::PlansRepository;

pub struct OrmPlansRepository {
    db: DatabaseConnection,
}

impl OrmPlansRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlansRepository for OrmPlansRepository {
    async fn find_by_week(
        &self,
        ctx: &SecurityContext,
        week_start: NaiveDate,
    ) -> Result<Option<WeeklyPlan>, DomainError> {
        PlanEntity::find()
            .filter(Column::UserId.eq(ctx.user_id()))
            .filter(Column::WeekStartDate.eq(week_start))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(WeeklyPlan::try_from)
            .transpose()
    }

    async fn upsert_goals(
        &self,
        ctx: &SecurityContext,
        week_start: NaiveDate,
        goals: &[Goal],
    ) -> Result<WeeklyPlan, DomainError> {
        let now = Utc::now();
        let am = PlanAM {
            id: Set(Uuid::now_v7()),
            user_id: Set(ctx.user_id()),
            user_email: Set(ctx.email().to_owned()),
            week_start_date: Set(week_start),
            goals: Set(serde_json::to_value(goals).map_err(json_err)?),
            created_at: Set(now),
            updated_at: Set(now),
        };

        PlanEntity::insert(am)
            .on_conflict(
                OnConflict::columns([Column::UserId, Column::WeekStartDate])
                    .update_columns([
                        Column::UserId,
                        Column::UserEmail,
                        Column::WeekStartDate,
                        Column::Goals,
                        Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        self.find_by_week(ctx, week_start)
            .await?
            .ok_or_else(|| DomainError::internal("weekly plan missing after upsert"))
    }
}
