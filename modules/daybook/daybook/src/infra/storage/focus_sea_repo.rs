use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use daybook_kit::SecurityContext;
use daybook_sdk::{DailyFocus, DailyFocusPatch, FocusModules};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use super::db::{db_err, json_err};
use super::entity::daily_focus::{ActiveModel as FocusAM, Column, Entity as FocusEntity};
use crate::domain::error::DomainError;
use crate::domain::repos::FocusRepository;

pub struct OrmFocusRepository {
    db: DatabaseConnection,
}

impl OrmFocusRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Columns overwritten when the (user, date) row already exists: ownership
/// and the timestamp always, content only where the patch carries a value.
fn update_columns(patch: &DailyFocusPatch) -> Vec<Column> {
    let mut cols = vec![Column::UserId, Column::UserEmail, Column::Date, Column::UpdatedAt];
    let optional = [
        (patch.main_focus.is_some(), Column::MainFocus),
        (patch.is_completed.is_some(), Column::IsCompleted),
        (patch.modules.system_boot.is_some(), Column::SystemBoot),
        (patch.modules.planning.is_some(), Column::Planning),
        (patch.modules.deep_work.is_some(), Column::DeepWork),
        (patch.modules.debugging.is_some(), Column::Debugging),
        (patch.modules.learning.is_some(), Column::Learning),
        (patch.modules.hygiene.is_some(), Column::Hygiene),
        (patch.modules.admin.is_some(), Column::Admin),
        (patch.modules.shutdown.is_some(), Column::Shutdown),
        (patch.custom_tasks.is_some(), Column::CustomTasks),
        (patch.notes.is_some(), Column::Notes),
        (patch.reflection.is_some(), Column::Reflection),
    ];
    cols.extend(optional.into_iter().filter(|(set, _)| *set).map(|(_, col)| col));
    cols
}

#[async_trait]
impl FocusRepository for OrmFocusRepository {
    async fn find_by_date(
        &self,
        ctx: &SecurityContext,
        date: NaiveDate,
    ) -> Result<Option<DailyFocus>, DomainError> {
        FocusEntity::find()
            .filter(Column::UserId.eq(ctx.user_id()))
            .filter(Column::Date.eq(date))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(DailyFocus::try_from)
            .transpose()
    }

    async fn find_in_range(
        &self,
        ctx: &SecurityContext,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyFocus>, DomainError> {
        FocusEntity::find()
            .filter(Column::UserId.eq(ctx.user_id()))
            .filter(Column::Date.between(from, to))
            .order_by_asc(Column::Date)
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(DailyFocus::try_from)
            .collect()
    }

    async fn upsert(
        &self,
        ctx: &SecurityContext,
        date: NaiveDate,
        patch: &DailyFocusPatch,
    ) -> Result<DailyFocus, DomainError> {
        let now = Utc::now();
        let modules = patch.modules.apply(FocusModules::default());
        let custom_tasks = serde_json::to_value(patch.custom_tasks.clone().unwrap_or_default())
            .map_err(json_err)?;

        let am = FocusAM {
            id: Set(Uuid::now_v7()),
            user_id: Set(ctx.user_id()),
            user_email: Set(ctx.email().to_owned()),
            date: Set(date),
            main_focus: Set(patch.main_focus.clone().unwrap_or_default()),
            is_completed: Set(patch.is_completed.unwrap_or(false)),
            system_boot: Set(modules.system_boot),
            planning: Set(modules.planning),
            deep_work: Set(modules.deep_work),
            debugging: Set(modules.debugging),
            learning: Set(modules.learning),
            hygiene: Set(modules.hygiene),
            admin: Set(modules.admin),
            shutdown: Set(modules.shutdown),
            custom_tasks: Set(custom_tasks),
            notes: Set(patch.notes.clone().unwrap_or_default()),
            reflection: Set(patch.reflection.clone().unwrap_or_default()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        FocusEntity::insert(am)
            .on_conflict(
                OnConflict::columns([Column::UserId, Column::Date])
                    .update_columns(update_columns(patch))
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        // on conflict the stored row keeps its original id, so re-read by the natural key
        self.find_by_date(ctx, date)
            .await?
            .ok_or_else(|| DomainError::internal("daily focus missing after upsert"))
    }
}
