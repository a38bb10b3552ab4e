use async_trait::async_trait;
use chrono::{DateTime, Utc};
use daybook_kit::SecurityContext;
use daybook_sdk::Meal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::db::db_err;
use super::entity::meal::{ActiveModel as MealAM, Column, Entity as MealEntity};
use crate::domain::error::DomainError;
use crate::domain::repos::{MealRecord, MealsRepository};

pub struct OrmMealsRepository {
    db: DatabaseConnection,
}

impl OrmMealsRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MealsRepository for OrmMealsRepository {
    async fn create(&self, ctx: &SecurityContext, meal: MealRecord) -> Result<Meal, DomainError> {
        let am = MealAM {
            id: Set(Uuid::now_v7()),
            user_id: Set(ctx.user_id()),
            name: Set(meal.name),
            calories: Set(meal.nutrition.calories),
            protein: Set(meal.nutrition.protein),
            carbs: Set(meal.nutrition.carbs),
            fats: Set(meal.nutrition.fats),
            fiber: Set(meal.nutrition.fiber),
            meal_type: Set(meal.meal_type.as_str().to_owned()),
            date: Set(meal.date),
            created_at: Set(Utc::now()),
        };
        Ok(am.insert(&self.db).await.map_err(db_err)?.into())
    }

    async fn list(
        &self,
        ctx: &SecurityContext,
        window: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<Vec<Meal>, DomainError> {
        let mut query = MealEntity::find().filter(Column::UserId.eq(ctx.user_id()));
        if let Some((start, end)) = window {
            query = query
                .filter(Column::Date.gte(start))
                .filter(Column::Date.lt(end));
        }
        let rows = query
            .order_by_desc(Column::Date)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
