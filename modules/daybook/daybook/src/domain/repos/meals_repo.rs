use async_trait::async_trait;
use chrono::{DateTime, Utc};
use daybook_kit::SecurityContext;
use daybook_sdk::{Meal, MealType, NutritionFacts};

use crate::domain::error::DomainError;

/// A meal with every default already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct MealRecord {
    pub name: String,
    pub nutrition: NutritionFacts,
    pub meal_type: MealType,
    pub date: DateTime<Utc>,
}

#[async_trait]
pub trait MealsRepository: Send + Sync {
    async fn create(&self, ctx: &SecurityContext, meal: MealRecord) -> Result<Meal, DomainError>;

    /// Newest first; restricted to `start <= date < end` when a window is given.
    async fn list(
        &self,
        ctx: &SecurityContext,
        window: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<Vec<Meal>, DomainError>;
}
