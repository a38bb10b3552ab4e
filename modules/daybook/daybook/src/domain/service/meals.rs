use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use daybook_kit::SecurityContext;
use daybook_sdk::{
    LookupSource, Meal, NewMeal, NutritionFacts, NutritionLookup, NutritionSummary,
};

use super::{ServiceConfig, ensure_identity};
use crate::domain::calendar::local_day_window;
use crate::domain::error::DomainError;
use crate::domain::fields::{MealFields, max_len, non_negative, required_text};
use crate::domain::nutrition_table::demo_lookup;
use crate::domain::ports::NutritionProvider;
use crate::domain::repos::{MealRecord, MealsRepository, UsersRepository};

const MAX_QUERY_LEN: usize = 200;

/// Meal log, daily intake and food lookup.
pub struct MealsService {
    repo: Arc<dyn MealsRepository>,
    users: Arc<dyn UsersRepository>,
    nutrition: Option<Arc<dyn NutritionProvider>>,
    config: ServiceConfig,
}

impl MealsService {
    pub fn new(
        repo: Arc<dyn MealsRepository>,
        users: Arc<dyn UsersRepository>,
        nutrition: Option<Arc<dyn NutritionProvider>>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repo,
            users,
            nutrition,
            config,
        }
    }

    pub async fn create(&self, ctx: &SecurityContext, meal: NewMeal) -> Result<Meal, DomainError> {
        ensure_identity(ctx)?;
        let name = meal.name.trim();
        required_text(MealFields::NAME, name, self.config.max_field_length)?;
        validate_facts(&meal.nutrition)?;

        let record = MealRecord {
            name: name.to_owned(),
            nutrition: meal.nutrition,
            meal_type: meal.meal_type.unwrap_or_default(),
            date: meal.date.unwrap_or_else(Utc::now),
        };
        let created = self.repo.create(ctx, record).await?;
        tracing::debug!(meal_id = %created.id, meal_type = created.meal_type.as_str(), "meal logged");
        Ok(created)
    }

    /// Newest first; limited to the local calendar `day` when given.
    pub async fn list(
        &self,
        ctx: &SecurityContext,
        day: Option<NaiveDate>,
    ) -> Result<Vec<Meal>, DomainError> {
        self.repo.list(ctx, day.map(local_day_window)).await
    }

    /// Intake on `day` against the caller's calorie target.
    pub async fn summary(
        &self,
        ctx: &SecurityContext,
        day: NaiveDate,
    ) -> Result<NutritionSummary, DomainError> {
        let user = self
            .users
            .find_by_id(ctx.user_id())
            .await?
            .ok_or_else(|| DomainError::not_found("user", ctx.user_id()))?;
        let meals = self.list(ctx, Some(day)).await?;
        let totals: NutritionFacts = meals.iter().map(|m| m.nutrition).sum();
        Ok(NutritionSummary {
            date: day,
            totals,
            calorie_target: user.calorie_target,
            remaining_calories: f64::from(user.calorie_target) - totals.calories,
            meal_count: meals.len(),
        })
    }

    /// Look `query` up in the external database when one is configured,
    /// falling back to the built-in table when it is absent, fails or
    /// recognises nothing.
    pub async fn analyze(&self, query: &str) -> Result<NutritionLookup, DomainError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(DomainError::validation(MealFields::QUERY, "must not be empty"));
        }
        max_len(MealFields::QUERY, query, MAX_QUERY_LEN)?;

        if let Some(provider) = &self.nutrition {
            match provider.lookup(query).await {
                Ok(Some(facts)) => {
                    return Ok(NutritionLookup {
                        name: query.to_owned(),
                        facts,
                        source: LookupSource::Api,
                    });
                }
                Ok(None) => tracing::debug!("nutrition database recognised nothing"),
                Err(e) => tracing::warn!(error = %e, "nutrition lookup failed, using demo table"),
            }
        }

        demo_lookup(query)
            .map(|(name, facts)| NutritionLookup {
                name: name.to_owned(),
                facts,
                source: LookupSource::Demo,
            })
            .ok_or_else(|| DomainError::not_found("food", query))
    }
}

fn validate_facts(facts: &NutritionFacts) -> Result<(), DomainError> {
    non_negative("calories", facts.calories)?;
    non_negative("protein", facts.protein)?;
    non_negative("carbs", facts.carbs)?;
    non_negative("fats", facts.fats)?;
    non_negative("fiber", facts.fiber)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calendar::local_day_start;
    use crate::domain::service::test_support::{InMemoryStore, ctx, day};
    use async_trait::async_trait;
    use chrono::Duration;
    use daybook_sdk::MealType;

    fn facts(calories: f64) -> NutritionFacts {
        NutritionFacts {
            calories,
            protein: 1.0,
            carbs: 2.0,
            fats: 3.0,
            fiber: 0.5,
        }
    }

    fn meal_on(d: NaiveDate, hour: i64, calories: f64) -> NewMeal {
        NewMeal {
            name: format!("meal at {hour}"),
            nutrition: facts(calories),
            meal_type: None,
            date: Some(local_day_start(d) + Duration::hours(hour)),
        }
    }

    struct FixedProvider(Result<Option<NutritionFacts>, DomainError>);

    #[async_trait]
    impl NutritionProvider for FixedProvider {
        async fn lookup(&self, _query: &str) -> Result<Option<NutritionFacts>, DomainError> {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn create_applies_defaults() {
        let store = InMemoryStore::shared();
        let svc = store.services().meals;
        let before = Utc::now();
        let meal = svc
            .create(
                &ctx(),
                NewMeal {
                    name: "  Oats ".to_owned(),
                    nutrition: facts(300.0),
                    meal_type: None,
                    date: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(meal.name, "Oats");
        assert_eq!(meal.meal_type, MealType::Snack);
        assert!(meal.date >= before);
    }

    #[tokio::test]
    async fn create_rejects_bad_input() {
        let store = InMemoryStore::shared();
        let svc = store.services().meals;
        let mut bad = meal_on(day(2024, 1, 10), 8, 100.0);
        bad.nutrition.protein = -1.0;
        let err = svc.create(&ctx(), bad).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "protein"));

        let mut unnamed = meal_on(day(2024, 1, 10), 8, 100.0);
        unnamed.name = String::new();
        let err = svc.create(&ctx(), unnamed).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "name"));
    }

    #[tokio::test]
    async fn list_filters_by_local_day() {
        let store = InMemoryStore::shared();
        let svc = store.services().meals;
        let ctx = ctx();
        let d = day(2024, 1, 10);

        svc.create(&ctx, meal_on(d, 8, 100.0)).await.unwrap();
        svc.create(&ctx, meal_on(d, 19, 200.0)).await.unwrap();
        svc.create(&ctx, meal_on(day(2024, 1, 9), 20, 400.0)).await.unwrap();

        let on_day = svc.list(&ctx, Some(d)).await.unwrap();
        assert_eq!(on_day.len(), 2);
        assert_eq!(on_day[0].name, "meal at 19");

        assert_eq!(svc.list(&ctx, None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn summary_measures_against_target() {
        let store = InMemoryStore::shared();
        let svc = store.services().meals;
        let ctx = ctx();
        let d = day(2024, 1, 10);

        let err = svc.summary(&ctx, d).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        store.insert_user(ctx.user_id(), ctx.email());
        svc.create(&ctx, meal_on(d, 8, 1500.0)).await.unwrap();
        svc.create(&ctx, meal_on(d, 13, 700.0)).await.unwrap();

        let summary = svc.summary(&ctx, d).await.unwrap();
        assert_eq!(summary.meal_count, 2);
        assert_eq!(summary.calorie_target, 2000);
        assert!((summary.totals.calories - 2200.0).abs() < f64::EPSILON);
        assert!((summary.remaining_calories + 200.0).abs() < f64::EPSILON);
        assert!((summary.totals.fiber - 1.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn analyze_without_provider_uses_demo_table() {
        let store = InMemoryStore::shared();
        let svc = store.services().meals;

        let hit = svc.analyze("Banana smoothie").await.unwrap();
        assert_eq!(hit.source, LookupSource::Demo);
        assert_eq!(hit.name, "banana");

        let miss = svc.analyze("pizza").await.unwrap_err();
        assert!(matches!(miss, DomainError::NotFound { .. }));

        let blank = svc.analyze("  ").await.unwrap_err();
        assert!(matches!(blank, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn analyze_prefers_provider_and_falls_back() {
        let store = InMemoryStore::shared();

        let api = store
            .services_with(Some(Arc::new(FixedProvider(Ok(Some(facts(640.0)))))))
            .meals;
        let hit = api.analyze("pizza").await.unwrap();
        assert_eq!(hit.source, LookupSource::Api);
        assert_eq!(hit.name, "pizza");

        let empty = store
            .services_with(Some(Arc::new(FixedProvider(Ok(None)))))
            .meals;
        assert_eq!(empty.analyze("apple").await.unwrap().source, LookupSource::Demo);

        let down = store
            .services_with(Some(Arc::new(FixedProvider(Err(DomainError::upstream("503"))))))
            .meals;
        assert_eq!(down.analyze("apple").await.unwrap().source, LookupSource::Demo);
        assert!(down.analyze("pizza").await.is_err());
    }
}
