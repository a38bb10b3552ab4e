use daybook_sdk::{
    CustomTask, DailyFocus, Expense, FocusModules, Goal, Meal, MealType, NutritionFacts, User,
    WeeklyPlan,
};

use super::db::json_err;
use super::entity::{daily_focus, expense, meal, user, weekly_plan};
use crate::domain::error::DomainError;

impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            name: m.name,
            password_hash: m.password_hash,
            calorie_target: m.calorie_target,
            created_at: m.created_at,
        }
    }
}

impl TryFrom<daily_focus::Model> for DailyFocus {
    type Error = DomainError;

    fn try_from(m: daily_focus::Model) -> Result<Self, Self::Error> {
        let custom_tasks: Vec<CustomTask> = serde_json::from_value(m.custom_tasks).map_err(json_err)?;
        Ok(Self {
            id: m.id,
            user_id: m.user_id,
            user_email: m.user_email,
            date: m.date,
            main_focus: m.main_focus,
            is_completed: m.is_completed,
            modules: FocusModules {
                system_boot: m.system_boot,
                planning: m.planning,
                deep_work: m.deep_work,
                debugging: m.debugging,
                learning: m.learning,
                hygiene: m.hygiene,
                admin: m.admin,
                shutdown: m.shutdown,
            },
            custom_tasks,
            notes: m.notes,
            reflection: m.reflection,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }
}

impl TryFrom<weekly_plan::Model> for WeeklyPlan {
    type Error = DomainError;

    fn try_from(m: weekly_plan::Model) -> Result<Self, Self::Error> {
        let goals: Vec<Goal> = serde_json::from_value(m.goals).map_err(json_err)?;
        Ok(Self {
            id: Some(m.id),
            user_id: m.user_id,
            user_email: m.user_email,
            week_start_date: m.week_start_date,
            goals,
            created_at: Some(m.created_at),
            updated_at: Some(m.updated_at),
        })
    }
}

impl From<expense::Model> for Expense {
    fn from(m: expense::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            user_email: m.user_email,
            amount: m.amount,
            category: m.category,
            description: m.description,
            timestamp: m.timestamp,
        }
    }
}

impl From<meal::Model> for Meal {
    fn from(m: meal::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            name: m.name,
            nutrition: NutritionFacts {
                calories: m.calories,
                protein: m.protein,
                carbs: m.carbs,
                fats: m.fats,
                fiber: m.fiber,
            },
            // unknown strings predate the enum and were snacks
            meal_type: MealType::parse(&m.meal_type).unwrap_or_default(),
            date: m.date,
            created_at: m.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use serde_json::json;
    use uuid::Uuid;

    fn focus_row(custom_tasks: serde_json::Value) -> daily_focus::Model {
        let now = Utc::now();
        daily_focus::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            user_email: "a@b.c".to_owned(),
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            main_focus: "Plan".to_owned(),
            is_completed: false,
            system_boot: true,
            planning: false,
            deep_work: true,
            debugging: false,
            learning: false,
            hygiene: false,
            admin: false,
            shutdown: true,
            custom_tasks,
            notes: String::new(),
            reflection: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn focus_row_maps_modules_and_tasks() {
        let row = focus_row(json!([{ "id": "t1", "title": "Email", "isCompleted": true }]));
        let focus = DailyFocus::try_from(row).unwrap();
        assert!(focus.modules.system_boot && focus.modules.deep_work && focus.modules.shutdown);
        assert!(!focus.modules.planning);
        assert_eq!(focus.custom_tasks.len(), 1);
        assert!(focus.custom_tasks[0].is_completed);
    }

    #[test]
    fn malformed_task_json_is_a_database_error() {
        let err = DailyFocus::try_from(focus_row(json!({ "not": "a list" }))).unwrap_err();
        assert!(matches!(err, DomainError::Database { .. }));
    }

    #[test]
    fn unknown_meal_type_reads_as_snack() {
        let now = Utc::now();
        let meal: Meal = meal::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Tea".to_owned(),
            calories: 30.0,
            protein: 0.0,
            carbs: 7.0,
            fats: 0.0,
            fiber: 0.0,
            meal_type: "Elevenses".to_owned(),
            date: now,
            created_at: now,
        }
        .into();
        assert_eq!(meal.meal_type, MealType::Snack);
    }
}
