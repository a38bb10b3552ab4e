//! Public models for the daybook module.
//!
//! These define the contract between the domain services and their callers.
//! Wire formats live in the REST layer; only the documents embedded inside a
//! record (custom tasks, goals) carry serde derives because storage keeps
//! them as JSON.

use std::ops::AddAssign;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_CALORIE_TARGET: i32 = 2000;

/// Registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    /// Absent for accounts created through an external identity provider.
    pub password_hash: Option<String>,
    pub calorie_target: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: Option<String>,
}

/// Ad-hoc checklist item attached to a focus day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// The fixed daily routine blocks.
#[allow(clippy::struct_excessive_bools)] // one flag per routine block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusModules {
    pub system_boot: bool,
    pub planning: bool,
    pub deep_work: bool,
    pub debugging: bool,
    pub learning: bool,
    pub hygiene: bool,
    pub admin: bool,
    pub shutdown: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusModulesPatch {
    pub system_boot: Option<bool>,
    pub planning: Option<bool>,
    pub deep_work: Option<bool>,
    pub debugging: Option<bool>,
    pub learning: Option<bool>,
    pub hygiene: Option<bool>,
    pub admin: Option<bool>,
    pub shutdown: Option<bool>,
}

impl FocusModulesPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overlay the provided flags on `base`.
    #[must_use]
    pub fn apply(&self, base: FocusModules) -> FocusModules {
        FocusModules {
            system_boot: self.system_boot.unwrap_or(base.system_boot),
            planning: self.planning.unwrap_or(base.planning),
            deep_work: self.deep_work.unwrap_or(base.deep_work),
            debugging: self.debugging.unwrap_or(base.debugging),
            learning: self.learning.unwrap_or(base.learning),
            hygiene: self.hygiene.unwrap_or(base.hygiene),
            admin: self.admin.unwrap_or(base.admin),
            shutdown: self.shutdown.unwrap_or(base.shutdown),
        }
    }
}

/// One user's checklist and notes for one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyFocus {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_email: String,
    pub date: NaiveDate,
    pub main_focus: String,
    pub is_completed: bool,
    pub modules: FocusModules,
    pub custom_tasks: Vec<CustomTask>,
    pub notes: String,
    pub reflection: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update of a focus day. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyFocusPatch {
    pub main_focus: Option<String>,
    pub is_completed: Option<bool>,
    pub modules: FocusModulesPatch,
    pub custom_tasks: Option<Vec<CustomTask>>,
    pub notes: Option<String>,
    pub reflection: Option<String>,
}

impl DailyFocusPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.main_focus.is_none()
            && self.is_completed.is_none()
            && self.modules.is_empty()
            && self.custom_tasks.is_none()
            && self.notes.is_none()
            && self.reflection.is_none()
    }
}

/// Completion state of a single day inside a stats window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub is_completed: bool,
    pub has_task: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusStats {
    /// Consecutive completed days ending today (or yesterday if today is still open).
    pub streak: u32,
    /// Percentage of the last seven days that were completed, 0..=100.
    pub consistency: u32,
    pub completed_count: u32,
}

/// Planned block inside a week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
}

/// Goals for the Monday-started week beginning `week_start_date`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyPlan {
    /// `None` for a plan that has not been saved yet.
    pub id: Option<Uuid>,
    pub user_id: Uuid,
    pub user_email: String,
    pub week_start_date: NaiveDate,
    pub goals: Vec<Goal>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_email: String,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
}

/// Replacement values for an existing expense; its timestamp is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseUpdate {
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
}

/// Spending totals for the current day, Monday-started week and month.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExpenseStats {
    pub today: f64,
    pub week: f64,
    pub month: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    #[default]
    Snack,
}

impl MealType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
            Self::Snack => "Snack",
        }
    }

    /// Case-insensitive parse of a stored or submitted meal type.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snack]
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

/// Energy and macronutrients. Calories in kcal, the rest in grams.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NutritionFacts {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub fiber: f64,
}

impl AddAssign for NutritionFacts {
    fn add_assign(&mut self, rhs: Self) {
        self.calories += rhs.calories;
        self.protein += rhs.protein;
        self.carbs += rhs.carbs;
        self.fats += rhs.fats;
        self.fiber += rhs.fiber;
    }
}

impl std::iter::Sum for NutritionFacts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut acc, n| {
            acc += n;
            acc
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Meal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub nutrition: NutritionFacts,
    pub meal_type: MealType,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMeal {
    pub name: String,
    pub nutrition: NutritionFacts,
    /// Defaults to [`MealType::Snack`].
    pub meal_type: Option<MealType>,
    /// Defaults to now.
    pub date: Option<DateTime<Utc>>,
}

/// Intake for one day measured against the user's target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutritionSummary {
    pub date: NaiveDate,
    pub totals: NutritionFacts,
    pub calorie_target: i32,
    /// Negative once the target is exceeded.
    pub remaining_calories: f64,
    pub meal_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupSource {
    /// External nutrition database.
    Api,
    /// Built-in table used when no API key is configured.
    Demo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NutritionLookup {
    pub name: String,
    pub facts: NutritionFacts,
    pub source: LookupSource,
}

/// Everything the home screen shows, fetched concurrently.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub date: NaiveDate,
    pub focus: Option<DailyFocus>,
    pub stats: FocusStats,
    pub expenses: ExpenseStats,
    /// Sections that failed to load and were replaced by defaults.
    pub degraded: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_is_empty() {
        assert!(DailyFocusPatch::default().is_empty());
        let patch = DailyFocusPatch {
            modules: FocusModulesPatch {
                admin: Some(false),
                ..FocusModulesPatch::default()
            },
            ..DailyFocusPatch::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn modules_patch_overlays_only_provided_flags() {
        let base = FocusModules {
            planning: true,
            deep_work: true,
            ..FocusModules::default()
        };
        let patch = FocusModulesPatch {
            deep_work: Some(false),
            shutdown: Some(true),
            ..FocusModulesPatch::default()
        };
        let merged = patch.apply(base);
        assert!(merged.planning);
        assert!(!merged.deep_work);
        assert!(merged.shutdown);
        assert!(!merged.admin);
    }

    #[test]
    fn meal_type_parse_is_case_insensitive() {
        assert_eq!(MealType::parse("dinner"), Some(MealType::Dinner));
        assert_eq!(MealType::parse(" Breakfast "), Some(MealType::Breakfast));
        assert_eq!(MealType::parse("brunch"), None);
        assert_eq!(MealType::default(), MealType::Snack);
    }

    #[test]
    fn nutrition_sums_component_wise() {
        let total: NutritionFacts = [
            NutritionFacts {
                calories: 52.0,
                protein: 0.5,
                carbs: 14.0,
                fats: 0.25,
                fiber: 2.5,
            },
            NutritionFacts {
                calories: 89.0,
                protein: 1.5,
                carbs: 23.0,
                fats: 0.25,
                fiber: 2.5,
            },
        ]
        .into_iter()
        .sum();
        assert!((total.calories - 141.0).abs() < f64::EPSILON);
        assert!((total.protein - 2.0).abs() < f64::EPSILON);
        assert!((total.fiber - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn custom_task_json_uses_camel_case_and_defaults() {
        let task: CustomTask =
            serde_json::from_str(r#"{"id":"t1","title":"Ship it"}"#).unwrap();
        assert!(!task.is_completed);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["isCompleted"], false);
        assert!(json.get("category").is_none());
    }
}
