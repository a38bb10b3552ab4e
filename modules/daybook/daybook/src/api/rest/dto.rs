//! Wire types. Field names are camelCase to match the web client.

use chrono::{DateTime, NaiveDate, Utc};
use daybook_sdk::{
    CustomTask, DailyFocus, DailyFocusPatch, Dashboard, DaySummary, Expense, ExpenseStats,
    ExpenseUpdate, FocusModulesPatch, FocusStats, Goal, Meal, MealType, NewExpense, NewMeal,
    NutritionFacts, NutritionLookup, NutritionSummary, User, WeeklyPlan,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// `?date=YYYY-MM-DD`, the caller's calendar day.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DayQuery {
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeQuery {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomTaskDto {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl From<CustomTask> for CustomTaskDto {
    fn from(t: CustomTask) -> Self {
        Self {
            id: t.id,
            title: t.title,
            is_completed: t.is_completed,
            category: t.category,
            time: t.time,
        }
    }
}

impl From<CustomTaskDto> for CustomTask {
    fn from(t: CustomTaskDto) -> Self {
        Self {
            id: t.id,
            title: t.title,
            is_completed: t.is_completed,
            category: t.category,
            time: t.time,
        }
    }
}

/// A day's focus record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct DailyFocusDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_email: String,
    pub date: NaiveDate,
    pub main_focus: String,
    pub is_completed: bool,
    pub mod_system_boot: bool,
    pub mod_planning: bool,
    pub mod_deep_work: bool,
    pub mod_debugging: bool,
    pub mod_learning: bool,
    pub mod_hygiene: bool,
    pub mod_admin: bool,
    pub mod_shutdown: bool,
    pub custom_tasks: Vec<CustomTaskDto>,
    pub notes: String,
    pub reflection: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DailyFocus> for DailyFocusDto {
    fn from(f: DailyFocus) -> Self {
        Self {
            id: f.id,
            user_id: f.user_id,
            user_email: f.user_email,
            date: f.date,
            main_focus: f.main_focus,
            is_completed: f.is_completed,
            mod_system_boot: f.modules.system_boot,
            mod_planning: f.modules.planning,
            mod_deep_work: f.modules.deep_work,
            mod_debugging: f.modules.debugging,
            mod_learning: f.modules.learning,
            mod_hygiene: f.modules.hygiene,
            mod_admin: f.modules.admin,
            mod_shutdown: f.modules.shutdown,
            custom_tasks: f.custom_tasks.into_iter().map(Into::into).collect(),
            notes: f.notes,
            reflection: f.reflection,
            created_at: f.created_at,
            updated_at: f.updated_at,
        }
    }
}

/// Partial update of a focus day. Absent and `null` fields are left unchanged;
/// fields the server owns (id, owner, date, timestamps) are ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateFocusReq {
    pub main_focus: Option<String>,
    pub is_completed: Option<bool>,
    pub mod_system_boot: Option<bool>,
    pub mod_planning: Option<bool>,
    pub mod_deep_work: Option<bool>,
    pub mod_debugging: Option<bool>,
    pub mod_learning: Option<bool>,
    pub mod_hygiene: Option<bool>,
    pub mod_admin: Option<bool>,
    pub mod_shutdown: Option<bool>,
    pub custom_tasks: Option<Vec<CustomTaskDto>>,
    pub notes: Option<String>,
    pub reflection: Option<String>,
}

impl From<UpdateFocusReq> for DailyFocusPatch {
    fn from(r: UpdateFocusReq) -> Self {
        Self {
            main_focus: r.main_focus,
            is_completed: r.is_completed,
            modules: FocusModulesPatch {
                system_boot: r.mod_system_boot,
                planning: r.mod_planning,
                deep_work: r.mod_deep_work,
                debugging: r.mod_debugging,
                learning: r.mod_learning,
                hygiene: r.mod_hygiene,
                admin: r.mod_admin,
                shutdown: r.mod_shutdown,
            },
            custom_tasks: r
                .custom_tasks
                .map(|tasks| tasks.into_iter().map(Into::into).collect()),
            notes: r.notes,
            reflection: r.reflection,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DaySummaryDto {
    pub date: NaiveDate,
    pub is_completed: bool,
    pub has_task: bool,
}

impl From<DaySummary> for DaySummaryDto {
    fn from(d: DaySummary) -> Self {
        Self {
            date: d.date,
            is_completed: d.is_completed,
            has_task: d.has_task,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FocusStatsDto {
    pub streak: u32,
    /// Percent of the last seven days completed.
    pub consistency: u32,
    pub completed_count: u32,
}

impl From<FocusStats> for FocusStatsDto {
    fn from(s: FocusStats) -> Self {
        Self {
            streak: s.streak,
            consistency: s.consistency,
            completed_count: s.completed_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoalDto {
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

impl From<Goal> for GoalDto {
    fn from(g: Goal) -> Self {
        Self {
            id: g.id,
            title: g.title,
            description: g.description,
            start_time: g.start_time,
            end_time: g.end_time,
            date: g.date,
            color: g.color,
            category: g.category,
            is_completed: g.is_completed,
        }
    }
}

impl From<GoalDto> for Goal {
    fn from(g: GoalDto) -> Self {
        Self {
            id: g.id,
            title: g.title,
            description: g.description,
            start_time: g.start_time,
            end_time: g.end_time,
            date: g.date,
            color: g.color,
            category: g.category,
            is_completed: g.is_completed,
        }
    }
}

/// Goals for one Monday-started week. `id` and the timestamps are absent
/// for a week that has never been saved.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlanDto {
    pub id: Option<Uuid>,
    pub user_id: Uuid,
    pub user_email: String,
    pub week_start_date: NaiveDate,
    pub goals: Vec<GoalDto>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<WeeklyPlan> for WeeklyPlanDto {
    fn from(p: WeeklyPlan) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            user_email: p.user_email,
            week_start_date: p.week_start_date,
            goals: p.goals.into_iter().map(Into::into).collect(),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PutPlanReq {
    pub goals: Vec<GoalDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_email: String,
    pub amount: f64,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl From<Expense> for ExpenseDto {
    fn from(e: Expense) -> Self {
        Self {
            id: e.id,
            user_id: e.user_id,
            user_email: e.user_email,
            amount: e.amount,
            category: e.category,
            description: e.description,
            timestamp: e.timestamp,
        }
    }
}

/// Body of both create and update.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ExpenseReq {
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<ExpenseReq> for NewExpense {
    fn from(r: ExpenseReq) -> Self {
        Self {
            amount: r.amount,
            category: r.category,
            description: r.description,
        }
    }
}

impl From<ExpenseReq> for ExpenseUpdate {
    fn from(r: ExpenseReq) -> Self {
        Self {
            amount: r.amount,
            category: r.category,
            description: r.description,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExpenseStatsDto {
    pub today: f64,
    pub week: f64,
    pub month: f64,
}

impl From<ExpenseStats> for ExpenseStatsDto {
    fn from(s: ExpenseStats) -> Self {
        Self {
            today: s.today,
            week: s.week,
            month: s.month,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum MealTypeDto {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl From<MealType> for MealTypeDto {
    fn from(t: MealType) -> Self {
        match t {
            MealType::Breakfast => Self::Breakfast,
            MealType::Lunch => Self::Lunch,
            MealType::Dinner => Self::Dinner,
            MealType::Snack => Self::Snack,
        }
    }
}

impl From<MealTypeDto> for MealType {
    fn from(t: MealTypeDto) -> Self {
        match t {
            MealTypeDto::Breakfast => Self::Breakfast,
            MealTypeDto::Lunch => Self::Lunch,
            MealTypeDto::Dinner => Self::Dinner,
            MealTypeDto::Snack => Self::Snack,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub fiber: f64,
    #[serde(rename = "type")]
    pub meal_type: MealTypeDto,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<Meal> for MealDto {
    fn from(m: Meal) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            name: m.name,
            calories: m.nutrition.calories,
            protein: m.nutrition.protein,
            carbs: m.nutrition.carbs,
            fats: m.nutrition.fats,
            fiber: m.nutrition.fiber,
            meal_type: m.meal_type.into(),
            date: m.date,
            created_at: m.created_at,
        }
    }
}

/// New meal. Nutrition values default to 0, `type` to `Snack`, `date` to now.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateMealReq {
    pub name: String,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fats: f64,
    #[serde(default)]
    pub fiber: f64,
    #[serde(default, rename = "type")]
    pub meal_type: Option<MealTypeDto>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl From<CreateMealReq> for NewMeal {
    fn from(r: CreateMealReq) -> Self {
        Self {
            name: r.name,
            nutrition: NutritionFacts {
                calories: r.calories,
                protein: r.protein,
                carbs: r.carbs,
                fats: r.fats,
                fiber: r.fiber,
            },
            meal_type: r.meal_type.map(Into::into),
            date: r.date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NutritionSummaryDto {
    pub date: NaiveDate,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub fiber: f64,
    pub calorie_target: i32,
    pub remaining_calories: f64,
    pub meal_count: usize,
}

impl From<NutritionSummary> for NutritionSummaryDto {
    fn from(s: NutritionSummary) -> Self {
        Self {
            date: s.date,
            calories: s.totals.calories,
            protein: s.totals.protein,
            carbs: s.totals.carbs,
            fats: s.totals.fats,
            fiber: s.totals.fiber,
            calorie_target: s.calorie_target,
            remaining_calories: s.remaining_calories,
            meal_count: s.meal_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NutritionFactsDto {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub fiber: f64,
}

impl From<NutritionLookup> for NutritionFactsDto {
    fn from(l: NutritionLookup) -> Self {
        Self {
            name: l.name,
            calories: l.facts.calories,
            protein: l.facts.protein,
            carbs: l.facts.carbs,
            fats: l.facts.fats,
            fiber: l.facts.fiber,
        }
    }
}

/// Lookup result. Demo answers carry `isDemo` and an explanatory `message`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub is_demo: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
    pub data: NutritionFactsDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TargetReq {
    pub target: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TargetResponse {
    pub success: bool,
    pub target: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SignupReq {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginReq {
    pub email: String,
    pub password: String,
}

/// Public view of an account; the password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub calorie_target: i32,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            calorie_target: u.calorie_target,
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginUserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<User> for LoginUserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardDto {
    pub date: NaiveDate,
    pub focus: Option<DailyFocusDto>,
    pub stats: FocusStatsDto,
    pub expenses: ExpenseStatsDto,
    /// Sections that could not be loaded and show defaults.
    pub degraded: Vec<String>,
}

impl From<Dashboard> for DashboardDto {
    fn from(d: Dashboard) -> Self {
        Self {
            date: d.date,
            focus: d.focus.map(Into::into),
            stats: d.stats.into(),
            expenses: d.expenses.into(),
            degraded: d.degraded,
        }
    }
}

/// Bare acknowledgement, e.g. after a delete.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SuccessDto {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthDto {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn focus_patch_treats_null_as_absent() {
        let req: UpdateFocusReq = serde_json::from_value(json!({
            "mainFocus": null,
            "isCompleted": false,
            "modDeepWork": true,
            "notes": ""
        }))
        .unwrap();
        let patch = DailyFocusPatch::from(req);
        assert_eq!(patch.main_focus, None);
        assert_eq!(patch.is_completed, Some(false));
        assert_eq!(patch.modules.deep_work, Some(true));
        assert_eq!(patch.modules.planning, None);
        assert_eq!(patch.notes.as_deref(), Some(""));
    }

    #[test]
    fn focus_patch_ignores_server_owned_fields() {
        let req: UpdateFocusReq = serde_json::from_value(json!({
            "_id": "abc",
            "userEmail": "someone@else.io",
            "date": "1999-01-01",
            "reflection": "good day"
        }))
        .unwrap();
        let patch = DailyFocusPatch::from(req);
        assert_eq!(patch.reflection.as_deref(), Some("good day"));
        assert!(patch.main_focus.is_none());
    }

    #[test]
    fn meal_request_defaults_and_type_key() {
        let req: CreateMealReq =
            serde_json::from_value(json!({ "name": "Idli", "calories": 120, "type": "Breakfast" }))
                .unwrap();
        let meal = NewMeal::from(req);
        assert_eq!(meal.meal_type, Some(MealType::Breakfast));
        assert!(meal.nutrition.protein.abs() < f64::EPSILON);
        assert!(meal.date.is_none());

        let bad: Result<CreateMealReq, _> =
            serde_json::from_value(json!({ "name": "x", "type": "Brunch" }));
        assert!(bad.is_err());
    }

    #[test]
    fn analyze_response_omits_demo_fields_for_api_results() {
        let resp = AnalyzeResponse {
            success: true,
            is_demo: None,
            message: None,
            data: NutritionFactsDto {
                name: "apple".to_owned(),
                calories: 52.0,
                protein: 0.3,
                carbs: 14.0,
                fats: 0.2,
                fiber: 2.4,
            },
        };
        let json = serde_json::to_value(resp).unwrap();
        assert!(json.get("isDemo").is_none());
        assert_eq!(json["data"]["calories"], 52.0);
    }
}
