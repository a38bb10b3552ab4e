//! In-memory repositories for service tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use daybook_kit::SecurityContext;
use daybook_sdk::{
    DEFAULT_CALORIE_TARGET, DailyFocus, DailyFocusPatch, Expense, ExpenseUpdate, FocusModules,
    Goal, Meal, NewExpense, NewUser, User, WeeklyPlan,
};
use uuid::Uuid;

use super::{AppServices, Repositories, ServiceConfig};
use crate::domain::error::DomainError;
use crate::domain::ports::NutritionProvider;
use crate::domain::repos::{
    ExpensesRepository, FocusRepository, MealRecord, MealsRepository, PlansRepository,
    UsersRepository,
};

#[derive(Default)]
pub struct InMemoryStore {
    pub users: Mutex<Vec<User>>,
    pub focus: Mutex<Vec<DailyFocus>>,
    pub plans: Mutex<Vec<WeeklyPlan>>,
    pub expenses: Mutex<Vec<Expense>>,
    pub meals: Mutex<Vec<Meal>>,
}

impl InMemoryStore {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories {
            users: self.clone(),
            focus: self.clone(),
            plans: self.clone(),
            expenses: self.clone(),
            meals: self.clone(),
        }
    }

    pub fn services(self: &Arc<Self>) -> AppServices {
        AppServices::new(self.repositories(), None, &ServiceConfig::default())
    }

    pub fn services_with(
        self: &Arc<Self>,
        nutrition: Option<Arc<dyn NutritionProvider>>,
    ) -> AppServices {
        AppServices::new(self.repositories(), nutrition, &ServiceConfig::default())
    }

    pub fn insert_user(&self, id: Uuid, email: &str) -> User {
        let user = User {
            id,
            email: email.to_owned(),
            name: "Test User".to_owned(),
            password_hash: None,
            calorie_target: DEFAULT_CALORIE_TARGET,
            created_at: Utc::now(),
        };
        self.users.lock().unwrap().push(user.clone());
        user
    }
}

pub fn ctx() -> SecurityContext {
    SecurityContext::new(Uuid::new_v4(), "tester@example.com")
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[async_trait]
impl UsersRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let email = email.to_lowercase();
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::conflict("email is already registered"));
        }
        let created = User {
            id: Uuid::now_v7(),
            email: user.email,
            name: user.name,
            password_hash: user.password_hash,
            calorie_target: DEFAULT_CALORIE_TARGET,
            created_at: Utc::now(),
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn set_calorie_target(
        &self,
        id: Uuid,
        target: i32,
    ) -> Result<Option<User>, DomainError> {
        let mut users = self.users.lock().unwrap();
        Ok(users.iter_mut().find(|u| u.id == id).map(|u| {
            u.calorie_target = target;
            u.clone()
        }))
    }
}

#[async_trait]
impl FocusRepository for InMemoryStore {
    async fn find_by_date(
        &self,
        ctx: &SecurityContext,
        date: NaiveDate,
    ) -> Result<Option<DailyFocus>, DomainError> {
        Ok(self
            .focus
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.user_id == ctx.user_id() && f.date == date)
            .cloned())
    }

    async fn find_in_range(
        &self,
        ctx: &SecurityContext,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyFocus>, DomainError> {
        let mut found: Vec<_> = self
            .focus
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.user_id == ctx.user_id() && f.date >= from && f.date <= to)
            .cloned()
            .collect();
        found.sort_by_key(|f| f.date);
        Ok(found)
    }

    async fn upsert(
        &self,
        ctx: &SecurityContext,
        date: NaiveDate,
        patch: &DailyFocusPatch,
    ) -> Result<DailyFocus, DomainError> {
        let mut records = self.focus.lock().unwrap();
        let now = Utc::now();
        let idx = records
            .iter()
            .position(|f| f.user_id == ctx.user_id() && f.date == date);
        let idx = idx.unwrap_or_else(|| {
            records.push(DailyFocus {
                id: Uuid::now_v7(),
                user_id: ctx.user_id(),
                user_email: ctx.email().to_owned(),
                date,
                main_focus: String::new(),
                is_completed: false,
                modules: FocusModules::default(),
                custom_tasks: Vec::new(),
                notes: String::new(),
                reflection: String::new(),
                created_at: now,
                updated_at: now,
            });
            records.len() - 1
        });
        let rec = &mut records[idx];
        if let Some(v) = &patch.main_focus {
            rec.main_focus.clone_from(v);
        }
        if let Some(v) = patch.is_completed {
            rec.is_completed = v;
        }
        rec.modules = patch.modules.apply(rec.modules);
        if let Some(v) = &patch.custom_tasks {
            rec.custom_tasks.clone_from(v);
        }
        if let Some(v) = &patch.notes {
            rec.notes.clone_from(v);
        }
        if let Some(v) = &patch.reflection {
            rec.reflection.clone_from(v);
        }
        rec.user_email = ctx.email().to_owned();
        rec.updated_at = now;
        Ok(rec.clone())
    }
}

#[async_trait]
impl PlansRepository for InMemoryStore {
    async fn find_by_week(
        &self,
        ctx: &SecurityContext,
        week_start: NaiveDate,
    ) -> Result<Option<WeeklyPlan>, DomainError> {
        Ok(self
            .plans
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.user_id == ctx.user_id() && p.week_start_date == week_start)
            .cloned())
    }

    async fn upsert_goals(
        &self,
        ctx: &SecurityContext,
        week_start: NaiveDate,
        goals: &[Goal],
    ) -> Result<WeeklyPlan, DomainError> {
        let mut plans = self.plans.lock().unwrap();
        let now = Utc::now();
        if let Some(plan) = plans
            .iter_mut()
            .find(|p| p.user_id == ctx.user_id() && p.week_start_date == week_start)
        {
            plan.goals = goals.to_vec();
            plan.updated_at = Some(now);
            return Ok(plan.clone());
        }
        let plan = WeeklyPlan {
            id: Some(Uuid::now_v7()),
            user_id: ctx.user_id(),
            user_email: ctx.email().to_owned(),
            week_start_date: week_start,
            goals: goals.to_vec(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        plans.push(plan.clone());
        Ok(plan)
    }
}

#[async_trait]
impl ExpensesRepository for InMemoryStore {
    async fn create(
        &self,
        ctx: &SecurityContext,
        expense: NewExpense,
        timestamp: DateTime<Utc>,
    ) -> Result<Expense, DomainError> {
        let created = Expense {
            id: Uuid::now_v7(),
            user_id: ctx.user_id(),
            user_email: ctx.email().to_owned(),
            amount: expense.amount,
            category: expense.category,
            description: expense.description,
            timestamp,
        };
        self.expenses.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list_recent(
        &self,
        ctx: &SecurityContext,
        limit: u64,
    ) -> Result<Vec<Expense>, DomainError> {
        let mut mine: Vec<_> = self
            .expenses
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == ctx.user_id())
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        mine.truncate(usize::try_from(limit).unwrap());
        Ok(mine)
    }

    async fn list_since(
        &self,
        ctx: &SecurityContext,
        since: DateTime<Utc>,
    ) -> Result<Vec<Expense>, DomainError> {
        Ok(self
            .expenses
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == ctx.user_id() && e.timestamp >= since)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
        update: ExpenseUpdate,
    ) -> Result<Option<Expense>, DomainError> {
        let mut all = self.expenses.lock().unwrap();
        Ok(all
            .iter_mut()
            .find(|e| e.id == id && e.user_id == ctx.user_id())
            .map(|e| {
                e.amount = update.amount;
                e.category = update.category;
                e.description = update.description;
                e.clone()
            }))
    }

    async fn delete(&self, ctx: &SecurityContext, id: Uuid) -> Result<bool, DomainError> {
        let mut all = self.expenses.lock().unwrap();
        let before = all.len();
        all.retain(|e| !(e.id == id && e.user_id == ctx.user_id()));
        Ok(all.len() != before)
    }
}

#[async_trait]
impl MealsRepository for InMemoryStore {
    async fn create(&self, ctx: &SecurityContext, meal: MealRecord) -> Result<Meal, DomainError> {
        let created = Meal {
            id: Uuid::now_v7(),
            user_id: ctx.user_id(),
            name: meal.name,
            nutrition: meal.nutrition,
            meal_type: meal.meal_type,
            date: meal.date,
            created_at: Utc::now(),
        };
        self.meals.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list(
        &self,
        ctx: &SecurityContext,
        window: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<Vec<Meal>, DomainError> {
        let mut mine: Vec<_> = self
            .meals
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.user_id == ctx.user_id())
            .filter(|m| window.is_none_or(|(start, end)| m.date >= start && m.date < end))
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(mine)
    }
}

/// Focus storage that is always down.
pub struct BrokenFocus;

#[async_trait]
impl FocusRepository for BrokenFocus {
    async fn find_by_date(
        &self,
        _ctx: &SecurityContext,
        _date: NaiveDate,
    ) -> Result<Option<DailyFocus>, DomainError> {
        Err(DomainError::database("connection refused"))
    }

    async fn find_in_range(
        &self,
        _ctx: &SecurityContext,
        _from: NaiveDate,
        _to: NaiveDate,
    ) -> Result<Vec<DailyFocus>, DomainError> {
        Err(DomainError::database("connection refused"))
    }

    async fn upsert(
        &self,
        _ctx: &SecurityContext,
        _date: NaiveDate,
        _patch: &DailyFocusPatch,
    ) -> Result<DailyFocus, DomainError> {
        Err(DomainError::database("connection refused"))
    }
}
