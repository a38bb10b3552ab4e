//! Domain services: one per feature area, bundled into [`AppServices`].

use std::sync::Arc;

use daybook_kit::SecurityContext;

use crate::config::DaybookConfig;
use crate::domain::error::DomainError;
use crate::domain::ports::NutritionProvider;
use crate::domain::repos::{
    ExpensesRepository, FocusRepository, MealsRepository, PlansRepository, UsersRepository,
};

mod accounts;
mod dashboard;
mod expenses;
mod focus;
mod meals;
mod plans;

#[cfg(test)]
pub(crate) mod test_support;

pub use accounts::AccountsService;
pub use dashboard::DashboardService;
pub use expenses::ExpensesService;
pub use focus::FocusService;
pub use meals::MealsService;
pub use plans::PlansService;

/// Limits applied by the services.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_field_length: usize,
    pub max_custom_tasks: usize,
    pub max_goals: usize,
    pub recent_expenses_limit: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::from(&DaybookConfig::default())
    }
}

impl From<&DaybookConfig> for ServiceConfig {
    fn from(cfg: &DaybookConfig) -> Self {
        Self {
            max_field_length: cfg.max_field_length,
            max_custom_tasks: cfg.max_custom_tasks,
            max_goals: cfg.max_goals,
            recent_expenses_limit: cfg.recent_expenses_limit,
        }
    }
}

/// Storage and outbound adapters the services are built from.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UsersRepository>,
    pub focus: Arc<dyn FocusRepository>,
    pub plans: Arc<dyn PlansRepository>,
    pub expenses: Arc<dyn ExpensesRepository>,
    pub meals: Arc<dyn MealsRepository>,
}

/// Every service the REST layer needs.
#[derive(Clone)]
pub struct AppServices {
    pub accounts: Arc<AccountsService>,
    pub focus: Arc<FocusService>,
    pub plans: Arc<PlansService>,
    pub expenses: Arc<ExpensesService>,
    pub meals: Arc<MealsService>,
    pub dashboard: Arc<DashboardService>,
}

impl AppServices {
    pub fn new(
        repos: Repositories,
        nutrition: Option<Arc<dyn NutritionProvider>>,
        config: &ServiceConfig,
    ) -> Self {
        let focus = Arc::new(FocusService::new(repos.focus, config.clone()));
        let expenses = Arc::new(ExpensesService::new(repos.expenses, config.clone()));
        Self {
            accounts: Arc::new(AccountsService::new(repos.users.clone(), config.clone())),
            plans: Arc::new(PlansService::new(repos.plans, config.clone())),
            meals: Arc::new(MealsService::new(
                repos.meals,
                repos.users,
                nutrition,
                config.clone(),
            )),
            dashboard: Arc::new(DashboardService::new(focus.clone(), expenses.clone())),
            focus,
            expenses,
        }
    }
}

/// Writes need an owner; a nil id or a blank email cannot own a record.
pub(crate) fn ensure_identity(ctx: &SecurityContext) -> Result<(), DomainError> {
    if ctx.user_id().is_nil() {
        return Err(DomainError::validation("userId", "must be a non-nil UUID"));
    }
    if ctx.email().trim().is_empty() {
        return Err(DomainError::validation("userEmail", "must not be empty"));
    }
    Ok(())
}
