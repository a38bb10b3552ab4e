use std::sync::Arc;

use chrono::NaiveDate;
use daybook_kit::SecurityContext;
use daybook_sdk::{Dashboard, ExpenseStats, FocusStats};

use super::{ExpensesService, FocusService};

/// Home-screen aggregate. Sections load concurrently; a failing section is
/// reported in `degraded` and replaced by its default.
pub struct DashboardService {
    focus: Arc<FocusService>,
    expenses: Arc<ExpensesService>,
}

impl DashboardService {
    pub fn new(focus: Arc<FocusService>, expenses: Arc<ExpensesService>) -> Self {
        Self { focus, expenses }
    }

    pub async fn overview(&self, ctx: &SecurityContext, today: NaiveDate) -> Dashboard {
        let (focus, stats, expenses) = tokio::join!(
            self.focus.get_today(ctx, today),
            self.focus.stats(ctx, today),
            self.expenses.stats(ctx, today),
        );

        let mut degraded = Vec::new();
        let focus = focus.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "dashboard: focus unavailable");
            degraded.push("focus".to_owned());
            None
        });
        let stats = stats.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "dashboard: focus stats unavailable");
            degraded.push("stats".to_owned());
            FocusStats::default()
        });
        let expenses = expenses.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "dashboard: expense stats unavailable");
            degraded.push("expenses".to_owned());
            ExpenseStats::default()
        });

        Dashboard {
            date: today,
            focus,
            stats,
            expenses,
            degraded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::service::ServiceConfig;
    use crate::domain::service::test_support::{BrokenFocus, InMemoryStore, ctx};
    use crate::domain::calendar::local_today;
    use daybook_sdk::{DailyFocusPatch, NewExpense};

    #[tokio::test]
    async fn combines_all_sections() {
        let store = InMemoryStore::shared();
        let services = store.services();
        let ctx = ctx();
        let today = local_today();

        services
            .focus
            .upsert_today(
                &ctx,
                today,
                DailyFocusPatch {
                    main_focus: Some("Deploy".to_owned()),
                    is_completed: Some(true),
                    ..DailyFocusPatch::default()
                },
            )
            .await
            .unwrap();
        services
            .expenses
            .create(
                &ctx,
                NewExpense {
                    amount: 42.0,
                    category: "Food".to_owned(),
                    description: None,
                },
            )
            .await
            .unwrap();

        let board = services.dashboard.overview(&ctx, today).await;
        assert!(board.degraded.is_empty());
        assert_eq!(board.focus.unwrap().main_focus, "Deploy");
        assert_eq!(board.stats.streak, 1);
        assert!((board.expenses.today - 42.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn failing_section_degrades_instead_of_failing() {
        let store = InMemoryStore::shared();
        let focus = Arc::new(FocusService::new(
            Arc::new(BrokenFocus),
            ServiceConfig::default(),
        ));
        let expenses = store.services().expenses;
        let svc = DashboardService::new(focus, expenses);

        let board = svc.overview(&ctx(), local_today()).await;
        assert_eq!(board.degraded, vec!["focus", "stats"]);
        assert!(board.focus.is_none());
        assert_eq!(board.stats, FocusStats::default());
    }
}
