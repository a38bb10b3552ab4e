use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use daybook_kit::SecurityContext;
use daybook_sdk::{Expense, ExpenseStats, ExpenseUpdate, NewExpense};
use uuid::Uuid;

use super::{ServiceConfig, ensure_identity};
use crate::domain::calendar::{local_day_start, local_day_window, month_start, week_start};
use crate::domain::error::DomainError;
use crate::domain::fields::{ExpenseFields, max_len, required_text};
use crate::domain::repos::ExpensesRepository;

pub struct ExpensesService {
    repo: Arc<dyn ExpensesRepository>,
    config: ServiceConfig,
}

/// Instants bounding the three totals; every window ends at `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsWindows {
    pub day: DateTime<Utc>,
    pub week: DateTime<Utc>,
    pub month: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl StatsWindows {
    /// Local-midnight boundaries for `today`.
    #[must_use]
    pub fn local(today: NaiveDate) -> Self {
        let (day, end) = local_day_window(today);
        Self {
            day,
            week: local_day_start(week_start(today)),
            month: local_day_start(month_start(today)),
            end,
        }
    }

    fn earliest(&self) -> DateTime<Utc> {
        self.week.min(self.month)
    }
}

/// Sum `expenses` into the day, week and month buckets.
#[must_use]
pub fn totals(expenses: &[Expense], windows: &StatsWindows) -> ExpenseStats {
    expenses
        .iter()
        .filter(|e| e.timestamp < windows.end)
        .fold(ExpenseStats::default(), |mut acc, e| {
            if e.timestamp >= windows.day {
                acc.today += e.amount;
            }
            if e.timestamp >= windows.week {
                acc.week += e.amount;
            }
            if e.timestamp >= windows.month {
                acc.month += e.amount;
            }
            acc
        })
}

impl ExpensesService {
    pub fn new(repo: Arc<dyn ExpensesRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    /// Record an expense stamped with the current instant.
    pub async fn create(
        &self,
        ctx: &SecurityContext,
        expense: NewExpense,
    ) -> Result<Expense, DomainError> {
        ensure_identity(ctx)?;
        let expense = NewExpense {
            category: expense.category.trim().to_owned(),
            ..expense
        };
        self.validate(expense.amount, &expense.category, expense.description.as_deref())?;
        let created = self.repo.create(ctx, expense, Utc::now()).await?;
        tracing::debug!(expense_id = %created.id, "expense recorded");
        Ok(created)
    }

    /// The caller's most recent expenses, newest first.
    pub async fn list_recent(&self, ctx: &SecurityContext) -> Result<Vec<Expense>, DomainError> {
        self.repo
            .list_recent(ctx, self.config.recent_expenses_limit)
            .await
    }

    pub async fn update(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
        update: ExpenseUpdate,
    ) -> Result<Expense, DomainError> {
        let update = ExpenseUpdate {
            category: update.category.trim().to_owned(),
            ..update
        };
        self.validate(update.amount, &update.category, update.description.as_deref())?;
        self.repo
            .update(ctx, id, update)
            .await?
            .ok_or_else(|| DomainError::not_found("expense", id))
    }

    pub async fn delete(&self, ctx: &SecurityContext, id: Uuid) -> Result<(), DomainError> {
        if self.repo.delete(ctx, id).await? {
            tracing::debug!(expense_id = %id, "expense deleted");
            Ok(())
        } else {
            Err(DomainError::not_found("expense", id))
        }
    }

    /// Totals for `today`, its Monday-started week and its month.
    pub async fn stats(
        &self,
        ctx: &SecurityContext,
        today: NaiveDate,
    ) -> Result<ExpenseStats, DomainError> {
        let windows = StatsWindows::local(today);
        let expenses = self.repo.list_since(ctx, windows.earliest()).await?;
        Ok(totals(&expenses, &windows))
    }

    fn validate(
        &self,
        amount: f64,
        category: &str,
        description: Option<&str>,
    ) -> Result<(), DomainError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(DomainError::validation(
                ExpenseFields::AMOUNT,
                "must be a positive number",
            ));
        }
        required_text(ExpenseFields::CATEGORY, category, self.config.max_field_length)?;
        if let Some(text) = description {
            max_len(ExpenseFields::DESCRIPTION, text, self.config.max_field_length)?;
        }
        Ok(())
    }
}
