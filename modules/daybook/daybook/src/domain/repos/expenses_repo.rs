use async_trait::async_trait;
use chrono::{DateTime, Utc};
use daybook_kit::SecurityContext;
use daybook_sdk::{Expense, ExpenseUpdate, NewExpense};
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Expenses are always scoped to the caller; another user's id behaves as missing.
#[async_trait]
pub trait ExpensesRepository: Send + Sync {
    async fn create(
        &self,
        ctx: &SecurityContext,
        expense: NewExpense,
        timestamp: DateTime<Utc>,
    ) -> Result<Expense, DomainError>;

    /// Newest first.
    async fn list_recent(
        &self,
        ctx: &SecurityContext,
        limit: u64,
    ) -> Result<Vec<Expense>, DomainError>;

    /// Expenses with `timestamp >= since`.
    async fn list_since(
        &self,
        ctx: &SecurityContext,
        since: DateTime<Utc>,
    ) -> Result<Vec<Expense>, DomainError>;

    /// Returns `None` when the expense does not exist for this user.
    async fn update(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
        update: ExpenseUpdate,
    ) -> Result<Option<Expense>, DomainError>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, ctx: &SecurityContext, id: Uuid) -> Result<bool, DomainError>;
}
