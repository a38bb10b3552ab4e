use async_trait::async_trait;
use chrono::{DateTime, Utc};
use daybook_kit::SecurityContext;
use daybook_sdk::{Expense, ExpenseUpdate, NewExpense};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use super::db::db_err;
use super::entity::expense::{ActiveModel as ExpenseAM, Column, Entity as ExpenseEntity};
use crate::domain::error::DomainError;
use crate::domain::repos::ExpensesRepository;

pub struct OrmExpensesRepository {
    db: DatabaseConnection,
}

impl OrmExpensesRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_owned(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
    ) -> Result<Option<Expense>, DomainError> {
        let found = ExpenseEntity::find_by_id(id)
            .filter(Column::UserId.eq(ctx.user_id()))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }
}

#[async_trait]
impl ExpensesRepository for OrmExpensesRepository {
    async fn create(
        &self,
        ctx: &SecurityContext,
        expense: NewExpense,
        timestamp: DateTime<Utc>,
    ) -> Result<Expense, DomainError> {
        let am = ExpenseAM {
            id: Set(Uuid::now_v7()),
            user_id: Set(ctx.user_id()),
            user_email: Set(ctx.email().to_owned()),
            amount: Set(expense.amount),
            category: Set(expense.category),
            description: Set(expense.description),
            timestamp: Set(timestamp),
        };
        Ok(am.insert(&self.db).await.map_err(db_err)?.into())
    }

    async fn list_recent(
        &self,
        ctx: &SecurityContext,
        limit: u64,
    ) -> Result<Vec<Expense>, DomainError> {
        let rows = ExpenseEntity::find()
            .filter(Column::UserId.eq(ctx.user_id()))
            .order_by_desc(Column::Timestamp)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_since(
        &self,
        ctx: &SecurityContext,
        since: DateTime<Utc>,
    ) -> Result<Vec<Expense>, DomainError> {
        let rows = ExpenseEntity::find()
            .filter(Column::UserId.eq(ctx.user_id()))
            .filter(Column::Timestamp.gte(since))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
        update: ExpenseUpdate,
    ) -> Result<Option<Expense>, DomainError> {
        let res = ExpenseEntity::update_many()
            .col_expr(Column::Amount, Expr::value(update.amount))
            .col_expr(Column::Category, Expr::value(update.category))
            .col_expr(Column::Description, Expr::value(update.description))
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(ctx.user_id()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if res.rows_affected == 0 {
            return Ok(None);
        }
        self.find_owned(ctx, id).await
    }

    async fn delete(&self, ctx: &SecurityContext, id: Uuid) -> Result<bool, DomainError> {
        let res = ExpenseEntity::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(ctx.user_id()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(res.rows_affected > 0)
    }
}
