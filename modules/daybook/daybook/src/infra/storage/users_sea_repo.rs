use async_trait::async_trait;
use chrono::Utc;
use daybook_sdk::{DEFAULT_CALORIE_TARGET, NewUser, User};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use super::db::db_err;
use super::entity::user::{ActiveModel as UserAM, Column, Entity as UserEntity};
use crate::domain::error::DomainError;
use crate::domain::repos::UsersRepository;

pub struct OrmUsersRepository {
    db: DatabaseConnection,
}

impl OrmUsersRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UsersRepository for OrmUsersRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let found = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let found = UserEntity::find()
            .filter(Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let am = UserAM {
            id: Set(Uuid::now_v7()),
            email: Set(user.email.trim().to_lowercase()),
            name: Set(user.name),
            password_hash: Set(user.password_hash),
            calorie_target: Set(DEFAULT_CALORIE_TARGET),
            created_at: Set(Utc::now()),
        };
        let created = am.insert(&self.db).await.map_err(|e| match db_err(e) {
            DomainError::Conflict { .. } => DomainError::conflict("email is already registered"),
            other => other,
        })?;
        Ok(created.into())
    }

    async fn set_calorie_target(
        &self,
        id: Uuid,
        target: i32,
    ) -> Result<Option<User>, DomainError> {
        let res = UserEntity::update_many()
            .col_expr(Column::CalorieTarget, Expr::value(target))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if res.rows_affected == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }
}
