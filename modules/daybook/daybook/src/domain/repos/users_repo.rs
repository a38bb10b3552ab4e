use async_trait::async_trait;
use daybook_sdk::{NewUser, User};
use uuid::Uuid;

use crate::domain::error::DomainError;

#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Emails are compared lowercased.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Insert a new account. A taken email yields [`DomainError::Conflict`].
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Returns `None` when no such user exists.
    async fn set_calorie_target(&self, id: Uuid, target: i32)
    -> Result<Option<User>, DomainError>;
}
