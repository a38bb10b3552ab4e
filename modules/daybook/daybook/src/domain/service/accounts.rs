use std::sync::Arc;

use daybook_kit::SecurityContext;
use daybook_sdk::{NewUser, User};

use super::ServiceConfig;
use crate::domain::error::DomainError;
use crate::domain::fields::{AccountFields, max_len, required_text};
use crate::domain::password;
use crate::domain::repos::UsersRepository;

pub const MIN_PASSWORD_LEN: usize = 8;
const MAX_PASSWORD_LEN: usize = 1024;
pub const CALORIE_TARGET_RANGE: std::ops::RangeInclusive<i32> = 1..=20_000;

/// Registration, login and per-user settings.
pub struct AccountsService {
    users: Arc<dyn UsersRepository>,
    config: ServiceConfig,
}

impl AccountsService {
    pub fn new(users: Arc<dyn UsersRepository>, config: ServiceConfig) -> Self {
        Self { users, config }
    }

    /// Register a new password account. Emails are stored lowercased.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, DomainError> {
        let name = name.trim();
        required_text(AccountFields::NAME, name, self.config.max_field_length)?;
        let email = normalize_email(email)?;
        validate_password(password)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(DomainError::conflict("email is already registered"));
        }

        let password = password.to_owned();
        let hash = tokio::task::spawn_blocking(move || password::hash_password(&password))
            .await
            .map_err(|e| DomainError::internal(format!("hashing task failed: {e}")))??;

        let user = self
            .users
            .create(NewUser {
                email,
                name: name.to_owned(),
                password_hash: Some(hash),
            })
            .await?;
        tracing::info!(user_id = %user.id, "account created");
        Ok(user)
    }

    /// Unknown email, missing hash and wrong password are indistinguishable.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let email = email.trim().to_lowercase();
        let Some(user) = self.users.find_by_email(&email).await? else {
            return Err(DomainError::InvalidCredentials);
        };
        let Some(stored) = user.password_hash.clone() else {
            return Err(DomainError::InvalidCredentials);
        };

        let password = password.to_owned();
        let matches =
            tokio::task::spawn_blocking(move || password::verify_password(&password, &stored))
                .await
                .map_err(|e| DomainError::internal(format!("verification task failed: {e}")))??;
        if !matches {
            tracing::debug!(user_id = %user.id, "password mismatch");
            return Err(DomainError::InvalidCredentials);
        }
        Ok(user)
    }

    pub async fn get_target(&self, ctx: &SecurityContext) -> Result<i32, DomainError> {
        self.users
            .find_by_id(ctx.user_id())
            .await?
            .map(|u| u.calorie_target)
            .ok_or_else(|| DomainError::not_found("user", ctx.user_id()))
    }

    pub async fn set_target(
        &self,
        ctx: &SecurityContext,
        target: i32,
    ) -> Result<i32, DomainError> {
        if !CALORIE_TARGET_RANGE.contains(&target) {
            return Err(DomainError::validation(
                AccountFields::TARGET,
                format!(
                    "must be between {} and {}",
                    CALORIE_TARGET_RANGE.start(),
                    CALORIE_TARGET_RANGE.end()
                ),
            ));
        }
        self.users
            .set_calorie_target(ctx.user_id(), target)
            .await?
            .map(|u| u.calorie_target)
            .ok_or_else(|| DomainError::not_found("user", ctx.user_id()))
    }
}

fn normalize_email(raw: &str) -> Result<String, DomainError> {
    let email = raw.trim().to_lowercase();
    max_len(AccountFields::EMAIL, &email, 254)?;
    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && !domain.contains('@')
            && domain.split('.').count() >= 2
            && domain.split('.').all(|part| !part.is_empty())
            && !email.chars().any(char::is_whitespace)
    });
    if !valid {
        return Err(DomainError::validation(
            AccountFields::EMAIL,
            "must be a valid email address",
        ));
    }
    Ok(email)
}

fn validate_password(password: &str) -> Result<(), DomainError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(DomainError::validation(
            AccountFields::PASSWORD,
            format!("must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    max_len(AccountFields::PASSWORD, password, MAX_PASSWORD_LEN)
}
