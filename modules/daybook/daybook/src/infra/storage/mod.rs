//! SeaORM persistence.
//!
//! - `entity/` table definitions
//! - `mapper.rs` row to model conversions
//! - `migrations/` schema, one raw-SQL script per backend
//! - `*_sea_repo.rs` repository implementations

pub mod db;
pub mod entity;
pub mod mapper;
pub mod migrations;

mod expenses_sea_repo;
mod focus_sea_repo;
mod meals_sea_repo;
mod plans_sea_repo;
mod users_sea_repo;

pub use expenses_sea_repo::OrmExpensesRepository;
pub use focus_sea_repo::OrmFocusRepository;
pub use meals_sea_repo::OrmMealsRepository;
pub use plans_sea_repo::OrmPlansRepository;
pub use users_sea_repo::OrmUsersRepository;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::domain::service::Repositories;

/// All repositories over one connection pool.
#[must_use]
pub fn repositories(db: &DatabaseConnection) -> Repositories {
    Repositories {
        users: Arc::new(OrmUsersRepository::new(db.clone())),
        focus: Arc::new(OrmFocusRepository::new(db.clone())),
        plans: Arc::new(OrmPlansRepository::new(db.clone())),
        expenses: Arc::new(OrmExpensesRepository::new(db.clone())),
        meals: Arc::new(OrmMealsRepository::new(db.clone())),
    }
}
