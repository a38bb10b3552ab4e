//! Persistence contracts. Implementations live in `infra::storage`.

mod expenses_repo;
mod focus_repo;
mod meals_repo;
mod plans_repo;
mod users_repo;

pub use expenses_repo::ExpensesRepository;
pub use focus_repo::FocusRepository;
pub use meals_repo::{MealRecord, MealsRepository};
pub use plans_repo::PlansRepository;
pub use users_repo::UsersRepository;
