//! Axum handlers. Each takes the services from the `AppServices` extension
//! and the caller from [`Authz`](daybook_kit::Authz).

pub mod accounts;
pub mod dashboard;
pub mod expenses;
pub mod focus;
pub mod health;
pub mod meals;
pub mod plans;

#[cfg(test)]
pub(crate) mod test_app;
