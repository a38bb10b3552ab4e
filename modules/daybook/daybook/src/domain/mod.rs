//! Business rules. This layer MUST NOT import `api::*`.

pub mod calendar;
pub mod error;
pub mod fields;
pub mod nutrition_table;
pub mod password;
pub mod ports;
pub mod repos;
pub mod service;
pub mod stats;

pub use error::DomainError;
