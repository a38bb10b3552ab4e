//! Daybook module.
//!
//! Per-user daily focus checklists, Monday-started weekly plans, expenses and
//! meals. Layering is one way: `api::rest` calls `domain`, and `domain` talks
//! to storage and the nutrition database only through the traits in
//! `domain::repos` and `domain::ports`, implemented in `infra`.

pub use daybook_sdk as models;

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;
pub mod module;

pub use config::DaybookConfig;
pub use module::DaybookModule;
