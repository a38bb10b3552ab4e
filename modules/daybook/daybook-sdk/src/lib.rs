//! Transport-agnostic models shared by the daybook domain, storage and REST layers.

pub mod models;

pub use models::*;
