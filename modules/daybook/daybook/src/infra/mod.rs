//! Adapters for the domain ports: SeaORM storage and the nutrition API.

pub mod nutrition;
pub mod storage;
