use sea_orm::{DbErr, SqlErr};

use crate::domain::error::DomainError;

const CONFLICT_MESSAGE: &str = "record already exists";

/// Unique-index violations become [`DomainError::Conflict`]; everything else
/// is a database failure.
pub fn db_err(e: DbErr) -> DomainError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = e.sql_err() {
        return unique_violation(&detail);
    }
    DomainError::database(e.to_string())
}

/// The driver text names tables and columns; it is logged, never returned.
fn unique_violation(detail: &str) -> DomainError {
    tracing::warn!(detail, "unique constraint violated");
    DomainError::conflict(CONFLICT_MESSAGE)
}

pub fn json_err(e: serde_json::Error) -> DomainError {
    DomainError::database(format!("malformed JSON column: {e}"))
}
