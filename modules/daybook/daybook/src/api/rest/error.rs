use axum::http::{StatusCode, Uri};
use daybook_kit::api::{Problem, current_trace_id};

use crate::domain::error::DomainError;

/// Map a domain error to an RFC 9457 problem for `instance`.
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let trace_id = current_trace_id();

    let problem = match e {
        DomainError::NotFound { entity, id } => {
            tracing::debug!(entity, %id, "not found");
            Problem::new(StatusCode::NOT_FOUND, "Not Found", format!("{entity} not found"))
                .with_code(format!("{}_NOT_FOUND", entity.to_uppercase()))
        }
        DomainError::Validation { field, message } => Problem::new(
            StatusCode::BAD_REQUEST,
            "Bad Request",
            format!("Validation error on '{field}': {message}"),
        )
        .with_code("VALIDATION_ERROR")
        .with_violation(field.clone(), message.clone()),
        DomainError::Conflict { message } => {
            Problem::new(StatusCode::CONFLICT, "Conflict", message.clone()).with_code("CONFLICT")
        }
        DomainError::InvalidCredentials => Problem::new(
            StatusCode::BAD_REQUEST,
            "Bad Request",
            "Invalid email or password",
        )
        .with_code("INVALID_CREDENTIALS"),
        DomainError::Database { .. } => {
            tracing::error!(error = ?e, "database error");
            internal("An internal database error occurred")
        }
        DomainError::Upstream { .. } => {
            tracing::error!(error = ?e, "upstream error");
            internal("An upstream service failed")
        }
        DomainError::Internal { .. } => {
            tracing::error!(error = ?e, "internal error");
            internal("An internal error occurred")
        }
    };

    problem.with_instance(instance).with_trace_id(trace_id)
}

fn internal(detail: &str) -> Problem {
    Problem::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", detail)
        .with_code("INTERNAL")
}

/// `map_err` adapter binding the request path as the problem instance.
#[must_use]
pub fn to_problem(uri: &Uri) -> impl Fn(DomainError) -> Problem + '_ {
    move |e| domain_error_to_problem(&e, uri.path())
}

/// Lets `?` work in handlers that do not carry the request URI.
impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        domain_error_to_problem(&e, "/")
    }
}
