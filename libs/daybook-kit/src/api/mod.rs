//! REST building blocks: problems, extractors, envelopes and route registration.

pub mod extract;
pub mod openapi_registry;
pub mod operation_builder;
pub mod problem;
pub mod response;

pub use extract::{ApiJson, ApiQuery};
pub use openapi_registry::{OpenApiInfo, OpenApiRegistry, ensure_schema};
pub use operation_builder::{OperationBuilder, OperationSpec, ParamLocation, ResponseSchema};
pub use problem::{
    APPLICATION_PROBLEM_JSON, FieldViolation, Problem, bad_request, conflict, current_trace_id,
    internal_error, not_found, unauthorized,
};

/// Prelude for handler modules.
pub mod prelude {
    pub use super::extract::{ApiJson, ApiQuery};
    pub use super::problem::Problem;
    pub use super::response::{Envelope, created_envelope, ok_envelope};
    pub use axum::{Json, http::StatusCode, response::IntoResponse};

    /// Result type for handlers; errors render as problem documents.
    pub type ApiResult<T> = Result<T, Problem>;
}
