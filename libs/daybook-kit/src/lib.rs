//! Shared plumbing for the daybook service.
//!
//! * [`api`] holds the RFC 9457 problem type, typed extractors, response
//!   envelopes and the operation builder that keeps axum routes and the
//!   OpenAPI document in sync.
//! * [`security`] resolves the caller identity from request headers.
//! * [`bootstrap`] loads layered configuration, installs logging and waits
//!   for shutdown signals.

pub mod api;
pub mod bootstrap;
pub mod security;

pub use security::{Authz, SecurityContext};
