//! Caller identity.
//!
//! There are no sessions: the client identifies itself on every request with
//! `x-user-id` (a UUID) and `x-user-email`. [`Authz`] turns those headers
//! into a [`SecurityContext`] or rejects the request before any handler code
//! (and therefore any storage access) runs.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::api::problem::{Problem, bad_request, current_trace_id, unauthorized};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// Identity of the user a request acts for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityContext {
    user_id: Uuid,
    email: String,
}

impl SecurityContext {
    #[must_use]
    pub fn new(user_id: Uuid, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }

    #[must_use]
    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Why identity headers were rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
enum IdentityError {
    Missing(&'static str),
    MalformedUserId(String),
}

fn header_value<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<&'a str, IdentityError> {
    let value = headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .unwrap_or_default();
    if value.is_empty() {
        return Err(IdentityError::Missing(name));
    }
    Ok(value)
}

fn resolve(headers: &HeaderMap) -> Result<SecurityContext, IdentityError> {
    let raw_id = header_value(headers, USER_ID_HEADER)?;
    let email = header_value(headers, USER_EMAIL_HEADER)?;
    let user_id =
        Uuid::parse_str(raw_id).map_err(|_| IdentityError::MalformedUserId(raw_id.to_owned()))?;
    Ok(SecurityContext::new(user_id, email))
}

/// Extractor yielding the caller's [`SecurityContext`].
///
/// Missing or empty headers answer 401; a user id that is not a UUID answers 400.
#[derive(Debug, Clone)]
pub struct Authz(pub SecurityContext);

impl<S> FromRequestParts<S> for Authz
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        resolve(&parts.headers).map(Authz).map_err(|err| {
            let problem = match err {
                IdentityError::Missing(header) => {
                    tracing::debug!(header, "request without identity");
                    unauthorized(format!("Missing {header} header")).with_code("UNAUTHENTICATED")
                }
                IdentityError::MalformedUserId(raw) => {
                    tracing::debug!(user_id = %raw, "malformed user id header");
                    bad_request(format!("Invalid {USER_ID_HEADER}: {raw}"))
                        .with_code("INVALID_USER_ID")
                }
            };
            problem
                .with_instance(parts.uri.path())
                .with_trace_id(current_trace_id())
        })
    }
}
