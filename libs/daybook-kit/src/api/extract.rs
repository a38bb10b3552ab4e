//! Extractors whose rejections render as problem documents instead of plain text.

use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::problem::{Problem, bad_request, current_trace_id};

/// JSON body extractor. Malformed or mistyped bodies become 400 problems.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let path = req.uri().path().to_owned();
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(%path, error = %rejection.body_text(), "rejected request body");
                Err(bad_request(rejection.body_text())
                    .with_code("INVALID_BODY")
                    .with_instance(path)
                    .with_trace_id(current_trace_id()))
            }
        }
    }
}

/// Query string extractor with problem rejections.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(bad_request(rejection.body_text())
                .with_code("INVALID_QUERY")
                .with_instance(parts.uri.path())
                .with_trace_id(current_trace_id())),
        }
    }
}
