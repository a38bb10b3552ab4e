//! Middleware stack around the module router.

use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue, Method, Request, StatusCode};
use daybook_kit::bootstrap::{CorsConfig, ServerConfig};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Fresh UUID v4 for requests that arrive without `x-request-id`.
#[derive(Clone, Copy, Default)]
struct MakeReqId;

impl MakeRequestId for MakeReqId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

pub fn build_cors_layer(cfg: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new();

    if cfg.allowed_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS allows any origin; list explicit origins for production");
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cfg
            .allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();
        layer = layer.allow_origin(origins);
    }

    let methods: Vec<Method> = cfg
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    let headers: Vec<HeaderName> = cfg
        .allowed_headers
        .iter()
        .filter_map(|h| h.parse().ok())
        .collect();
    layer = layer.allow_methods(methods).allow_headers(headers);

    if let Some(secs) = cfg.max_age_secs {
        layer = layer.max_age(Duration::from_secs(secs));
    }
    layer
}

/// Layers are added innermost first; `SetRequestId` ends up outermost so
/// the trace span can already see the id.
pub fn apply_middleware(mut router: Router, cfg: &ServerConfig) -> Router {
    if cfg.cors.enabled {
        router = router.layer(build_cors_layer(&cfg.cors));
    }

    router = router
        .layer(RequestBodyLimitLayer::new(cfg.body_limit_bytes))
        .layer(DefaultBodyLimit::max(cfg.body_limit_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            Duration::from_secs(cfg.request_timeout_secs),
        ));

    router = router.layer(TraceLayer::new_for_http().make_span_with(
        |req: &Request<axum::body::Body>| {
            let request_id = req
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("n/a");
            tracing::info_span!(
                "http_request",
                method = %req.method(),
                uri = %req.uri().path(),
                request_id = %request_id,
            )
        },
    ));

    let header = HeaderName::from_static(REQUEST_ID_HEADER);
    router
        .layer(PropagateRequestIdLayer::new(header.clone()))
        .layer(SetRequestIdLayer::new(header, MakeReqId))
}
