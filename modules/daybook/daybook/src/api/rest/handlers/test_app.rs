//! Router over in-memory storage for handler tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use daybook_kit::SecurityContext;
use daybook_kit::api::OpenApiRegistry;
use daybook_kit::security::{USER_EMAIL_HEADER, USER_ID_HEADER};
use serde_json::Value;
use tower::ServiceExt as _;

use crate::api::rest::routes::register_routes;
use crate::domain::ports::NutritionProvider;
use crate::domain::service::test_support::{InMemoryStore, ctx};

pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    pub caller: SecurityContext,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::build(None)
    }

    pub fn with_nutrition(provider: Arc<dyn NutritionProvider>) -> Self {
        Self::build(Some(provider))
    }

    fn build(nutrition: Option<Arc<dyn NutritionProvider>>) -> Self {
        let store = InMemoryStore::shared();
        let caller = ctx();
        store.insert_user(caller.user_id(), caller.email());
        let mut registry = OpenApiRegistry::new();
        let router = register_routes(Router::new(), &mut registry, store.services_with(nutrition));
        Self {
            store,
            caller,
            router,
        }
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(USER_ID_HEADER, self.caller.user_id().to_string())
            .header(USER_EMAIL_HEADER, self.caller.email())
    }

    pub async fn send(&self, req: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(req).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(self.request("GET", uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str) -> Response<Body> {
        self.send(self.request("DELETE", uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn anonymous_get(&self, uri: &str) -> Response<Body> {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> Response<Body> {
        self.send_json("POST", uri, &body).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> Response<Body> {
        self.send_json("PUT", uri, &body).await
    }

    async fn send_json(&self, method: &str, uri: &str, body: &Value) -> Response<Body> {
        let req = self
            .request(method, uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(req).await
    }
}

pub async fn body_json(resp: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
