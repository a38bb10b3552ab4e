//! Route registration that keeps the axum router and the OpenAPI document in sync.
//!
//! An operation cannot be registered until a handler is attached; the
//! handler state is tracked in the builder's type.

use std::marker::PhantomData;

use axum::Router;
use axum::handler::Handler;
use axum::http::{Method, StatusCode};
use axum::routing::{MethodRouter, delete, get, patch, post, put};
use utoipa::ToSchema;

use super::openapi_registry::{OpenApiRegistry, ensure_schema};
use super::problem::{APPLICATION_PROBLEM_JSON, Problem};

/// Type-state markers.
pub mod state {
    /// No handler attached yet.
    #[derive(Debug, Clone, Copy)]
    pub struct Missing;
    /// Handler attached; the operation can be registered.
    #[derive(Debug, Clone, Copy)]
    pub struct Present;
}

pub use state::{Missing, Present};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    Path,
    Query,
}

#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: String,
    pub location: ParamLocation,
    pub required: bool,
    pub description: Option<String>,
    /// `string`, `integer`, `number` or `boolean`.
    pub param_type: &'static str,
    /// Optional format hint, e.g. `date` or `uuid`.
    pub format: Option<&'static str>,
}

/// How a response body is described in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseSchema {
    Empty,
    /// The component itself.
    Ref(String),
    /// `{success, data: <component>}`
    Enveloped(String),
    /// `{success, data: [<component>]}`
    EnvelopedList(String),
    /// `{success, data: <component> | null}`
    EnvelopedNullable(String),
}

#[derive(Debug, Clone)]
pub struct ResponseSpec {
    pub status: u16,
    pub content_type: &'static str,
    pub description: String,
    pub schema: ResponseSchema,
}

#[derive(Debug, Clone)]
pub struct RequestBodySpec {
    pub schema_name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OperationSpec {
    pub method: Method,
    pub path: String,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub params: Vec<ParamSpec>,
    pub request_body: Option<RequestBodySpec>,
    pub responses: Vec<ResponseSpec>,
    /// Requires the identity headers.
    pub authenticated: bool,
}

/// Builder for one HTTP operation.
#[must_use]
pub struct OperationBuilder<H = Missing, S = ()> {
    spec: OperationSpec,
    method_router: Option<MethodRouter<S>>,
    _handler: PhantomData<H>,
}

impl<S> OperationBuilder<Missing, S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            spec: OperationSpec {
                method,
                path: path.into(),
                operation_id: None,
                summary: None,
                description: None,
                tags: Vec::new(),
                params: Vec::new(),
                request_body: None,
                responses: Vec::new(),
                authenticated: false,
            },
            method_router: None,
            _handler: PhantomData,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach the axum handler for this operation.
    pub fn handler<F, T>(self, handler: F) -> OperationBuilder<Present, S>
    where
        F: Handler<T, S>,
        T: 'static,
    {
        let method_router = match self.spec.method {
            Method::POST => post(handler),
            Method::PUT => put(handler),
            Method::PATCH => patch(handler),
            Method::DELETE => delete(handler),
            _ => get(handler),
        };
        OperationBuilder {
            spec: self.spec,
            method_router: Some(method_router),
            _handler: PhantomData,
        }
    }
}

impl<H, S> OperationBuilder<H, S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn operation_id(mut self, id: impl Into<String>) -> Self {
        self.spec.operation_id = Some(id.into());
        self
    }

    pub fn summary(mut self, text: impl Into<String>) -> Self {
        self.spec.summary = Some(text.into());
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.spec.description = Some(text.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.spec.tags.push(tag.into());
        self
    }

    /// Mark the operation as requiring `x-user-id` / `x-user-email`.
    pub fn authenticated(mut self) -> Self {
        self.spec.authenticated = true;
        self
    }

    pub fn path_param(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.spec.params.push(ParamSpec {
            name: name.into(),
            location: ParamLocation::Path,
            required: true,
            description: Some(description.into()),
            param_type: "string",
            format: Some("uuid"),
        });
        self
    }

    pub fn query_param(
        mut self,
        name: impl Into<String>,
        required: bool,
        description: impl Into<String>,
    ) -> Self {
        self.spec.params.push(ParamSpec {
            name: name.into(),
            location: ParamLocation::Query,
            required,
            description: Some(description.into()),
            param_type: "string",
            format: None,
        });
        self
    }

    /// Optional `?date=YYYY-MM-DD` selecting the caller's calendar day.
    pub fn day_param(mut self) -> Self {
        self.spec.params.push(ParamSpec {
            name: "date".to_owned(),
            location: ParamLocation::Query,
            required: false,
            description: Some("Caller's calendar day (YYYY-MM-DD); defaults to the server's local day".to_owned()),
            param_type: "string",
            format: Some("date"),
        });
        self
    }

    pub fn json_request<T>(mut self, registry: &mut OpenApiRegistry, description: impl Into<String>) -> Self
    where
        T: ToSchema + 'static,
    {
        let schema_name = ensure_schema::<T>(registry);
        self.spec.request_body = Some(RequestBodySpec {
            schema_name,
            description: Some(description.into()),
        });
        self
    }

    fn push_response(mut self, status: StatusCode, content_type: &'static str, description: impl Into<String>, schema: ResponseSchema) -> Self {
        self.spec.responses.push(ResponseSpec {
            status: status.as_u16(),
            content_type,
            description: description.into(),
            schema,
        });
        self
    }

    /// Response whose body is `T` itself.
    pub fn json_response<T>(self, registry: &mut OpenApiRegistry, status: StatusCode, description: impl Into<String>) -> Self
    where
        T: ToSchema + 'static,
    {
        let name = ensure_schema::<T>(registry);
        self.push_response(status, "application/json", description, ResponseSchema::Ref(name))
    }

    /// Response whose body is `{success, data: T}`.
    pub fn enveloped_response<T>(self, registry: &mut OpenApiRegistry, status: StatusCode, description: impl Into<String>) -> Self
    where
        T: ToSchema + 'static,
    {
        let name = ensure_schema::<T>(registry);
        self.push_response(status, "application/json", description, ResponseSchema::Enveloped(name))
    }

    pub fn enveloped_list_response<T>(self, registry: &mut OpenApiRegistry, status: StatusCode, description: impl Into<String>) -> Self
    where
        T: ToSchema + 'static,
    {
        let name = ensure_schema::<T>(registry);
        self.push_response(status, "application/json", description, ResponseSchema::EnvelopedList(name))
    }

    pub fn enveloped_nullable_response<T>(self, registry: &mut OpenApiRegistry, status: StatusCode, description: impl Into<String>) -> Self
    where
        T: ToSchema + 'static,
    {
        let name = ensure_schema::<T>(registry);
        self.push_response(status, "application/json", description, ResponseSchema::EnvelopedNullable(name))
    }

    pub fn empty_response(self, status: StatusCode, description: impl Into<String>) -> Self {
        self.push_response(status, "application/json", description, ResponseSchema::Empty)
    }

    pub fn problem_response(self, registry: &mut OpenApiRegistry, status: StatusCode, description: impl Into<String>) -> Self {
        let name = ensure_schema::<Problem>(registry);
        self.push_response(status, APPLICATION_PROBLEM_JSON, description, ResponseSchema::Ref(name))
    }

    pub fn error_400(self, registry: &mut OpenApiRegistry) -> Self {
        self.problem_response(registry, StatusCode::BAD_REQUEST, "Bad Request")
    }

    pub fn error_401(self, registry: &mut OpenApiRegistry) -> Self {
        self.problem_response(registry, StatusCode::UNAUTHORIZED, "Missing caller identity")
    }

    pub fn error_404(self, registry: &mut OpenApiRegistry) -> Self {
        self.problem_response(registry, StatusCode::NOT_FOUND, "Not Found")
    }

    pub fn error_409(self, registry: &mut OpenApiRegistry) -> Self {
        self.problem_response(registry, StatusCode::CONFLICT, "Conflict")
    }

    pub fn error_500(self, registry: &mut OpenApiRegistry) -> Self {
        self.problem_response(registry, StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }

    pub fn spec(&self) -> &OperationSpec {
        &self.spec
    }
}

impl<S> OperationBuilder<Present, S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Add the route to `router` and record the operation in `registry`.
    pub fn register(self, router: Router<S>, registry: &mut OpenApiRegistry) -> Router<S> {
        let Self {
            spec,
            method_router,
            ..
        } = self;
        let path = spec.path.clone();
        registry.register_operation(spec);
        match method_router {
            Some(mr) => router.route(&path, mr),
            None => router,
        }
    }
}
