//! Collects operations and schema components while routes are registered,
//! then renders a single OpenAPI document.

use std::collections::BTreeMap;

use axum::http::Method;
use utoipa::openapi::{
    OpenApi, OpenApiBuilder, Ref, RefOr, Required,
    content::ContentBuilder,
    info::InfoBuilder,
    path::{
        HttpMethod, Operation, OperationBuilder as UOperationBuilder, ParameterBuilder,
        ParameterIn, PathItemBuilder, PathsBuilder,
    },
    request_body::RequestBodyBuilder,
    response::{ResponseBuilder, ResponsesBuilder},
    schema::{
        ArrayBuilder, ComponentsBuilder, ObjectBuilder, OneOfBuilder, Schema, SchemaFormat,
        SchemaType, Type,
    },
    security::{ApiKey, ApiKeyValue, SecurityRequirement, SecurityScheme},
};

use super::operation_builder::{OperationSpec, ParamLocation, ResponseSchema};
use crate::security::{USER_EMAIL_HEADER, USER_ID_HEADER};

type SchemaCollection = Vec<(String, RefOr<Schema>)>;

/// Document metadata.
#[derive(Debug, Clone)]
pub struct OpenApiInfo {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
}

impl Default for OpenApiInfo {
    fn default() -> Self {
        Self {
            title: "Daybook API".to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            description: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct OpenApiRegistry {
    operations: Vec<OperationSpec>,
    components: BTreeMap<String, RefOr<Schema>>,
}

/// Register `T` and every schema it references; returns the component name.
pub fn ensure_schema<T>(registry: &mut OpenApiRegistry) -> String
where
    T: utoipa::ToSchema + 'static,
{
    use utoipa::PartialSchema;

    let root_name = T::name().to_string();
    let mut collected: SchemaCollection = vec![(root_name.clone(), <T as PartialSchema>::schema())];
    T::schemas(&mut collected);
    registry.ensure_schema_raw(&root_name, collected)
}

impl OpenApiRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_operation(&mut self, spec: OperationSpec) {
        tracing::debug!(
            method = %spec.method,
            path = %spec.path,
            operation_id = spec.operation_id.as_deref().unwrap_or("-"),
            "registered API operation"
        );
        self.operations.push(spec);
    }

    pub fn ensure_schema_raw(&mut self, root_name: &str, schemas: SchemaCollection) -> String {
        for (name, schema) in schemas {
            self.components.entry(name).or_insert(schema);
        }
        root_name.to_owned()
    }

    #[must_use]
    pub fn operations(&self) -> &[OperationSpec] {
        &self.operations
    }

    #[must_use]
    pub fn has_schema(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Render the collected operations as an OpenAPI document.
    #[must_use]
    pub fn build_openapi(&self, info: &OpenApiInfo) -> OpenApi {
        tracing::info!(
            operations = self.operations.len(),
            schemas = self.components.len(),
            "building OpenAPI document"
        );

        let mut by_path: BTreeMap<&str, Vec<(HttpMethod, Operation)>> = BTreeMap::new();
        for spec in &self.operations {
            by_path
                .entry(spec.path.as_str())
                .or_default()
                .push((http_method(&spec.method), build_operation(spec)));
        }

        let mut paths = PathsBuilder::new();
        for (path, ops) in by_path {
            let mut item = PathItemBuilder::new();
            for (method, op) in ops {
                item = item.operation(method, op);
            }
            paths = paths.path(path, item.build());
        }

        let mut components = ComponentsBuilder::new();
        for (name, schema) in &self.components {
            components = components.schema(name.clone(), schema.clone());
        }
        components = components
            .security_scheme(
                "userId",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(USER_ID_HEADER))),
            )
            .security_scheme(
                "userEmail",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(USER_EMAIL_HEADER))),
            );

        let info = InfoBuilder::new()
            .title(&info.title)
            .version(&info.version)
            .description(info.description.clone())
            .build();

        OpenApiBuilder::new()
            .info(info)
            .paths(paths.build())
            .components(Some(components.build()))
            .build()
    }
}

fn http_method(method: &Method) -> HttpMethod {
    match *method {
        Method::POST => HttpMethod::Post,
        Method::PUT => HttpMethod::Put,
        Method::PATCH => HttpMethod::Patch,
        Method::DELETE => HttpMethod::Delete,
        _ => HttpMethod::Get,
    }
}

fn component_ref(name: &str) -> RefOr<Schema> {
    RefOr::Ref(Ref::from_schema_name(name))
}

fn typed(t: Type) -> RefOr<Schema> {
    RefOr::T(Schema::Object(
        ObjectBuilder::new().schema_type(SchemaType::Type(t)).build(),
    ))
}

fn envelope(data: RefOr<Schema>) -> Schema {
    Schema::Object(
        ObjectBuilder::new()
            .property("success", typed(Type::Boolean))
            .required("success")
            .property("data", data)
            .required("data")
            .build(),
    )
}

fn response_schema(schema: &ResponseSchema) -> Option<RefOr<Schema>> {
    match schema {
        ResponseSchema::Empty => None,
        ResponseSchema::Ref(name) => Some(component_ref(name)),
        ResponseSchema::Enveloped(name) => Some(RefOr::T(envelope(component_ref(name)))),
        ResponseSchema::EnvelopedList(name) => Some(RefOr::T(envelope(RefOr::T(
            Schema::Array(ArrayBuilder::new().items(component_ref(name)).build()),
        )))),
        ResponseSchema::EnvelopedNullable(name) => Some(RefOr::T(envelope(RefOr::T(
            Schema::OneOf(
                OneOfBuilder::new()
                    .item(component_ref(name))
                    .item(typed(Type::Null))
                    .build(),
            ),
        )))),
    }
}

fn build_operation(spec: &OperationSpec) -> Operation {
    let mut op = UOperationBuilder::new()
        .operation_id(spec.operation_id.clone())
        .summary(spec.summary.clone())
        .description(spec.description.clone());

    for tag in &spec.tags {
        op = op.tag(tag.clone());
    }

    for p in &spec.params {
        let schema_type = match p.param_type {
            "integer" => Type::Integer,
            "number" => Type::Number,
            "boolean" => Type::Boolean,
            _ => Type::String,
        };
        let mut schema = ObjectBuilder::new().schema_type(SchemaType::Type(schema_type));
        if let Some(format) = p.format {
            schema = schema.format(Some(SchemaFormat::Custom(format.to_owned())));
        }
        let (location, required) = match p.location {
            ParamLocation::Path => (ParameterIn::Path, Required::True),
            ParamLocation::Query if p.required => (ParameterIn::Query, Required::True),
            ParamLocation::Query => (ParameterIn::Query, Required::False),
        };
        op = op.parameter(
            ParameterBuilder::new()
                .name(&p.name)
                .parameter_in(location)
                .required(required)
                .description(p.description.clone())
                .schema(Some(Schema::Object(schema.build())))
                .build(),
        );
    }

    if let Some(body) = &spec.request_body {
        let content = ContentBuilder::new()
            .schema(Some(component_ref(&body.schema_name)))
            .build();
        op = op.request_body(Some(
            RequestBodyBuilder::new()
                .description(body.description.clone())
                .content("application/json", content)
                .required(Some(Required::True))
                .build(),
        ));
    }

    let mut responses = ResponsesBuilder::new();
    for r in &spec.responses {
        let mut resp = ResponseBuilder::new().description(&r.description);
        if let Some(schema) = response_schema(&r.schema) {
            resp = resp.content(r.content_type, ContentBuilder::new().schema(Some(schema)).build());
        }
        responses = responses.response(r.status.to_string(), resp.build());
    }
    op = op.responses(responses.build());

    if spec.authenticated {
        op = op.security(
            SecurityRequirement::new("userId", Vec::<String>::new())
                .add("userEmail", Vec::<String>::new()),
        );
    }

    op.build()
}
