//! Minimal OpenAPI document assembled from the routes a module declares.
//!
//! Schemas come from `utoipa::ToSchema`; every operation also documents
//! `400`/`500` Problem responses.

use std::collections::BTreeMap;

use utoipa::openapi::path::{OperationBuilder, ParameterBuilder, ParameterIn};
use utoipa::openapi::schema::{Object, Schema, Type};
use utoipa::openapi::{
    ComponentsBuilder, ContentBuilder, HttpMethod, InfoBuilder, OpenApi, OpenApiBuilder, PathItem,
    PathsBuilder, Ref, RefOr, Required, ResponseBuilder,
};
use utoipa::{PartialSchema, ToSchema};

use crate::api::problem::{Problem, APPLICATION_PROBLEM_JSON};

type SchemaCollection = Vec<(String, RefOr<Schema>)>;

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
    pub description: String,
}

/// A documented `GET` operation answering with one JSON schema.
#[derive(Debug, Clone)]
pub struct GetOperation {
    path: String,
    operation_id: String,
    summary: Option<String>,
    tag: Option<String>,
    params: Vec<ParamSpec>,
    response_schema: Option<String>,
}

impl GetOperation {
    pub fn new(path: impl Into<String>, operation_id: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            operation_id: operation_id.into(),
            summary: None,
            tag: None,
            params: Vec::new(),
            response_schema: None,
        }
    }

    pub fn summary(mut self, text: impl Into<String>) -> Self {
        self.summary = Some(text.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn path_param(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.params.push(ParamSpec {
            name: name.into(),
            location: ParamLocation::Path,
            required: true,
            description: description.into(),
        });
        self
    }

    pub fn query_param(
        mut self,
        name: impl Into<String>,
        required: bool,
        description: impl Into<String>,
    ) -> Self {
        self.params.push(ParamSpec {
            name: name.into(),
            location: ParamLocation::Query,
            required,
            description: description.into(),
        });
        self
    }

    /// Name of a schema previously returned by [`OpenApiDoc::ensure_schema`].
    pub fn json_response(mut self, schema_name: impl Into<String>) -> Self {
        self.response_schema = Some(schema_name.into());
        self
    }
}

#[derive(Clone)]
pub struct OpenApiDoc {
    title: String,
    version: String,
    operations: Vec<GetOperation>,
    schemas: BTreeMap<String, RefOr<Schema>>,
}

impl OpenApiDoc {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        let mut doc = Self {
            title: title.into(),
            version: version.into(),
            operations: Vec::new(),
            schemas: BTreeMap::new(),
        };
        doc.ensure_schema::<Problem>();
        doc
    }

    /// Register `T` and every schema it references; returns `T`'s component name.
    pub fn ensure_schema<T: ToSchema + 'static>(&mut self) -> String {
        let root_name = T::name().to_string();
        let mut collected: SchemaCollection =
            vec![(root_name.clone(), <T as PartialSchema>::schema())];
        T::schemas(&mut collected);

        for (name, schema) in collected {
            self.schemas.entry(name).or_insert(schema);
        }
        root_name
    }

    pub fn add(&mut self, op: GetOperation) -> &mut Self {
        tracing::debug!(path = %op.path, operation_id = %op.operation_id, "documented operation");
        self.operations.push(op);
        self
    }

    pub fn operation_ids(&self) -> impl Iterator<Item = &str> {
        self.operations.iter().map(|op| op.operation_id.as_str())
    }

    pub fn build(&self) -> OpenApi {
        let mut paths = PathsBuilder::new();
        for op in &self.operations {
            paths = paths.path(op.path.clone(), PathItem::new(HttpMethod::Get, build_operation(op)));
        }

        let mut components = ComponentsBuilder::new();
        for (name, schema) in &self.schemas {
            components = components.schema(name.clone(), schema.clone());
        }

        OpenApiBuilder::new()
            .info(InfoBuilder::new().title(self.title.clone()).version(self.version.clone()))
            .paths(paths)
            .components(Some(components.build()))
            .build()
    }
}

fn build_operation(op: &GetOperation) -> utoipa::openapi::path::Operation {
    let mut builder = OperationBuilder::new()
        .operation_id(Some(op.operation_id.clone()))
        .summary(op.summary.clone());
    if let Some(tag) = &op.tag {
        builder = builder.tag(tag.clone());
    }

    for param in &op.params {
        let location = match param.location {
            ParamLocation::Path => ParameterIn::Path,
            ParamLocation::Query => ParameterIn::Query,
        };
        let required = if param.required || param.location == ParamLocation::Path {
            Required::True
        } else {
            Required::False
        };
        builder = builder.parameter(
            ParameterBuilder::new()
                .name(param.name.clone())
                .parameter_in(location)
                .required(required)
                .description(Some(param.description.clone()))
                .schema(Some(Object::with_type(Type::String))),
        );
    }

    let ok = match &op.response_schema {
        Some(name) => ResponseBuilder::new().description("OK").content(
            "application/json",
            ContentBuilder::new()
                .schema(Some(Ref::from_schema_name(name.clone())))
                .build(),
        ),
        None => ResponseBuilder::new().description("OK"),
    };

    builder
        .response("200", ok.build())
        .response("400", problem_response("Bad Request"))
        .response("500", problem_response("Internal Server Error"))
        .build()
}

fn problem_response(description: &str) -> utoipa::openapi::Response {
    ResponseBuilder::new()
        .description(description)
        .content(
            APPLICATION_PROBLEM_JSON,
            ContentBuilder::new()
                .schema(Some(Ref::from_schema_name(Problem::name())))
                .build(),
        )
        .build()
}
