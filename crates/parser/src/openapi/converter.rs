//! Converts an OpenAPI spec into the ApiDefinition IR

use super::types::{
    Location, OpenApiSpec, Operation as SpecOperation, Parameter as SpecParameter,
    ParameterOrRef, PathItem, RequestBody, RequestBodyOrRef, Schema, SchemaOrBool,
};
use indexmap::{IndexMap, IndexSet};
use swagger_actions_common::{
    ApiDefinition, ComponentTable, DiagnosticKind, Diagnostics, GeneratorError, HttpMethod,
    Operation, Parameter, ParameterLocation, PathTemplate, Reported, Result, SchemaKind,
    SchemaNode,
};

/// Convert OpenAPI spec to ApiDefinition
pub fn convert_openapi_to_api_definition(spec: &OpenApiSpec) -> Result<Reported<ApiDefinition>> {
    let paths = spec.paths.as_ref().ok_or_else(|| {
        GeneratorError::Parse("No paths found in Swagger specification".to_string())
    })?;

    let mut diagnostics = Diagnostics::new();
    let mut operations = Vec::new();

    for (path, path_item) in paths {
        let Some(path_item) = path_item else {
            continue;
        };

        for method in HttpMethod::ALL {
            if let Some(op) = path_item.operation(method) {
                let mut op_diagnostics = Diagnostics::new();
                let operation =
                    convert_operation(spec, path, method, path_item, op, &mut op_diagnostics);
                diagnostics.absorb(op_diagnostics, &operation.operation_id);
                operations.push(operation);
            }
        }
    }

    Ok(Reported::new(
        ApiDefinition {
            title: spec.title().map(String::from),
            operations,
            components: build_component_table(spec),
        },
        diagnostics,
    ))
}

/// Collect named schemas from `components.schemas` and Swagger 2.0 `definitions`
fn build_component_table(spec: &OpenApiSpec) -> ComponentTable {
    let mut table = ComponentTable::new();

    if let Some(components) = &spec.components {
        for (name, schema) in &components.schemas {
            table.insert("schemas", name.clone(), convert_schema_or_bool(schema));
        }
    }

    for (name, schema) in &spec.definitions {
        table.insert("definitions", name.clone(), convert_schema_or_bool(schema));
    }

    table
}

fn convert_operation(
    spec: &OpenApiSpec,
    path: &str,
    method: HttpMethod,
    path_item: &PathItem,
    op: &SpecOperation,
    diagnostics: &mut Diagnostics,
) -> Operation {
    let operation_id = op
        .operation_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .unwrap_or_else(|| PathTemplate::new(path).synthesized_operation_id(method.as_str()));

    // Operation-level parameters override path-level ones with the same name and location
    let mut merged: IndexMap<(String, Location), &SpecParameter> = IndexMap::new();
    for param_or_ref in path_item.parameters.iter().chain(&op.parameters) {
        if let Some(param) = resolve_parameter(spec, param_or_ref, diagnostics) {
            merged.insert((param.name.clone(), param.location), param);
        }
    }

    let mut parameters = Vec::new();
    let mut body_schema = None;
    for param in merged.into_values() {
        match convert_location(param.location) {
            Some(location) => parameters.push(convert_parameter(param, location)),
            // Swagger 2.0 body parameter
            None => body_schema = param.schema.as_ref().map(convert_schema),
        }
    }

    let request_body = match &op.request_body {
        Some(body_or_ref) => resolve_request_body(spec, body_or_ref, diagnostics)
            .and_then(|body| request_body_schema(body, diagnostics)),
        None => body_schema,
    };

    Operation {
        operation_id,
        method,
        path: path.to_string(),
        parameters,
        request_body,
    }
}

fn resolve_parameter<'a>(
    spec: &'a OpenApiSpec,
    param_or_ref: &'a ParameterOrRef,
    diagnostics: &mut Diagnostics,
) -> Option<&'a SpecParameter> {
    match param_or_ref {
        ParameterOrRef::Parameter(param) => Some(param.as_ref()),
        ParameterOrRef::Reference { ref_path } => {
            let resolved = spec.resolve_parameter_ref(ref_path);
            if resolved.is_none() {
                diagnostics.push(DiagnosticKind::UnresolvedParameter {
                    reference: ref_path.clone(),
                });
            }
            resolved
        }
    }
}

fn resolve_request_body<'a>(
    spec: &'a OpenApiSpec,
    body_or_ref: &'a RequestBodyOrRef,
    diagnostics: &mut Diagnostics,
) -> Option<&'a RequestBody> {
    match body_or_ref {
        RequestBodyOrRef::RequestBody(body) => Some(body),
        RequestBodyOrRef::Reference { ref_path } => {
            let resolved = spec.resolve_request_body_ref(ref_path);
            if resolved.is_none() {
                diagnostics.push(DiagnosticKind::UnresolvedRequestBody {
                    reference: ref_path.clone(),
                });
            }
            resolved
        }
    }
}

/// Schema of the JSON content of a request body
///
/// Prefers `application/json`, then the first `+json` media type.
fn request_body_schema(body: &RequestBody, diagnostics: &mut Diagnostics) -> Option<SchemaNode> {
    let media_type = body.content.get("application/json").or_else(|| {
        body.content
            .iter()
            .find(|(name, _)| {
                let essence = name.split(';').next().unwrap_or(name).trim();
                essence == "application/json" || essence.ends_with("+json")
            })
            .map(|(_, media_type)| media_type)
    });

    match media_type {
        Some(media_type) => media_type.schema.as_ref().map(convert_schema),
        None => {
            diagnostics.push(DiagnosticKind::UnsupportedRequestBody {
                media_types: body.content.keys().cloned().collect(),
            });
            None
        }
    }
}

fn convert_location(location: Location) -> Option<ParameterLocation> {
    match location {
        Location::Path => Some(ParameterLocation::Path),
        Location::Query => Some(ParameterLocation::Query),
        Location::Header => Some(ParameterLocation::Header),
        Location::Cookie => Some(ParameterLocation::Cookie),
        Location::FormData => Some(ParameterLocation::FormData),
        Location::Body => None,
    }
}

fn convert_parameter(param: &SpecParameter, location: ParameterLocation) -> Parameter {
    // Swagger 2.0 declares the type of non-body parameters inline
    let schema = match (&param.schema, &param.schema_type) {
        (Some(schema), _) => Some(convert_schema(schema)),
        (None, Some(_)) => Some(convert_schema(&Schema {
            schema_type: param.schema_type.clone(),
            items: param.items.clone().map(|items| Box::new(SchemaOrBool::from(*items))),
            enum_values: param.enum_values.clone(),
            ..Schema::default()
        })),
        (None, None) => None,
    };

    Parameter {
        name: param.name.clone(),
        location,
        description: param.description.clone(),
        required: param.required,
        schema,
    }
}

/// Convert a schema into a SchemaNode
///
/// `$ref` wins over everything else; `oneOf`, `anyOf` and `allOf` become
/// unions (checked in that order); otherwise the declared type decides, with
/// untyped schemas inferred from `properties` / `items`.
pub(crate) fn convert_schema(schema: &Schema) -> SchemaNode {
    let kind = if let Some(target) = &schema.ref_path {
        SchemaKind::Reference {
            target: target.clone(),
        }
    } else if let Some(alternatives) = [&schema.one_of, &schema.any_of, &schema.all_of]
        .into_iter()
        .find(|alternatives| !alternatives.is_empty())
    {
        SchemaKind::Union {
            variants: alternatives.iter().map(convert_schema_or_bool).collect(),
        }
    } else {
        match schema.schema_type.as_ref().and_then(|decl| decl.primary()) {
            Some("string") => SchemaKind::String,
            Some("integer") => SchemaKind::Integer,
            Some("number") => SchemaKind::Number,
            Some("boolean") => SchemaKind::Boolean,
            Some("array") => array_kind(schema),
            Some("object") => object_kind(schema),
            Some(_) => SchemaKind::Unknown,
            None if !schema.properties.is_empty() => object_kind(schema),
            None if schema.items.is_some() => array_kind(schema),
            None => SchemaKind::Unknown,
        }
    };

    SchemaNode {
        kind,
        description: schema.description.clone(),
        enum_values: schema.enum_values.clone(),
    }
}

/// Convert a schema that may be an OpenAPI 3.1 boolean schema
///
/// `true` (anything) becomes `Unknown`, `false` (nothing) an empty object.
pub(crate) fn convert_schema_or_bool(schema: &SchemaOrBool) -> SchemaNode {
    match schema {
        SchemaOrBool::Bool(true) => SchemaNode::new(SchemaKind::Unknown),
        SchemaOrBool::Bool(false) => SchemaNode::empty_object(),
        SchemaOrBool::Schema(schema) => convert_schema(schema),
    }
}

fn array_kind(schema: &Schema) -> SchemaKind {
    let items = schema
        .items
        .as_deref()
        .map(convert_schema_or_bool)
        .unwrap_or_else(|| SchemaNode::new(SchemaKind::Unknown));

    SchemaKind::Array {
        items: Box::new(items),
    }
}

fn object_kind(schema: &Schema) -> SchemaKind {
    SchemaKind::Object {
        properties: schema
            .properties
            .iter()
            .map(|(name, property)| (name.clone(), convert_schema_or_bool(property)))
            .collect(),
        required: schema
            .required
            .names()
            .iter()
            .cloned()
            .collect::<IndexSet<_>>(),
    }
}
