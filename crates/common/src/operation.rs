//! Operations and the workflow definitions derived from them

use crate::schema::{ComponentTable, SchemaNode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP method of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    /// All methods in the order operations are emitted for a path
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
        HttpMethod::Trace,
    ];

    /// Lowercase name as written in OpenAPI path items
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Where a parameter is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
    /// Swagger 2.0 form fields
    FormData,
}

/// Operation parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub location: ParameterLocation,
    pub description: Option<String>,
    pub required: bool,
    pub schema: Option<SchemaNode>,
}

/// A single HTTP operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Declared `operationId`, or synthesized from method and path
    pub operation_id: String,
    pub method: HttpMethod,
    /// Path template, e.g. `/widgets/{id}`
    pub path: String,
    pub parameters: Vec<Parameter>,
    /// Schema of the JSON request body
    pub request_body: Option<SchemaNode>,
}

/// A parsed API: its operations and the schemas they reference
#[derive(Debug, Clone, Default)]
pub struct ApiDefinition {
    pub title: Option<String>,
    pub operations: Vec<Operation>,
    pub components: ComponentTable,
}

/// Type of a workflow_dispatch input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    String,
    Number,
    Boolean,
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveType::String => write!(f, "string"),
            PrimitiveType::Number => write!(f, "number"),
            PrimitiveType::Boolean => write!(f, "boolean"),
        }
    }
}

/// One flattened workflow input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDescriptor {
    pub name: String,
    pub description: String,
    pub required: bool,
    pub primitive_type: PrimitiveType,
}

/// Everything needed to render one workflow document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    /// Workflow name and file stem
    pub name: String,
    pub method: HttpMethod,
    pub path: String,
    pub inputs: Vec<InputDescriptor>,
}

impl WorkflowDefinition {
    pub fn input(&self, name: &str) -> Option<&InputDescriptor> {
        self.inputs.iter().find(|input| input.name == name)
    }
}
