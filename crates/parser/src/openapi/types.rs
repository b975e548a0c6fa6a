//! OpenAPI 3.x / Swagger 2.0 document types
//!
//! Simplified representation covering what workflow generation reads:
//! paths, operations, parameters, request bodies and schemas. Maps keep
//! document order.

use indexmap::IndexMap;
use serde::de::{self, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};

/// OpenAPI document root
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenApiSpec {
    /// OpenAPI version (e.g., "3.0.3")
    #[serde(default)]
    pub openapi: Option<String>,

    /// Swagger version ("2.0")
    #[serde(default)]
    pub swagger: Option<String>,

    /// API metadata
    #[serde(default)]
    pub info: Option<Info>,

    /// API paths (endpoints); `x-` extension keys are dropped
    #[serde(default, deserialize_with = "deserialize_paths")]
    pub paths: Option<IndexMap<String, Option<PathItem>>>,

    /// Reusable components
    #[serde(default)]
    pub components: Option<Components>,

    /// Swagger 2.0 schema definitions
    #[serde(default)]
    pub definitions: IndexMap<String, SchemaOrBool>,

    /// Swagger 2.0 shared parameters
    #[serde(default)]
    pub parameters: IndexMap<String, Parameter>,
}

/// API information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub version: Option<String>,
}

/// Path item (operations for a path)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default)]
    pub get: Option<Operation>,

    #[serde(default)]
    pub put: Option<Operation>,

    #[serde(default)]
    pub post: Option<Operation>,

    #[serde(default)]
    pub delete: Option<Operation>,

    #[serde(default)]
    pub options: Option<Operation>,

    #[serde(default)]
    pub head: Option<Operation>,

    #[serde(default)]
    pub patch: Option<Operation>,

    #[serde(default)]
    pub trace: Option<Operation>,

    /// Parameters shared by every operation of the path
    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,
}

/// HTTP operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    /// Operation ID (unique identifier)
    #[serde(rename = "operationId")]
    #[serde(default)]
    pub operation_id: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,

    #[serde(rename = "requestBody")]
    #[serde(default)]
    pub request_body: Option<RequestBodyOrRef>,
}

/// Parameter or reference to a shared parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    Reference {
        #[serde(rename = "$ref")]
        ref_path: String,
    },

    Parameter(Box<Parameter>),
}

/// Parameter location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Location {
    Path,
    Query,
    Header,
    Cookie,
    FormData,
    /// Swagger 2.0 request body
    Body,
}

/// Parameter definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: Location,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub schema: Option<Schema>,

    /// Swagger 2.0 inline type of non-body parameters
    #[serde(rename = "type")]
    #[serde(default)]
    pub schema_type: Option<TypeDecl>,

    /// Swagger 2.0 inline items
    #[serde(default)]
    pub items: Option<Box<Schema>>,

    /// Swagger 2.0 inline enum
    #[serde(rename = "enum")]
    #[serde(default)]
    pub enum_values: Vec<serde_json::Value>,
}

/// Request body or reference to a shared one
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestBodyOrRef {
    Reference {
        #[serde(rename = "$ref")]
        ref_path: String,
    },

    RequestBody(RequestBody),
}

/// Request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub content: IndexMap<String, MediaType>,

    #[serde(default)]
    pub required: bool,
}

/// Media type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(default)]
    pub schema: Option<Schema>,
}

/// `type` is a single name, or a list of names in OpenAPI 3.1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeDecl {
    Single(String),
    Multiple(Vec<String>),
}

impl TypeDecl {
    /// First non-null type name
    pub fn primary(&self) -> Option<&str> {
        match self {
            TypeDecl::Single(name) => Some(name.as_str()),
            TypeDecl::Multiple(names) => names
                .iter()
                .map(String::as_str)
                .find(|name| *name != "null"),
        }
    }
}

/// `required` is a list of property names; some documents misuse it as a flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequiredDecl {
    Names(Vec<String>),
    Flag(bool),
}

impl Default for RequiredDecl {
    fn default() -> Self {
        RequiredDecl::Names(Vec::new())
    }
}

impl RequiredDecl {
    pub fn names(&self) -> &[String] {
        match self {
            RequiredDecl::Names(names) => names,
            RequiredDecl::Flag(_) => &[],
        }
    }
}

/// Schema definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    /// Reference
    #[serde(rename = "$ref")]
    #[serde(default)]
    pub ref_path: Option<String>,

    /// Type: string, number, integer, boolean, array, object
    #[serde(rename = "type")]
    #[serde(default)]
    pub schema_type: Option<TypeDecl>,

    #[serde(default)]
    pub description: Option<String>,

    /// Properties (for object type)
    #[serde(default)]
    pub properties: IndexMap<String, SchemaOrBool>,

    /// Required properties
    #[serde(default)]
    pub required: RequiredDecl,

    /// Items schema (for array type)
    #[serde(default)]
    pub items: Option<Box<SchemaOrBool>>,

    #[serde(rename = "oneOf")]
    #[serde(default)]
    pub one_of: Vec<SchemaOrBool>,

    #[serde(rename = "anyOf")]
    #[serde(default)]
    pub any_of: Vec<SchemaOrBool>,

    #[serde(rename = "allOf")]
    #[serde(default)]
    pub all_of: Vec<SchemaOrBool>,

    /// Enum values
    #[serde(rename = "enum")]
    #[serde(default)]
    pub enum_values: Vec<serde_json::Value>,
}

/// A schema, or an OpenAPI 3.1 boolean schema
///
/// `true` accepts any value, `false` accepts none.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrBool {
    Bool(bool),
    Schema(Box<Schema>),
}

impl From<Schema> for SchemaOrBool {
    fn from(schema: Schema) -> Self {
        SchemaOrBool::Schema(Box::new(schema))
    }
}

/// Reusable components
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: IndexMap<String, SchemaOrBool>,

    #[serde(default)]
    pub parameters: IndexMap<String, Parameter>,

    #[serde(rename = "requestBodies")]
    #[serde(default)]
    pub request_bodies: IndexMap<String, RequestBody>,
}

impl OpenApiSpec {
    /// Look up a shared parameter by reference path
    ///
    /// Accepts `#/components/parameters/Name` and Swagger 2.0 `#/parameters/Name`.
    pub fn resolve_parameter_ref(&self, ref_path: &str) -> Option<&Parameter> {
        if let Some(name) = ref_path.strip_prefix("#/components/parameters/") {
            return self
                .components
                .as_ref()
                .and_then(|c| c.parameters.get(&decode_pointer_segment(name)));
        }

        let name = ref_path.strip_prefix("#/parameters/")?;
        self.parameters.get(&decode_pointer_segment(name))
    }

    /// Look up a shared request body by reference path
    pub fn resolve_request_body_ref(&self, ref_path: &str) -> Option<&RequestBody> {
        let name = ref_path.strip_prefix("#/components/requestBodies/")?;
        self.components
            .as_ref()
            .and_then(|c| c.request_bodies.get(&decode_pointer_segment(name)))
    }

    /// API title, if declared
    pub fn title(&self) -> Option<&str> {
        self.info.as_ref().and_then(|info| info.title.as_deref())
    }
}

impl PathItem {
    /// Operation declared for `method`, if any
    pub fn operation(&self, method: swagger_actions_common::HttpMethod) -> Option<&Operation> {
        use swagger_actions_common::HttpMethod;

        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Trace => self.trace.as_ref(),
        }
    }
}

/// Entry under `paths`: a path item, or the value of an `x-` extension
#[derive(Deserialize)]
#[serde(untagged)]
enum PathEntry {
    Item(Option<PathItem>),
    Other(IgnoredAny),
}

fn deserialize_paths<'de, D>(
    deserializer: D,
) -> Result<Option<IndexMap<String, Option<PathItem>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(entries) = Option::<IndexMap<String, PathEntry>>::deserialize(deserializer)? else {
        return Ok(None);
    };

    let mut paths = IndexMap::with_capacity(entries.len());
    for (path, entry) in entries {
        if path.starts_with("x-") {
            continue;
        }
        match entry {
            PathEntry::Item(item) => {
                paths.insert(path, item);
            }
            PathEntry::Other(_) => {
                return Err(de::Error::custom(format!(
                    "paths.{}: expected a path item",
                    path
                )));
            }
        }
    }

    Ok(Some(paths))
}

fn decode_pointer_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}
