//! Schema intermediate representation
//!
//! OpenAPI schema fragments are converted once into [`SchemaNode`] trees whose
//! shape is a closed [`SchemaKind`] enum, so every consumer matches over known
//! shapes instead of probing optional fields.

use crate::diagnostics::ResolveError;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// A schema fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    /// Shape of the fragment
    pub kind: SchemaKind,

    /// Human readable description
    #[serde(default)]
    pub description: Option<String>,

    /// Allowed literal values (`enum`)
    #[serde(default)]
    pub enum_values: Vec<serde_json::Value>,
}

/// Shape of a schema fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SchemaKind {
    String,
    Integer,
    Number,
    Boolean,
    Array {
        items: Box<SchemaNode>,
    },
    Object {
        properties: IndexMap<String, SchemaNode>,
        required: IndexSet<String>,
    },
    /// `oneOf` / `anyOf` / `allOf` alternatives
    Union {
        variants: Vec<SchemaNode>,
    },
    /// `$ref` to a component, e.g. `#/components/schemas/User`
    Reference {
        target: String,
    },
    Unknown,
}

impl SchemaKind {
    /// Name of the shape as used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            SchemaKind::String => "string",
            SchemaKind::Integer => "integer",
            SchemaKind::Number => "number",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Array { .. } => "array",
            SchemaKind::Object { .. } => "object",
            SchemaKind::Union { .. } => "union",
            SchemaKind::Reference { .. } => "reference",
            SchemaKind::Unknown => "unknown",
        }
    }
}

impl SchemaNode {
    /// Create a node of the given kind with no description or enum values
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            description: None,
            enum_values: Vec::new(),
        }
    }

    /// Object schema without properties, used wherever resolution degrades
    pub fn empty_object() -> Self {
        Self::object(IndexMap::new(), IndexSet::new())
    }

    pub fn object(properties: IndexMap<String, SchemaNode>, required: IndexSet<String>) -> Self {
        Self::new(SchemaKind::Object {
            properties,
            required,
        })
    }

    pub fn array(items: SchemaNode) -> Self {
        Self::new(SchemaKind::Array {
            items: Box::new(items),
        })
    }

    pub fn union(variants: Vec<SchemaNode>) -> Self {
        Self::new(SchemaKind::Union { variants })
    }

    pub fn reference(target: impl Into<String>) -> Self {
        Self::new(SchemaKind::Reference {
            target: target.into(),
        })
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the allowed values
    pub fn with_enum_values(mut self, values: Vec<serde_json::Value>) -> Self {
        self.enum_values = values;
        self
    }

    /// Description if present and not blank
    pub fn description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// Whether this is an object that declares at least one property
    pub fn has_properties(&self) -> bool {
        matches!(&self.kind, SchemaKind::Object { properties, .. } if !properties.is_empty())
    }
}

/// Named schemas addressable by reference paths
///
/// Sections hold schemas by name: `schemas` (OpenAPI 3 `components.schemas`)
/// and `definitions` (Swagger 2.0). A reference is walked segment by segment,
/// so paths may also point inside a schema
/// (`#/components/schemas/User/properties/address`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentTable {
    sections: IndexMap<String, IndexMap<String, SchemaNode>>,
}

impl ComponentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema under `section/name`
    pub fn insert(&mut self, section: &str, name: impl Into<String>, schema: SchemaNode) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(name.into(), schema);
    }

    /// Number of schemas across all sections
    pub fn len(&self) -> usize {
        self.sections.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up the node a reference path points to
    pub fn lookup(&self, reference: &str) -> Result<&SchemaNode, ResolveError> {
        let pointer = reference
            .strip_prefix("#/")
            .ok_or_else(|| ResolveError::External {
                reference: reference.to_string(),
            })?;

        let unresolved = |segment: &str| ResolveError::Unresolved {
            reference: reference.to_string(),
            segment: segment.to_string(),
        };
        let incomplete = || ResolveError::Incomplete {
            reference: reference.to_string(),
        };

        let mut segments = pointer.split('/').map(decode_pointer_segment);

        let mut section_name = segments.next().ok_or_else(incomplete)?;
        if section_name == "components" {
            section_name = segments.next().ok_or_else(incomplete)?;
        }
        let section = self
            .sections
            .get(&section_name)
            .ok_or_else(|| unresolved(&section_name))?;

        let name = segments.next().ok_or_else(incomplete)?;
        let mut node = section.get(&name).ok_or_else(|| unresolved(&name))?;

        while let Some(segment) = segments.next() {
            let next = match (segment.as_str(), &node.kind) {
                ("properties", SchemaKind::Object { properties, .. }) => {
                    let key = segments.next().ok_or_else(incomplete)?;
                    properties.get(&key).ok_or_else(|| unresolved(&key))?
                }
                ("items", SchemaKind::Array { items }) => items.as_ref(),
                ("oneOf" | "anyOf" | "allOf", SchemaKind::Union { variants }) => {
                    let index = segments.next().ok_or_else(incomplete)?;
                    index
                        .parse::<usize>()
                        .ok()
                        .and_then(|i| variants.get(i))
                        .ok_or_else(|| unresolved(&index))?
                }
                _ => return Err(unresolved(&segment)),
            };
            node = next;
        }

        Ok(node)
    }
}

/// Decode a JSON Pointer segment (`~1` is `/`, `~0` is `~`)
fn decode_pointer_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}
