//! Type mapping from schema shapes to workflow input types
//!
//! workflow_dispatch inputs only know `string`, `number` and `boolean`.
//! Structured values (arrays, objects, unions) are passed as JSON text and
//! decoded by whatever consumes the request body.

use swagger_actions_common::{PrimitiveType, SchemaKind, SchemaNode};

/// Maps schema shapes to `PrimitiveType`, and builds input descriptions
pub struct TypeMapper;

impl TypeMapper {
    /// Narrow a schema shape to an input type
    ///
    /// # Examples
    /// ```
    /// use swagger_actions_parser::TypeMapper;
    /// use swagger_actions_common::{PrimitiveType, SchemaKind};
    ///
    /// assert_eq!(TypeMapper::narrow(&SchemaKind::Integer), PrimitiveType::Number);
    /// assert_eq!(TypeMapper::narrow(&SchemaKind::Boolean), PrimitiveType::Boolean);
    /// assert_eq!(TypeMapper::narrow(&SchemaKind::Unknown), PrimitiveType::String);
    /// ```
    pub fn narrow(kind: &SchemaKind) -> PrimitiveType {
        match kind {
            SchemaKind::String => PrimitiveType::String,
            SchemaKind::Integer | SchemaKind::Number => PrimitiveType::Number,
            SchemaKind::Boolean => PrimitiveType::Boolean,
            // Passed through as serialized JSON
            SchemaKind::Array { .. }
            | SchemaKind::Object { .. }
            | SchemaKind::Union { .. }
            | SchemaKind::Reference { .. }
            | SchemaKind::Unknown => PrimitiveType::String,
        }
    }

    /// Description for an input
    ///
    /// Uses `explicit` when it is not blank, the input name otherwise, and
    /// appends the allowed values of `schema` in parentheses.
    pub fn describe(name: &str, explicit: Option<&str>, schema: &SchemaNode) -> String {
        let base = explicit
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(name);

        if schema.enum_values.is_empty() {
            return base.to_string();
        }

        let values: Vec<String> = schema
            .enum_values
            .iter()
            .map(|value| match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect();

        format!("{} ({})", base, values.join(", "))
    }
}
