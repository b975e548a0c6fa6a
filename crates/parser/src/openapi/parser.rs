//! OpenAPI spec file parser

use super::types::OpenApiSpec;
use swagger_actions_common::{ApiDefinition, GeneratorError, Reported, Result};
use std::fs;
use std::path::Path;

/// OpenAPI specification parser
///
/// Reads OpenAPI 3.x and Swagger 2.0 documents written in YAML or JSON.
pub struct OpenApiParser {
    /// Loaded OpenAPI spec
    spec: OpenApiSpec,
}

impl OpenApiParser {
    /// Load an OpenAPI spec from a file path
    ///
    /// Files ending in `.json` are read as JSON, everything else as YAML.
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = OpenApiParser::from_file("swagger.yaml")?;
    /// let api = parser.parse()?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::Parse(format!(
                "Failed to read OpenAPI file {}: {}",
                path.display(),
                e
            ))
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Parse an OpenAPI spec from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: OpenApiSpec = serde_json::from_str(json)
            .map_err(|e| GeneratorError::Parse(format!("Failed to parse OpenAPI JSON: {}", e)))?;

        Ok(Self { spec })
    }

    /// Parse an OpenAPI spec from a YAML (or JSON) string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document is a document without paths, reported by `parse`
        if yaml.trim().is_empty() {
            return Ok(Self {
                spec: OpenApiSpec::default(),
            });
        }

        let spec: OpenApiSpec = serde_yaml::from_str(yaml)
            .map_err(|e| GeneratorError::Parse(format!("Failed to parse OpenAPI YAML: {}", e)))?;

        Ok(Self { spec })
    }

    /// Convert the spec into operations and a component table
    pub fn parse(&self) -> Result<Reported<ApiDefinition>> {
        super::converter::convert_openapi_to_api_definition(&self.spec)
    }

    /// Get reference to the underlying OpenAPI spec
    pub fn spec(&self) -> &OpenApiSpec {
        &self.spec
    }
}
