//! Workflow generation settings
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```yaml
//! runner: self-hosted
//! token_secret: PETSTORE_TOKEN
//! ```

use crate::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for rendering and writing workflows
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkflowConfig {
    /// Directory workflows are written to
    pub output_dir: PathBuf,
    /// File extension of generated workflows
    pub extension: String,
    /// `runs-on` label of the job
    pub runner: String,
    /// Action performing the HTTP request
    pub http_action: String,
    /// Secret holding the API base URL
    pub base_url_secret: String,
    /// Secret holding the bearer token
    pub token_secret: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(".github").join("workflows"),
            extension: "yml".to_string(),
            runner: "ubuntu-latest".to_string(),
            http_action: "fjogeleit/http-request-action@v1".to_string(),
            base_url_secret: "API_BASE_URL".to_string(),
            token_secret: "API_TOKEN".to_string(),
        }
    }
}

impl WorkflowConfig {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            GeneratorError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse settings from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(yaml)
            .map_err(|e| GeneratorError::Config(format!("Invalid config: {}", e)))
    }

    /// File name for a workflow named `name`
    pub fn file_name(&self, name: &str) -> String {
        format!("{}.{}", name, self.extension)
    }
}
