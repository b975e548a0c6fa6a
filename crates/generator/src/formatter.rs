//! Post-processing of rendered documents

use swagger_actions_common::{GeneratorError, Result};

/// Normalizes a rendered document before it is written
#[cfg_attr(test, mockall::automock)]
pub trait DocumentFormatter {
    /// Format the document that will be written as `name`
    fn format(&self, name: &str, document: &str) -> Result<String>;
}

/// Tidies whitespace and checks the document is valid YAML
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFormatter;

impl DocumentFormatter for YamlFormatter {
    fn format(&self, name: &str, document: &str) -> Result<String> {
        let mut formatted = String::with_capacity(document.len());
        let mut blank_run = false;

        for line in document.lines().map(str::trim_end) {
            if line.is_empty() {
                blank_run = true;
                continue;
            }
            if blank_run && !formatted.is_empty() {
                formatted.push('\n');
            }
            blank_run = false;
            formatted.push_str(line);
            formatted.push('\n');
        }

        serde_yaml::from_str::<serde_yaml::Value>(&formatted).map_err(|e| {
            GeneratorError::Generation(format!("{} is not valid YAML: {}", name, e))
        })?;

        Ok(formatted)
    }
}
