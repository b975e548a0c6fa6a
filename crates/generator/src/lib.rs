//! Workflow rendering for swagger-actions
//!
//! This crate turns `WorkflowDefinition`s into GitHub Actions workflow files:
//! one `workflow_dispatch` workflow per operation that calls the API with
//! the trigger inputs as its JSON body.

mod formatter;
mod sink;
mod templates;

pub use formatter::{DocumentFormatter, YamlFormatter};
pub use sink::{DirectorySink, DocumentSink};
pub use templates::{yaml_key, yaml_quote};

use std::path::{Path, PathBuf};
use swagger_actions_common::{
    GeneratorError, PathTemplate, Result, WorkflowConfig, WorkflowDefinition,
};
use tera::Tera;

/// Workflow generator
///
/// Renders each workflow with the `workflow.yml` template, passes it through
/// the formatter and hands it to a sink.
pub struct WorkflowGenerator {
    config: WorkflowConfig,
    tera: Tera,
    formatter: Box<dyn DocumentFormatter>,
}

impl WorkflowGenerator {
    /// Create a generator that formats with [`YamlFormatter`]
    pub fn new(config: WorkflowConfig) -> Result<Self> {
        let tera = templates::load_templates()?;
        Ok(Self {
            config,
            tera,
            formatter: Box::new(YamlFormatter),
        })
    }

    /// Replace the formatter
    pub fn with_formatter<F: DocumentFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// File name of the document generated for `workflow`
    pub fn file_name(&self, workflow: &WorkflowDefinition) -> String {
        self.config.file_name(&workflow.name)
    }

    /// Render and format a single workflow
    pub fn render(&self, workflow: &WorkflowDefinition) -> Result<String> {
        let context = self.create_context(workflow);
        let rendered = self
            .tera
            .render(templates::WORKFLOW_TEMPLATE, &context)
            .map_err(|e| GeneratorError::Generation(format!("Template error: {:?}", e)))?;

        self.formatter.format(&self.file_name(workflow), &rendered)
    }

    /// Render every workflow into `sink`, in order
    ///
    /// Returns the file names written. Stops at the first failure.
    pub fn generate(
        &self,
        workflows: &[WorkflowDefinition],
        sink: &mut dyn DocumentSink,
    ) -> Result<Vec<String>> {
        workflows
            .iter()
            .map(|workflow| {
                let name = self.file_name(workflow);
                let document = self.render(workflow)?;
                sink.write(&name, &document)?;
                Ok(name)
            })
            .collect()
    }

    /// Render every workflow into `output_dir`, creating it if needed
    pub fn generate_to_directory(
        &self,
        workflows: &[WorkflowDefinition],
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        let mut sink = DirectorySink::create(output_dir)?;
        self.generate(workflows, &mut sink)?;
        Ok(sink.into_written())
    }

    /// Create template context for a workflow
    fn create_context(&self, workflow: &WorkflowDefinition) -> tera::Context {
        let url = format!(
            "{}{}",
            expression(&format!("secrets.{}", self.config.base_url_secret)),
            PathTemplate::new(&workflow.path)
                .substitute(|name| expression(&format!("inputs.{}", name)))
        );

        let mut context = tera::Context::new();
        context.insert("name", &workflow.name);
        context.insert("method", &workflow.method.to_string());
        context.insert("url", &url);
        context.insert(
            "bearer_token",
            &expression(&format!("secrets.{}", self.config.token_secret)),
        );
        context.insert("inputs", &workflow.inputs);
        context.insert("runner", &self.config.runner);
        context.insert("http_action", &self.config.http_action);
        context
    }
}

/// Generate workflows into the configured output directory (convenience function)
pub fn generate_workflows(
    workflows: &[WorkflowDefinition],
    config: WorkflowConfig,
) -> Result<Vec<PathBuf>> {
    let output_dir = config.output_dir.clone();
    WorkflowGenerator::new(config)?.generate_to_directory(workflows, &output_dir)
}

/// GitHub Actions `${{ ... }}` expression
fn expression(inner: &str) -> String {
    format!("${{{{ {} }}}}", inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use formatter::MockDocumentFormatter;
    use sink::MockDocumentSink;
    use swagger_actions_common::{HttpMethod, InputDescriptor, PrimitiveType};

    fn widget_workflow() -> WorkflowDefinition {
        WorkflowDefinition {
            name: "getWidget".to_string(),
            method: HttpMethod::Get,
            path: "/widgets/{id}".to_string(),
            inputs: vec![InputDescriptor {
                name: "id".to_string(),
                description: "id".to_string(),
                required: true,
                primitive_type: PrimitiveType::String,
            }],
        }
    }

    fn bare_workflow(name: &str) -> WorkflowDefinition {
        WorkflowDefinition {
            name: name.to_string(),
            method: HttpMethod::Post,
            path: "/ping".to_string(),
            inputs: vec![],
        }
    }

    #[test]
    fn test_expression() {
        assert_eq!(expression("inputs.id"), "${{ inputs.id }}");
    }

    #[test]
    fn test_render_widget() {
        let generator = WorkflowGenerator::new(WorkflowConfig::default()).unwrap();
        let document = generator.render(&widget_workflow()).unwrap();

        assert!(document.starts_with("name: getWidget\n"));
        assert!(document.contains("url: ${{ secrets.API_BASE_URL }}/widgets/${{ inputs.id }}\n"));
        assert!(document.contains("method: GET\n"));
        assert!(document.contains("bearerToken: ${{ secrets.API_TOKEN }}\n"));
        assert!(document.contains(
            "      id:\n        description: 'id'\n        required: true\n        type: string\n"
        ));
        assert!(document.contains("runs-on: ubuntu-latest\n"));
        assert!(document.contains("uses: fjogeleit/http-request-action@v1\n"));
        assert!(document.contains("data: ${{ toJSON(inputs) }}\n"));
    }

    #[test]
    fn test_render_uses_config() {
        let config = WorkflowConfig {
            runner: "self-hosted".to_string(),
            base_url_secret: "PETSTORE_URL".to_string(),
            token_secret: "PETSTORE_TOKEN".to_string(),
            ..WorkflowConfig::default()
        };
        let generator = WorkflowGenerator::new(config).unwrap();
        let document = generator.render(&widget_workflow()).unwrap();

        assert!(document.contains("runs-on: self-hosted\n"));
        assert!(document.contains("url: ${{ secrets.PETSTORE_URL }}/widgets/${{ inputs.id }}\n"));
        assert!(document.contains("bearerToken: ${{ secrets.PETSTORE_TOKEN }}\n"));
    }

    #[test]
    fn test_render_without_inputs_omits_inputs_key() {
        let generator = WorkflowGenerator::new(WorkflowConfig::default()).unwrap();
        let document = generator.render(&bare_workflow("ping")).unwrap();

        assert!(document.contains("  workflow_dispatch:\n\njobs:\n"));
        assert!(!document.contains("inputs:\n"));
    }

    #[test]
    fn test_render_quotes_descriptions() {
        let mut workflow = bare_workflow("note");
        workflow.inputs.push(InputDescriptor {
            name: "on".to_string(),
            description: "Owner's note\nsecond line".to_string(),
            required: false,
            primitive_type: PrimitiveType::String,
        });

        let generator = WorkflowGenerator::new(WorkflowConfig::default()).unwrap();
        let document = generator.render(&workflow).unwrap();

        assert!(document.contains("      'on':\n"));
        assert!(document.contains("description: 'Owner''s note second line'\n"));
    }

    #[test]
    fn test_generate_writes_in_order() {
        let mut sink = MockDocumentSink::new();
        let mut seq = mockall::Sequence::new();
        sink.expect_write()
            .withf(|name, contents| name == "first.yml" && contents.starts_with("name: first\n"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        sink.expect_write()
            .withf(|name, _| name == "second.yml")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let generator = WorkflowGenerator::new(WorkflowConfig::default()).unwrap();
        let names = generator
            .generate(&[bare_workflow("first"), bare_workflow("second")], &mut sink)
            .unwrap();

        assert_eq!(names, vec!["first.yml", "second.yml"]);
    }

    #[test]
    fn test_generate_stops_on_formatter_error() {
        let mut formatter = MockDocumentFormatter::new();
        formatter
            .expect_format()
            .times(1)
            .returning(|name, _| Err(GeneratorError::Generation(format!("bad {}", name))));

        let mut sink = MockDocumentSink::new();
        sink.expect_write().never();

        let generator = WorkflowGenerator::new(WorkflowConfig::default())
            .unwrap()
            .with_formatter(formatter);
        let err = generator
            .generate(&[bare_workflow("first"), bare_workflow("second")], &mut sink)
            .unwrap_err();

        assert!(err.to_string().contains("bad first.yml"));
    }

    #[test]
    fn test_formatter_receives_file_name() {
        let mut formatter = MockDocumentFormatter::new();
        formatter
            .expect_format()
            .withf(|name, document| name == "ping.json" && document.contains("name: ping"))
            .returning(|_, document| Ok(document.to_string()));

        let config = WorkflowConfig {
            extension: "json".to_string(),
            ..WorkflowConfig::default()
        };
        let generator = WorkflowGenerator::new(config)
            .unwrap()
            .with_formatter(formatter);

        assert!(generator.render(&bare_workflow("ping")).is_ok());
    }
}
