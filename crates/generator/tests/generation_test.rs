//! Integration test for workflow generation

use std::fs;
use swagger_actions_common::{
    HttpMethod, InputDescriptor, PrimitiveType, WorkflowConfig, WorkflowDefinition,
};
use swagger_actions_generator::{generate_workflows, WorkflowGenerator};
use tempfile::TempDir;

const GET_WIDGET: &str = r#"name: getWidget

on:
  workflow_dispatch:
    inputs:
      id:
        description: 'id'
        required: true
        type: string

jobs:
  api-call:
    runs-on: ubuntu-latest
    steps:
      - name: Make API Request
        id: api-request
        uses: fjogeleit/http-request-action@v1
        with:
          url: ${{ secrets.API_BASE_URL }}/widgets/${{ inputs.id }}
          method: GET
          customHeaders: '{"Content-Type": "application/json"}'
          bearerToken: ${{ secrets.API_TOKEN }}
          data: ${{ toJSON(inputs) }}

      - name: Response
        run: echo ${{ toJSON(steps.api-request.outputs.response) }} | jq .
"#;

fn input(name: &str, required: bool, primitive_type: PrimitiveType) -> InputDescriptor {
    InputDescriptor {
        name: name.to_string(),
        description: name.to_string(),
        required,
        primitive_type,
    }
}

fn workflows() -> Vec<WorkflowDefinition> {
    vec![
        WorkflowDefinition {
            name: "getWidget".to_string(),
            method: HttpMethod::Get,
            path: "/widgets/{id}".to_string(),
            inputs: vec![input("id", true, PrimitiveType::String)],
        },
        WorkflowDefinition {
            name: "createPayment".to_string(),
            method: HttpMethod::Post,
            path: "/accounts/{accountId}/payments".to_string(),
            inputs: vec![
                input("accountId", true, PrimitiveType::String),
                input("amount", true, PrimitiveType::Number),
                input("customer.vip", false, PrimitiveType::Boolean),
            ],
        },
        WorkflowDefinition {
            name: "health".to_string(),
            method: HttpMethod::Head,
            path: "/health".to_string(),
            inputs: vec![],
        },
    ]
}

#[test]
fn test_generate_get_widget() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join(".github").join("workflows");

    let generator = WorkflowGenerator::new(WorkflowConfig::default()).unwrap();
    let written = generator
        .generate_to_directory(&workflows()[..1], &output_dir)
        .unwrap();

    assert_eq!(written, vec![output_dir.join("getWidget.yml")]);
    assert_eq!(
        fs::read_to_string(output_dir.join("getWidget.yml")).unwrap(),
        GET_WIDGET
    );
}

#[test]
fn test_generate_every_workflow() {
    let temp_dir = TempDir::new().unwrap();
    let config = WorkflowConfig {
        output_dir: temp_dir.path().join("workflows"),
        ..WorkflowConfig::default()
    };

    let written = generate_workflows(&workflows(), config).unwrap();
    let names: Vec<_> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["getWidget.yml", "createPayment.yml", "health.yml"]);

    let payment = fs::read_to_string(&written[1]).unwrap();
    assert!(payment.contains(
        "url: ${{ secrets.API_BASE_URL }}/accounts/${{ inputs.accountId }}/payments\n"
    ));
    assert!(payment.contains("method: POST\n"));
    assert!(payment.contains(
        "      customer.vip:\n        description: 'customer.vip'\n        required: false\n        type: boolean\n"
    ));

    let health = fs::read_to_string(&written[2]).unwrap();
    assert!(health.contains("method: HEAD\n"));
    assert!(!health.contains("    inputs:"));
}

#[test]
fn test_generated_documents_are_valid_yaml() {
    let temp_dir = TempDir::new().unwrap();
    let generator = WorkflowGenerator::new(WorkflowConfig::default()).unwrap();
    let written = generator
        .generate_to_directory(&workflows(), temp_dir.path())
        .unwrap();

    for path in written {
        let document: serde_yaml::Value =
            serde_yaml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(document["jobs"]["api-call"]["steps"].is_sequence());
        assert!(document["on"].get("workflow_dispatch").is_some());
    }
}

#[test]
fn test_generation_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let generator = WorkflowGenerator::new(WorkflowConfig::default()).unwrap();

    let first_paths = generator
        .generate_to_directory(&workflows(), temp_dir.path())
        .unwrap();
    let first: Vec<_> = first_paths
        .iter()
        .map(|p| fs::read(p).unwrap())
        .collect();

    let second_paths = generator
        .generate_to_directory(&workflows(), temp_dir.path())
        .unwrap();
    let second: Vec<_> = second_paths
        .iter()
        .map(|p| fs::read(p).unwrap())
        .collect();

    assert_eq!(first_paths, second_paths);
    assert_eq!(first, second);
}
