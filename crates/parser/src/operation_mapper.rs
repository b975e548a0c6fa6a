//! Maps operations to workflow definitions
//!
//! Parameters become one input each; the request body is flattened by the
//! [`InputDeriver`]. Body inputs come last and replace parameters of the same
//! name, keeping the parameter's position.

use crate::flattener::InputDeriver;
use crate::resolver::Resolver;
use crate::type_mapper::TypeMapper;
use indexmap::IndexMap;
use swagger_actions_common::{
    ApiDefinition, ComponentTable, DiagnosticKind, Diagnostics, InputDescriptor, Operation,
    Parameter, PathTemplate, Reported, WorkflowDefinition,
};

/// Derives workflow definitions from operations
pub struct OperationMapper<'a> {
    components: &'a ComponentTable,
}

impl<'a> OperationMapper<'a> {
    pub fn new(components: &'a ComponentTable) -> Self {
        Self { components }
    }

    /// Map a single operation
    ///
    /// Diagnostics are tagged with the operation id.
    pub fn map(&self, operation: &Operation) -> Reported<WorkflowDefinition> {
        let mut resolver = Resolver::new(self.components);
        let mut inputs: IndexMap<String, InputDescriptor> = IndexMap::new();

        for parameter in &operation.parameters {
            let input = parameter_input(&mut resolver, parameter);
            inputs.insert(input.name.clone(), input);
        }

        let mut empty_body = None;
        if let Some(body) = &operation.request_body {
            let resolved = resolver.resolve(Some(body));
            let body_inputs = InputDeriver::new(&mut resolver).derive_resolved(&resolved);

            if body_inputs.is_empty() {
                empty_body = Some(resolved.node.kind.name());
            }
            for input in body_inputs {
                inputs.insert(input.name.clone(), input);
            }
        }

        let mut diagnostics = resolver.into_diagnostics();
        if let Some(schema_kind) = empty_body {
            diagnostics.push(DiagnosticKind::EmptyRequestBody { schema_kind });
        }
        // The placeholder is still rewritten to an input reference
        for placeholder in PathTemplate::new(&operation.path).placeholders() {
            if !inputs.contains_key(placeholder) {
                diagnostics.push(DiagnosticKind::DanglingPathParameter {
                    parameter: placeholder.to_string(),
                });
            }
        }

        let mut tagged = Diagnostics::new();
        tagged.absorb(diagnostics, &operation.operation_id);

        Reported::new(
            WorkflowDefinition {
                name: operation.operation_id.clone(),
                method: operation.method,
                path: operation.path.clone(),
                inputs: inputs.into_values().collect(),
            },
            tagged,
        )
    }

    /// Map every operation of an API, in document order
    pub fn map_all(&self, api: &ApiDefinition) -> Reported<Vec<WorkflowDefinition>> {
        let mut diagnostics = Diagnostics::new();
        let workflows = api
            .operations
            .iter()
            .map(|operation| {
                let (workflow, operation_diagnostics) = self.map(operation).into_parts();
                diagnostics.extend(operation_diagnostics);
                workflow
            })
            .collect();

        Reported::new(workflows, diagnostics)
    }
}

fn parameter_input(resolver: &mut Resolver<'_>, parameter: &Parameter) -> InputDescriptor {
    let schema = resolver.resolve(parameter.schema.as_ref()).node;
    let explicit = parameter
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .or_else(|| schema.description());

    InputDescriptor {
        name: parameter.name.clone(),
        description: TypeMapper::describe(&parameter.name, explicit, &schema),
        required: parameter.required,
        primitive_type: TypeMapper::narrow(&schema.kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swagger_actions_common::{
        HttpMethod, ParameterLocation, PrimitiveType, ResolveError, SchemaKind, SchemaNode,
    };

    fn operation(path: &str, parameters: Vec<Parameter>, body: Option<SchemaNode>) -> Operation {
        Operation {
            operation_id: "testOp".to_string(),
            method: HttpMethod::Post,
            path: path.to_string(),
            parameters,
            request_body: body,
        }
    }

    fn parameter(name: &str, kind: SchemaKind, required: bool) -> Parameter {
        Parameter {
            name: name.to_string(),
            location: ParameterLocation::Query,
            description: None,
            required,
            schema: Some(SchemaNode::new(kind)),
        }
    }

    #[test]
    fn test_parameter_types_are_narrowed() {
        let table = ComponentTable::new();
        let op = operation(
            "/search",
            vec![
                parameter("q", SchemaKind::String, true),
                parameter("limit", SchemaKind::Integer, false),
                parameter("exact", SchemaKind::Boolean, false),
            ],
            None,
        );

        let workflow = OperationMapper::new(&table).map(&op).value;
        let summary: Vec<_> = workflow
            .inputs
            .iter()
            .map(|i| (i.name.as_str(), i.required, i.primitive_type))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("q", true, PrimitiveType::String),
                ("limit", false, PrimitiveType::Number),
                ("exact", false, PrimitiveType::Boolean),
            ]
        );
    }

    #[test]
    fn test_parameter_without_schema_is_string() {
        let table = ComponentTable::new();
        let mut param = parameter("token", SchemaKind::String, false);
        param.schema = None;
        param.description = Some("Session token".to_string());

        let workflow = OperationMapper::new(&table)
            .map(&operation("/x", vec![param], None))
            .value;
        assert_eq!(workflow.inputs[0].primitive_type, PrimitiveType::String);
        assert_eq!(workflow.inputs[0].description, "Session token");
    }

    #[test]
    fn test_parameter_description_falls_back_to_schema() {
        let table = ComponentTable::new();
        let mut param = parameter("sort", SchemaKind::String, false);
        param.schema = param.schema.map(|schema| {
            schema
                .with_description("Sort order")
                .with_enum_values(vec![serde_json::json!("asc"), serde_json::json!("desc")])
        });

        let workflow = OperationMapper::new(&table)
            .map(&operation("/x", vec![param.clone()], None))
            .value;
        assert_eq!(workflow.inputs[0].description, "Sort order (asc, desc)");

        param.description = Some("Ordering of results".to_string());
        let workflow = OperationMapper::new(&table)
            .map(&operation("/x", vec![param], None))
            .value;
        assert_eq!(workflow.inputs[0].description, "Ordering of results (asc, desc)");
    }

    #[test]
    fn test_body_input_overrides_parameter() {
        let table = ComponentTable::new();
        let body = SchemaNode::object(
            [
                ("name".to_string(), SchemaNode::new(SchemaKind::String)),
                ("id".to_string(), SchemaNode::new(SchemaKind::Integer)),
            ]
            .into_iter()
            .collect(),
            Default::default(),
        );
        let op = operation(
            "/items/{id}",
            vec![parameter("id", SchemaKind::String, true)],
            Some(body),
        );

        let reported = OperationMapper::new(&table).map(&op);
        let workflow = reported.value;
        assert_eq!(
            workflow.inputs.iter().map(|i| i.name.as_str()).collect::<Vec<_>>(),
            vec!["id", "name"]
        );
        let id = workflow.input("id").unwrap();
        assert_eq!(id.primitive_type, PrimitiveType::Number);
        assert!(!id.required);
        assert!(reported.diagnostics.is_empty());
    }

    #[test]
    fn test_missing_body_reference_keeps_parameters() {
        let table = ComponentTable::new();
        let op = operation(
            "/things",
            vec![parameter("dryRun", SchemaKind::Boolean, false)],
            Some(SchemaNode::reference("#/components/schemas/Missing")),
        );

        let reported = OperationMapper::new(&table).map(&op);
        assert_eq!(reported.value.inputs.len(), 1);

        let kinds: Vec<_> = reported.diagnostics.iter().map(|d| &d.kind).collect();
        assert!(matches!(
            kinds[0],
            DiagnosticKind::Reference(ResolveError::Unresolved { .. })
        ));
        assert!(matches!(
            kinds[1],
            DiagnosticKind::EmptyRequestBody { schema_kind: "object" }
        ));
        assert!(reported
            .diagnostics
            .iter()
            .all(|d| d.operation_id.as_deref() == Some("testOp")));
    }

    #[test]
    fn test_dangling_path_placeholder_is_reported() {
        let table = ComponentTable::new();
        let op = operation("/users/{userId}/posts/{postId}", vec![], None);

        let reported = OperationMapper::new(&table).map(&op);
        let dangling: Vec<_> = reported
            .diagnostics
            .iter()
            .filter_map(|d| match &d.kind {
                DiagnosticKind::DanglingPathParameter { parameter } => Some(parameter.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(dangling, vec!["userId", "postId"]);
    }

    #[test]
    fn test_map_all_preserves_order() {
        let table = ComponentTable::new();
        let mut first = operation("/a", vec![], None);
        first.operation_id = "first".to_string();
        let mut second = operation("/b", vec![], None);
        second.operation_id = "second".to_string();

        let api = ApiDefinition {
            title: None,
            operations: vec![first, second],
            components: ComponentTable::new(),
        };

        let workflows = OperationMapper::new(&table).map_all(&api).value;
        let names: Vec<_> = workflows.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}
