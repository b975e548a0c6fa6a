//! OpenAPI parsing and input derivation
//!
//! This crate turns an OpenAPI/Swagger document into `WorkflowDefinition`s:
//! one per operation, each carrying a flat list of workflow inputs.
//!
//! ## Pipeline
//!
//! 1. [`OpenApiParser`] reads the document and converts it into an
//!    `ApiDefinition` (operations plus the component table).
//! 2. [`Resolver`] follows `$ref`s and unwraps arrays, degrading unresolvable
//!    or cyclic references to an empty object.
//! 3. [`InputDeriver`] flattens request-body schemas: unions are merged,
//!    nested objects become dotted names.
//! 4. [`OperationMapper`] combines parameter inputs and body inputs.
//!
//! Recoverable problems are returned as diagnostics next to each result.

pub mod openapi;

mod flattener;
mod operation_mapper;
mod resolver;
mod type_mapper;

pub use flattener::{InputDeriver, PropertySet};
pub use openapi::OpenApiParser;
pub use operation_mapper::OperationMapper;
pub use resolver::{Resolved, Resolver, Scope};
pub use type_mapper::TypeMapper;

use std::path::Path;
use swagger_actions_common::{ApiDefinition, Reported, Result, WorkflowDefinition};

/// Parse an OpenAPI file into an `ApiDefinition`
pub fn parse_openapi_file<P: AsRef<Path>>(path: P) -> Result<Reported<ApiDefinition>> {
    OpenApiParser::from_file(path)?.parse()
}

/// Derive a workflow definition for every operation of `api`
pub fn derive_workflows(api: &ApiDefinition) -> Reported<Vec<WorkflowDefinition>> {
    OperationMapper::new(&api.components).map_all(api)
}
