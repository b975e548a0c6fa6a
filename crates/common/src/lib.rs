//! Common types and utilities for swagger-actions
//!
//! This crate contains the intermediate representation shared by the parser,
//! generator, and CLI components: schema nodes, operations, derived workflow
//! inputs, diagnostics, and configuration.

mod config;
mod diagnostics;
mod operation;
mod path;
mod schema;

pub use config::WorkflowConfig;
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, ResolveError, Reported};
pub use operation::{
    ApiDefinition, HttpMethod, InputDescriptor, Operation, Parameter, ParameterLocation,
    PrimitiveType, WorkflowDefinition,
};
pub use path::PathTemplate;
pub use schema::{ComponentTable, SchemaKind, SchemaNode};

use thiserror::Error;

/// Errors that abort a conversion run
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;
