//! Recoverable warnings collected during a conversion run
//!
//! Nothing in the library crates prints. Problems that do not abort the run
//! (a dangling `$ref`, an unsupported request body, ...) are recorded as
//! [`Diagnostic`]s and handed back next to the result in [`Reported`].

use std::fmt;
use thiserror::Error;

/// Why a reference could not be followed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("could not resolve reference {reference}: no entry for segment '{segment}'")]
    Unresolved { reference: String, segment: String },

    #[error("reference {reference} does not name a schema")]
    Incomplete { reference: String },

    #[error("reference {reference} points outside this document")]
    External { reference: String },

    #[error("reference cycle detected at {reference}")]
    Cycle { reference: String },
}

/// What went wrong
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A schema reference fell back to an empty object
    Reference(ResolveError),

    /// A `$ref`'d parameter could not be found; the parameter was skipped
    UnresolvedParameter { reference: String },

    /// A `$ref`'d request body could not be found; the body was skipped
    UnresolvedRequestBody { reference: String },

    /// The request body has no JSON media type
    UnsupportedRequestBody { media_types: Vec<String> },

    /// The request body schema yielded no inputs
    EmptyRequestBody { schema_kind: &'static str },

    /// A `{placeholder}` in the path has no matching input
    DanglingPathParameter { parameter: String },

    /// A schema property named `""`; it was skipped
    EmptyPropertyName { parent: Option<String> },
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Reference(err) => write!(f, "{}", err),
            DiagnosticKind::UnresolvedParameter { reference } => {
                write!(f, "could not resolve parameter {}, skipping it", reference)
            }
            DiagnosticKind::UnresolvedRequestBody { reference } => {
                write!(f, "could not resolve request body {}, skipping it", reference)
            }
            DiagnosticKind::UnsupportedRequestBody { media_types } => write!(
                f,
                "request body has no JSON content (found: {}), skipping it",
                media_types.join(", ")
            ),
            DiagnosticKind::EmptyRequestBody { schema_kind } => write!(
                f,
                "request body schema ({}) has no properties to expose as inputs",
                schema_kind
            ),
            DiagnosticKind::DanglingPathParameter { parameter } => write!(
                f,
                "path placeholder {{{}}} does not match any input",
                parameter
            ),
            DiagnosticKind::EmptyPropertyName { parent: None } => {
                write!(f, "property with an empty name, skipping it")
            }
            DiagnosticKind::EmptyPropertyName {
                parent: Some(parent),
            } => write!(
                f,
                "property of {} with an empty name, skipping it",
                parent
            ),
        }
    }
}

/// A single warning, optionally tied to an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub operation_id: Option<String>,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind) -> Self {
        Self {
            operation_id: None,
            kind,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.operation_id {
            Some(id) => write!(f, "[{}] {}", id, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Ordered collection of warnings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: DiagnosticKind) {
        self.records.push(Diagnostic::new(kind));
    }

    /// Move all records of `other` into `self`, tagging untagged ones with `operation_id`
    pub fn absorb(&mut self, other: Diagnostics, operation_id: &str) {
        self.records
            .extend(other.records.into_iter().map(|mut record| {
                record
                    .operation_id
                    .get_or_insert_with(|| operation_id.to_string());
                record
            }));
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.records.extend(other.records);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// A value together with the warnings produced while computing it
#[derive(Debug, Clone)]
pub struct Reported<T> {
    pub value: T,
    pub diagnostics: Diagnostics,
}

impl<T> Reported<T> {
    pub fn new(value: T, diagnostics: Diagnostics) -> Self {
        Self { value, diagnostics }
    }

    pub fn into_parts(self) -> (T, Diagnostics) {
        (self.value, self.diagnostics)
    }
}
