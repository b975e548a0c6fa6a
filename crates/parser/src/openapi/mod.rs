//! OpenAPI 3.x / Swagger 2.0 specification parser
//!
//! Parses OpenAPI documents (YAML or JSON) into the `ApiDefinition` IR: one
//! `Operation` per path and method, plus the component table that schema
//! references resolve against.
//!
//! ## Usage
//! ```rust,ignore
//! use swagger_actions_parser::openapi::OpenApiParser;
//!
//! let parser = OpenApiParser::from_file("swagger.yaml")?;
//! let reported = parser.parse()?;
//! for warning in &reported.diagnostics {
//!     eprintln!("{}", warning);
//! }
//! ```

mod converter;
mod parser;
mod types;

pub use parser::OpenApiParser;
pub use types::*;
