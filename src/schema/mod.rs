//! OpenAPI schema handling
//!
//! Parses an OpenAPI 3.x document, resolves local `$ref`s, and exposes the
//! operations under test by operation ID. Also provides structural
//! validation of JSON values against schema objects, used to check
//! response conformance.

mod document;
mod types;
mod validate;

pub use document::{Document, Operation, Parameter, ParameterLocation};
pub use types::{JsonType, SchemaObject};
pub use validate::{validate, Violation};
