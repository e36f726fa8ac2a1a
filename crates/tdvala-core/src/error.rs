//! Error types for schema parsing and model building

use thiserror::Error;

/// Result type alias for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Error type for schema parsing and model building.
///
/// Every variant is fatal: the pipeline aborts before any output is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A definition-line argument token has no `name:type` separator
    #[error("line {line}: cannot split argument token '{token}' into name and type")]
    Tokenization { line: usize, token: String },

    /// A type reference resolves to neither a primitive nor a declared type
    #[error("unresolved type '{name}' referenced by {entity}")]
    UnresolvedType { entity: String, name: String },

    /// A concrete leaf type owns more than one constructor
    #[error("type '{type_name}' is a concrete leaf but has {constructors} constructors")]
    StructuralViolation {
        type_name: String,
        constructors: usize,
    },

    /// A parameter doc line appeared before any entity doc
    #[error("line {line}: '{constructor}' has no preceding @description line")]
    MissingConstructor { line: usize, constructor: String },

    /// A documentation line that cannot be interpreted
    #[error("line {line}: malformed documentation '{text}'")]
    MalformedDoc { line: usize, text: String },
}

impl SchemaError {
    /// The 1-based schema line the error was raised on, if it is tied to one
    pub fn line(&self) -> Option<usize> {
        match self {
            SchemaError::Tokenization { line, .. }
            | SchemaError::MissingConstructor { line, .. }
            | SchemaError::MalformedDoc { line, .. } => Some(*line),
            SchemaError::UnresolvedType { .. } | SchemaError::StructuralViolation { .. } => None,
        }
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
