use std::fmt;

use thiserror::Error;

/// A value did not conform to a schema.
///
/// This is the only error `compact` and `inflate` ever return. It is raised by
/// the schema validator and handed back to the caller untouched.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Validation Error at {path}: {message}")]
pub struct ValidationError {
    /// Location of the first nonconformance, e.g. `$.items[2].name`
    pub path: String,
    /// Human readable description of the mismatch
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error at the given location.
    pub fn new(path: impl fmt::Display, message: impl Into<String>) -> Self {
        ValidationError {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

/// Unified error type for the library.
#[derive(Error, Debug)]
pub enum Error {
    /// A value did not conform to its schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A schema definition is itself malformed.
    #[error("Schema Error: {0}")]
    SchemaError(String),
}

/// A specialized `Result` type for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Result of validating, compacting or inflating a value.
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;
