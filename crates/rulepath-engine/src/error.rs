//! # Engine Errors
//!
//! Hard errors only. A document breaking rules is not an error here; it is
//! reported through [`ValidationErrors`](crate::ValidationErrors).

use rulepath_schema::SchemaError;
use thiserror::Error;

/// A validation call could not be carried out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A rule token names a handler that is not registered.
    #[error("invalid rule: '{rule}' at path '{path}' has no registered handler")]
    UnknownRule {
        /// The token as written.
        rule: String,
        /// The schema path carrying it.
        path: String,
    },
}

/// Error from the typed [`Validator`](crate::Validator) facade.
#[derive(Error, Debug)]
pub enum ValidatorError {
    /// The input is not well-formed JSON.
    #[error("invalid json: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The target type's description is inconsistent.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Validation could not run.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The input passed validation but does not fit the target type.
    #[error("decode error: {0}")]
    Decode(#[source] serde_json::Error),
}
