//! # Error Types
//!
//! Errors raised by the foundational types. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations.
//!
//! Parsing rule tags never fails (malformed segments are dropped), so the
//! only error raised here concerns names offered for handler registration.

use thiserror::Error;

/// A rule name that cannot be registered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleNameError {
    /// The name is the empty string.
    #[error("rule name must not be empty")]
    Empty,

    /// The name contains a character reserved by the rule grammar.
    #[error("rule name '{name}' contains reserved character '{character}'")]
    ReservedCharacter {
        /// The rejected name.
        name: String,
        /// The offending delimiter.
        character: char,
    },
}
