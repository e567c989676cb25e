//! # rulepath-core — Foundational Types
//!
//! This crate defines the vocabulary shared by the schema side and the data
//! side of rulepath. Every other crate in the workspace depends on
//! `rulepath-core`; it depends on nothing internal.
//!
//! ## Key Types
//!
//! 1. **[`PathKey`].** A dot-delimited address. Schema paths may contain the
//!    wildcard segment `*`; data paths contain concrete array indices.
//!
//! 2. **[`RuleToken`].** One rule directive (`eq:1`) with its name and
//!    argument list, keeping the raw text for reporting.
//!
//! 3. **[`SchemaMap`].** Path → ordered rule tokens. Produced by the schema
//!    extractor, consumed by the validation engine.
//!
//! 4. **[`to_camel`].** The single identifier convention used by both path
//!    spaces.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `rulepath-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod case;
pub mod error;
pub mod path;
pub mod rule;

use std::collections::BTreeMap;

// Re-export primary types for ergonomic imports.
pub use case::to_camel;
pub use error::RuleNameError;
pub use path::{is_index_segment, PathKey, SEPARATOR, WILDCARD};
pub use rule::{
    is_presence_sentinel, validate_rule_name, RuleToken, EXCLUDE, ITERATIVE_PREFIX, OPTIONAL,
    REQUIRED, RULE_SEPARATOR,
};

/// Rule path → ordered rule tokens.
///
/// A wildcard-terminated key (`items.*`) holds rules for every element of the
/// array at `items`, never for the array itself.
pub type SchemaMap = BTreeMap<PathKey, Vec<RuleToken>>;
