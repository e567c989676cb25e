//! # rulepath-engine — Validation Engine
//!
//! Evaluates the rules of a schema map against decoded JSON documents.
//!
//! ## Modules
//!
//! - [`flatten`] projects a document onto the data path space.
//! - [`registry`] maps rule names to [`RuleHandler`] predicates; [`builtin`]
//!   supplies the default pack.
//! - [`engine`] runs normalization, rule resolution, wildcard expansion and
//!   first-success dispatch.
//! - [`report`] holds the per-path failures.
//! - [`validator`] is the typed facade: JSON bytes to `Outcome<T>`.
//!
//! ## Error Model
//!
//! A document breaking rules yields `Ok(Some(ValidationErrors))`. An
//! unregistered rule yields `Err(EngineError)`, never a partial report.
//!
//! ## Crate Policy
//!
//! - Depends on `rulepath-core` and `rulepath-schema` internally.
//! - No I/O. Every call is synchronous and deterministic.
//! - Handlers must not panic; malformed arguments fail the predicate.

pub mod builtin;
pub mod engine;
pub mod error;
pub mod flatten;
pub mod registry;
pub mod report;
pub mod validator;

pub use engine::validate;
pub use error::{EngineError, ValidatorError};
pub use flatten::{flatten, DataMap};
pub use registry::{HandlerRegistry, RuleHandler};
pub use report::{FieldFailure, ValidationErrors};
pub use validator::{Outcome, Validator, DEFAULT_TAG_KEY};
