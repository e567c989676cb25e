//! # rulepath-schema — Type Descriptions & Rule Extraction
//!
//! Turns the description of a target type into the schema path space: a map
//! from dot-delimited paths to the rules annotated on the fields at those
//! paths.
//!
//! ## Pipeline
//!
//! 1. **Describe** ([`types`]). A [`TypeSchema`] is written in code, through
//!    the [`Describe`] trait, or loaded from YAML/JSON ([`load`]).
//! 2. **Check** ([`check`]). Dangling type references, element rules on
//!    non-array fields and colliding field names are rejected together.
//! 3. **Extract** ([`extract`]). The type graph is walked with a per-branch
//!    cycle guard; every annotation is parsed ([`tags`]) and recorded under
//!    its path.
//!
//! [`RuleSchema::build`] runs steps 2 and 3.
//!
//! ## Crate Policy
//!
//! - Depends only on `rulepath-core` internally.
//! - Extraction never fails; every reportable problem belongs to [`check`].

pub mod check;
pub mod error;
pub mod extract;
pub mod load;
pub mod schema;
pub mod tags;
pub mod types;

pub use check::check;
pub use error::{SchemaError, SchemaProblem, SchemaProblems};
pub use extract::{extract, TypeChain};
pub use schema::RuleSchema;
pub use tags::{parse_field_rules, FieldRules};
pub use types::{Describe, FieldDef, TypeDef, TypeSchema};
