//! # rulepath-cli — Command-Line Interface
//!
//! ## Subcommands
//!
//! - `validate`: check a JSON/YAML document against a type descriptor
//! - `rules`: print the rule map extracted from a descriptor
//! - `handlers`: list the rule names available to descriptors
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; each subcommand module exposes its
//!   `Args` struct and a `run_*` function returning the exit status.
//! - Output goes to a caller-supplied writer so handlers are testable.
//! - No validation logic here: handlers delegate to `rulepath-schema` and
//!   `rulepath-engine`.

pub mod config;
pub mod handlers;
pub mod rules;
pub mod validate;
