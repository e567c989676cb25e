//! # Validator Facade
//!
//! Bundles a handler registry with an annotation key and runs the whole
//! pipeline for a typed target: JSON bytes in, either a decoded value or the
//! list of failures out.
//!
//! ```
//! use rulepath_engine::{Outcome, Validator};
//! use rulepath_schema::{Describe, FieldDef, TypeDef, TypeSchema};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Login {
//!     user: String,
//! }
//!
//! impl Describe for Login {
//!     fn type_schema() -> TypeSchema {
//!         TypeSchema::new(TypeDef::structure([
//!             FieldDef::new("User", TypeDef::scalar()).tag("validate", "required|min:3"),
//!         ]))
//!     }
//! }
//!
//! let validator = Validator::new();
//! match validator.validate::<Login>(br#"{"user": "ada"}"#).unwrap() {
//!     Outcome::Valid(login) => assert_eq!(login.user, "ada"),
//!     Outcome::Invalid(errors) => panic!("{errors}"),
//! }
//! ```

use rulepath_core::RuleNameError;
use rulepath_schema::{Describe, RuleSchema, SchemaError};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::engine;
use crate::error::{EngineError, ValidatorError};
use crate::registry::{HandlerRegistry, RuleHandler};
use crate::report::ValidationErrors;

/// Annotation key read when none is configured.
pub const DEFAULT_TAG_KEY: &str = "validate";

/// Result of validating input for a typed target.
#[derive(Debug)]
pub enum Outcome<T> {
    /// Every rule passed and the input decoded into `T`.
    Valid(T),
    /// At least one path failed. Nothing was decoded.
    Invalid(ValidationErrors),
}

impl<T> Outcome<T> {
    /// True for [`Outcome::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The failures, if any.
    pub fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid(errors) => Some(errors),
        }
    }

    /// Convert into a `Result`, treating failures as the error.
    pub fn into_result(self) -> Result<T, ValidationErrors> {
        match self {
            Self::Valid(value) => Ok(value),
            Self::Invalid(errors) => Err(errors),
        }
    }
}

/// A handler registry plus the annotation key to read rules from.
#[derive(Debug, Clone)]
pub struct Validator {
    registry: HandlerRegistry,
    tag_key: String,
}

impl Validator {
    /// Built-in handlers, default tag key.
    pub fn new() -> Self {
        Self::with_registry(HandlerRegistry::with_builtins())
    }

    /// Use `registry` as is.
    pub fn with_registry(registry: HandlerRegistry) -> Self {
        Self {
            registry,
            tag_key: DEFAULT_TAG_KEY.to_string(),
        }
    }

    /// Read rules from `tag_key` instead of the default.
    pub fn with_tag_key(mut self, tag_key: impl Into<String>) -> Self {
        self.tag_key = tag_key.into();
        self
    }

    /// The annotation key rules are read from.
    pub fn tag_key(&self) -> &str {
        &self.tag_key
    }

    /// The handler registry.
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Register a handler, replacing any previous one under `name`.
    pub fn add_rule_handler(
        &mut self,
        name: &str,
        handler: impl RuleHandler + 'static,
    ) -> Result<(), RuleNameError> {
        self.registry.register(name, handler)
    }

    /// Register several handlers. Stops at the first invalid name.
    pub fn add_rule_handlers<I, S, H>(&mut self, handlers: I) -> Result<(), RuleNameError>
    where
        I: IntoIterator<Item = (S, H)>,
        S: AsRef<str>,
        H: RuleHandler + 'static,
    {
        for (name, handler) in handlers {
            self.registry.register(name.as_ref(), handler)?;
        }
        Ok(())
    }

    /// Build the rule schema of `T` under this validator's tag key.
    pub fn compile<T: Describe>(&self) -> Result<RuleSchema, SchemaError> {
        RuleSchema::of::<T>(&self.tag_key)
    }

    /// Validate an already decoded document.
    pub fn validate_value(
        &self,
        data: &Value,
        schema: &RuleSchema,
    ) -> Result<Option<ValidationErrors>, EngineError> {
        engine::validate(data, schema.rules(), &self.registry)
    }

    /// Validate JSON `input` against the rules of `T`, decoding it on
    /// success.
    pub fn validate<T>(&self, input: &[u8]) -> Result<Outcome<T>, ValidatorError>
    where
        T: Describe + DeserializeOwned,
    {
        let data: Value = serde_json::from_slice(input).map_err(ValidatorError::InvalidJson)?;
        let schema = self.compile::<T>()?;

        if let Some(errors) = self.validate_value(&data, &schema)? {
            tracing::debug!(failed = errors.len(), "input rejected");
            return Ok(Outcome::Invalid(errors));
        }

        let value = serde_json::from_value(data).map_err(ValidatorError::Decode)?;
        Ok(Outcome::Valid(value))
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
