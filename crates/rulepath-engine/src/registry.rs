//! # Rule Handler Registry
//!
//! Maps rule names to predicates. A predicate receives the value found at a
//! path and the token's arguments, and answers pass or fail.
//!
//! The registry is populated first (`&mut self`) and then shared for
//! validation (`&self`), so registration can never race a validation.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use rulepath_core::{validate_rule_name, RuleNameError, REQUIRED};
use serde_json::Value;

use crate::builtin;

/// A rule predicate.
pub trait RuleHandler: Send + Sync {
    /// True if `value` satisfies the rule with the given arguments.
    fn evaluate(&self, value: &Value, args: &[String]) -> bool;
}

impl<F> RuleHandler for F
where
    F: Fn(&Value, &[String]) -> bool + Send + Sync,
{
    fn evaluate(&self, value: &Value, args: &[String]) -> bool {
        self(value, args)
    }
}

/// Rule name → handler.
#[derive(Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn RuleHandler>>,
}

impl HandlerRegistry {
    /// A registry holding only the `required` pseudo-handler.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.insert(REQUIRED, Arc::new(|_: &Value, _: &[String]| true));
        registry
    }

    /// A registry with nothing registered, not even `required`.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// `required` plus every built-in predicate.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, handler) in builtin::all() {
            registry.insert(name, handler);
        }
        registry
    }

    /// Register `handler` under `name`, replacing any previous handler.
    pub fn register(
        &mut self,
        name: &str,
        handler: impl RuleHandler + 'static,
    ) -> Result<(), RuleNameError> {
        validate_rule_name(name)?;
        if self.insert(name, Arc::new(handler)).is_some() {
            tracing::debug!(rule = name, "rule handler replaced");
        }
        Ok(())
    }

    fn insert(&mut self, name: &str, handler: Arc<dyn RuleHandler>) -> Option<Arc<dyn RuleHandler>> {
        self.handlers.insert(name.to_string(), handler)
    }

    /// Remove the handler for `name`, returning whether one existed.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.handlers.remove(name).is_some()
    }

    /// The handler registered under `name`.
    pub fn get(&self, name: &str) -> Option<&dyn RuleHandler> {
        self.handlers.get(name).map(|h| h.as_ref())
    }

    /// True if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("names", &self.names())
            .finish()
    }
}
