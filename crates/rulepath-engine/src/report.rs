//! # Validation Report
//!
//! Field-level failures are data, not errors: a document that breaks rules
//! produces a [`ValidationErrors`] value listing every failing path. Hard
//! errors (unknown rules) are a separate type, see
//! [`EngineError`](crate::EngineError).

use std::collections::BTreeMap;
use std::fmt;

use rulepath_core::PathKey;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// One failing path.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFailure {
    /// Data path of the field.
    pub path: PathKey,
    /// Every rule attempted, as written, in declared order. A missing
    /// required field lists only `required`.
    pub rules: Vec<String>,
    /// The value found, or null when the field was absent.
    pub value: Value,
}

impl fmt::Display for FieldFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field={} rules={} value={}",
            self.path,
            self.rules.join(", "),
            self.value
        )
    }
}

/// All failures of one validation call, keyed by path. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors {
    failures: BTreeMap<PathKey, FieldFailure>,
}

impl ValidationErrors {
    /// Wrap a failure map; `None` when there is nothing to report.
    pub(crate) fn from_failures(failures: BTreeMap<PathKey, FieldFailure>) -> Option<Self> {
        if failures.is_empty() {
            None
        } else {
            Some(Self { failures })
        }
    }

    /// Number of failing paths.
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Always false: an empty report is represented by `None`.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// The failure at `path`.
    pub fn get(&self, path: &str) -> Option<&FieldFailure> {
        self.failures.get(path)
    }

    /// True if `path` failed.
    pub fn contains(&self, path: &str) -> bool {
        self.failures.contains_key(path)
    }

    /// Failures in path order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldFailure> {
        self.failures.values()
    }

    /// Path → failed rules, the compact form used for API responses.
    pub fn to_rule_map(&self) -> BTreeMap<String, Vec<String>> {
        self.failures
            .iter()
            .map(|(path, failure)| (path.to_string(), failure.rules.clone()))
            .collect()
    }

    /// Consumes self and returns the failures in path order.
    pub fn into_inner(self) -> Vec<FieldFailure> {
        self.failures.into_values().collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for failure in self.failures.values() {
            writeln!(f, "{failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.failures.len()))?;
        for (path, failure) in &self.failures {
            map.serialize_entry(path, &failure.rules)?;
        }
        map.end()
    }
}
