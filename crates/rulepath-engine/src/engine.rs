//! # Validation Engine
//!
//! Evaluates a schema map against a decoded document.
//!
//! ## Pipeline
//!
//! 1. **Normalize.** Top-level document keys are converted to lower camel
//!    case so they line up with schema paths. Nested keys are left alone.
//! 2. **Flatten.** The document becomes a data map ([`flatten`]).
//! 3. **Resolve.** Every non-sentinel rule in the schema must name a
//!    registered handler, whether or not its path is present in the data.
//!    The first unknown rule aborts the call.
//! 4. **Expand.** Wildcard paths are replaced by the concrete element paths
//!    found in the data. Their rules are appended after any rules declared on
//!    the concrete path itself.
//! 5. **Evaluate.** Per path: absent or null values fail only under
//!    `required`; present values pass as soon as one rule passes, and fail
//!    listing every rule attempted.
//!
//! The call is pure: the same document, schema and registry always produce
//! the same result.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use rulepath_core::{is_index_segment, to_camel, PathKey, RuleToken, SchemaMap, REQUIRED, WILDCARD};
use serde_json::{Map, Value};

use crate::error::EngineError;
use crate::flatten::{flatten, DataMap};
use crate::registry::HandlerRegistry;
use crate::report::{FieldFailure, ValidationErrors};

/// Working rule list: concrete path → tokens, borrowed from the schema.
type WorkingRules<'s> = BTreeMap<PathKey, Vec<&'s RuleToken>>;

/// Validate `raw` against `schema`.
///
/// Returns `Ok(None)` when every path passes, `Ok(Some(errors))` when some
/// fail, and `Err` when the schema references an unregistered rule.
pub fn validate(
    raw: &Value,
    schema: &SchemaMap,
    registry: &HandlerRegistry,
) -> Result<Option<ValidationErrors>, EngineError> {
    resolve_rules(schema, registry)?;

    let data = normalize_keys(raw);
    let flat = flatten(&data);
    let working = expand(schema, &flat);

    let mut failures = BTreeMap::new();
    for (path, rules) in &working {
        if let Some(failure) = evaluate_path(path, rules, &flat, registry)? {
            failures.insert(path.clone(), failure);
        }
    }

    tracing::debug!(
        schema_paths = schema.len(),
        data_paths = flat.len(),
        checked = working.len(),
        failed = failures.len(),
        "validation finished"
    );
    Ok(ValidationErrors::from_failures(failures))
}

/// Reject the schema if any rule has no handler.
fn resolve_rules(schema: &SchemaMap, registry: &HandlerRegistry) -> Result<(), EngineError> {
    for (path, tokens) in schema {
        for token in tokens {
            if !token.is_presence_sentinel() && !registry.contains(token.name()) {
                return Err(EngineError::UnknownRule {
                    rule: token.to_string(),
                    path: path.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Camel-case the top-level keys. On collision the key iterated last wins.
fn normalize_keys(raw: &Value) -> Cow<'_, Value> {
    match raw {
        Value::Object(map) => {
            let normalized: Map<String, Value> = map
                .iter()
                .map(|(key, value)| (to_camel(key), value.clone()))
                .collect();
            Cow::Owned(Value::Object(normalized))
        }
        other => Cow::Borrowed(other),
    }
}

/// Replace wildcard paths by the concrete paths present in `flat`.
fn expand<'s>(schema: &'s SchemaMap, flat: &DataMap<'_>) -> WorkingRules<'s> {
    let mut working: WorkingRules<'s> = schema
        .iter()
        .filter(|(path, _)| !path.has_wildcard())
        .map(|(path, tokens)| (path.clone(), tokens.iter().collect()))
        .collect();

    let indices = index_segments(flat);
    for (pattern, tokens) in schema.iter().filter(|(path, _)| path.has_wildcard()) {
        let concrete = concrete_paths(pattern, &indices);
        tracing::trace!(%pattern, matches = concrete.len(), "expanded wildcard path");
        for path in concrete {
            working.entry(path).or_default().extend(tokens.iter());
        }
    }

    working
}

/// Container path → index segments of its elements, in path order.
fn index_segments<'d>(flat: &'d DataMap<'_>) -> HashMap<PathKey, Vec<&'d str>> {
    let mut indices: HashMap<PathKey, Vec<&'d str>> = HashMap::new();
    for path in flat.keys() {
        let (Some(last), Some(parent)) = (path.last_segment(), path.parent()) else {
            continue;
        };
        if is_index_segment(last) {
            indices.entry(parent).or_default().push(last);
        }
    }
    indices
}

/// Substitute every wildcard segment of `pattern` with each index present
/// under the prefix built so far.
fn concrete_paths(pattern: &PathKey, indices: &HashMap<PathKey, Vec<&str>>) -> Vec<PathKey> {
    let mut prefixes = vec![PathKey::root()];
    for segment in pattern.segments() {
        prefixes = if segment == WILDCARD {
            prefixes
                .iter()
                .flat_map(|prefix| {
                    indices
                        .get(prefix)
                        .into_iter()
                        .flatten()
                        .map(move |index| prefix.child(index))
                })
                .collect()
        } else {
            prefixes.iter().map(|prefix| prefix.child(segment)).collect()
        };
        if prefixes.is_empty() {
            break;
        }
    }
    prefixes
}

/// Apply presence policy and first-success dispatch to one path.
fn evaluate_path(
    path: &PathKey,
    rules: &[&RuleToken],
    flat: &DataMap<'_>,
    registry: &HandlerRegistry,
) -> Result<Option<FieldFailure>, EngineError> {
    let value = flat.get(path).copied().filter(|v| !v.is_null());

    let Some(value) = value else {
        if rules.iter().any(|token| token.is_required()) {
            tracing::trace!(%path, "required field missing");
            return Ok(Some(FieldFailure {
                path: path.clone(),
                rules: vec![REQUIRED.to_string()],
                value: Value::Null,
            }));
        }
        tracing::trace!(%path, "absent optional field skipped");
        return Ok(None);
    };

    let mut attempted = Vec::new();
    for token in rules.iter().filter(|token| !token.is_presence_sentinel()) {
        let handler = registry
            .get(token.name())
            .ok_or_else(|| EngineError::UnknownRule {
                rule: token.to_string(),
                path: path.to_string(),
            })?;
        if handler.evaluate(value, token.args()) {
            tracing::trace!(%path, rule = %token, "rule passed");
            return Ok(None);
        }
        attempted.push(token.to_string());
    }

    if attempted.is_empty() {
        return Ok(None);
    }
    tracing::trace!(%path, rules = ?attempted, "every rule failed");
    Ok(Some(FieldFailure {
        path: path.clone(),
        rules: attempted,
        value: value.clone(),
    }))
}
