//! # Rule Tokens — The Rule Grammar
//!
//! Rules are written as annotation strings on fields:
//!
//! ```text
//! required|len:3|[]oneof:red,green,blue
//! ```
//!
//! - Tokens are joined by `|`.
//! - A token is `name` or `name:arg1,arg2,...`.
//! - A `[]` prefix marks a token as iterative: it applies to every element
//!   of the array field rather than to the field itself.
//! - A lone `-` excludes the field (and everything below it) entirely.
//!
//! Splitting a tag into tokens is done by the schema crate; this module owns
//! the token itself and the reserved names.
//!
//! ## Presence Sentinels
//!
//! [`REQUIRED`] and [`OPTIONAL`] are not dispatched as predicates. They
//! control what happens when a field is absent or null: `required` turns
//! absence into a failure, `optional` is a marker that is stripped before
//! dispatch and has no further effect.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RuleNameError;

/// Separator between tokens in a tag.
pub const RULE_SEPARATOR: char = '|';

/// Separator between a rule name and its argument list.
pub const ARGS_DELIMITER: char = ':';

/// Separator between arguments.
pub const ARG_SEPARATOR: char = ',';

/// Prefix marking a token as applying to each array element.
pub const ITERATIVE_PREFIX: &str = "[]";

/// Tag segment excluding a field and all of its descendants.
pub const EXCLUDE: &str = "-";

/// Presence sentinel: absence or null is a failure.
pub const REQUIRED: &str = "required";

/// Presence sentinel: documents that absence is acceptable. Never dispatched.
pub const OPTIONAL: &str = "optional";

/// One parsed rule directive, e.g. `eq:1` or `oneof:a,b`.
///
/// The raw text is preserved: failure reports list tokens exactly as they
/// were written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct RuleToken {
    raw: String,
    name_len: usize,
    args: Vec<String>,
}

impl RuleToken {
    /// Parse a single token. Never fails: everything before the first `:` is
    /// the name, everything after it is split on `,` into arguments.
    pub fn parse(raw: &str) -> Self {
        let (name_len, args) = match raw.find(ARGS_DELIMITER) {
            Some(pos) => (
                pos,
                raw[pos + 1..]
                    .split(ARG_SEPARATOR)
                    .map(str::to_string)
                    .collect(),
            ),
            None => (raw.len(), Vec::new()),
        };
        Self {
            raw: raw.to_string(),
            name_len,
            args,
        }
    }

    /// The base rule name used for handler lookup.
    pub fn name(&self) -> &str {
        &self.raw[..self.name_len]
    }

    /// Arguments following the `:` delimiter, in order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The token exactly as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// True for `required` and `optional`.
    pub fn is_presence_sentinel(&self) -> bool {
        is_presence_sentinel(self.name())
    }

    /// True for `required`.
    pub fn is_required(&self) -> bool {
        self.name() == REQUIRED
    }
}

/// True if `name` is one of the presence sentinels.
pub fn is_presence_sentinel(name: &str) -> bool {
    name == REQUIRED || name == OPTIONAL
}

/// Check that `name` can be registered as a rule handler name.
///
/// A name must be non-empty and must not contain the grammar's own
/// delimiters, otherwise tokens naming it could never be parsed back.
pub fn validate_rule_name(name: &str) -> Result<(), RuleNameError> {
    if name.is_empty() {
        return Err(RuleNameError::Empty);
    }
    for reserved in [ARGS_DELIMITER, RULE_SEPARATOR] {
        if name.contains(reserved) {
            return Err(RuleNameError::ReservedCharacter {
                name: name.to_string(),
                character: reserved,
            });
        }
    }
    Ok(())
}

impl fmt::Display for RuleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<String> for RuleToken {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<&str> for RuleToken {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<RuleToken> for String {
    fn from(token: RuleToken) -> Self {
        token.raw
    }
}
