//! # Tag Parsing
//!
//! Turns one raw annotation string into the rules it declares for a field.
//!
//! Annotations are tolerated rather than policed: empty segments, stray
//! separators and surrounding whitespace are silently dropped so that
//! partial or legacy annotations keep working.

use rulepath_core::{RuleToken, EXCLUDE, ITERATIVE_PREFIX, RULE_SEPARATOR};

/// The rules one field annotation declares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRules {
    /// The annotation contained the exclusion sentinel. When set, the other
    /// lists are empty and the field must be skipped with its descendants.
    pub excluded: bool,
    /// Rules for the field itself.
    pub own: Vec<RuleToken>,
    /// Rules for every element of the field (`[]`-prefixed tokens).
    pub each: Vec<RuleToken>,
}

impl FieldRules {
    /// The exclusion result.
    pub fn excluded() -> Self {
        Self {
            excluded: true,
            ..Self::default()
        }
    }

    /// True if the annotation declared nothing.
    pub fn is_empty(&self) -> bool {
        self.own.is_empty() && self.each.is_empty()
    }
}

/// Parse a raw annotation such as `required|len:3|[]oneof:a,b`.
pub fn parse_field_rules(raw: &str) -> FieldRules {
    let mut rules = FieldRules::default();

    for segment in raw.split(RULE_SEPARATOR).map(str::trim) {
        if segment.is_empty() {
            continue;
        }
        if segment == EXCLUDE {
            return FieldRules::excluded();
        }
        match segment.strip_prefix(ITERATIVE_PREFIX) {
            Some(inner) => {
                let inner = inner.trim();
                if !inner.is_empty() {
                    rules.each.push(RuleToken::parse(inner));
                }
            }
            None => rules.own.push(RuleToken::parse(segment)),
        }
    }

    rules
}
