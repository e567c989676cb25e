//! # Compiled Rule Schema
//!
//! A [`RuleSchema`] is the extracted path → rules map together with the
//! annotation key it was read under. Build it once per type and share it;
//! it is immutable and `Send + Sync`.

use rulepath_core::{PathKey, RuleToken, SchemaMap};

use crate::check::check;
use crate::error::SchemaError;
use crate::extract::extract;
use crate::types::{Describe, TypeSchema};

/// The rule map of one target type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSchema {
    tag_key: String,
    rules: SchemaMap,
}

impl RuleSchema {
    /// Check `schema`, then extract its rules.
    pub fn build(schema: &TypeSchema, tag_key: &str) -> Result<Self, SchemaError> {
        check(schema, tag_key)?;
        Ok(Self::unchecked(schema, tag_key))
    }

    /// Extract without the build-time checks. Dangling references become
    /// leaves and element rules on non-arrays never match any data.
    pub fn unchecked(schema: &TypeSchema, tag_key: &str) -> Self {
        Self {
            tag_key: tag_key.to_string(),
            rules: extract(schema, tag_key),
        }
    }

    /// Build the schema of a [`Describe`] type.
    pub fn of<T: Describe>(tag_key: &str) -> Result<Self, SchemaError> {
        Self::build(&T::type_schema(), tag_key)
    }

    /// Wrap an already extracted map.
    pub fn from_rules(tag_key: impl Into<String>, rules: SchemaMap) -> Self {
        Self {
            tag_key: tag_key.into(),
            rules,
        }
    }

    /// The annotation key the rules were read under.
    pub fn tag_key(&self) -> &str {
        &self.tag_key
    }

    /// The path → rules map.
    pub fn rules(&self) -> &SchemaMap {
        &self.rules
    }

    /// Rules declared at `path`.
    pub fn get(&self, path: &str) -> Option<&[RuleToken]> {
        self.rules.get(path).map(Vec::as_slice)
    }

    /// Iterate over paths and their rules in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&PathKey, &[RuleToken])> {
        self.rules.iter().map(|(path, rules)| (path, rules.as_slice()))
    }

    /// Number of annotated paths.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True if no path carries rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Consume and return the map.
    pub fn into_rules(self) -> SchemaMap {
        self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldDef, TypeDef};

    struct Tagged;

    impl Describe for Tagged {
        fn type_schema() -> TypeSchema {
            TypeSchema::new(TypeDef::structure([
                FieldDef::new("Name", TypeDef::scalar()).tag("validate", "required|min:2"),
                FieldDef::new("Scores", TypeDef::slice(TypeDef::scalar()))
                    .tag("validate", "[]gte:0")
                    .tag("strict", "required"),
            ]))
        }
    }

    #[test]
    fn of_describe_type() {
        let schema = RuleSchema::of::<Tagged>("validate").unwrap();
        assert_eq!(schema.tag_key(), "validate");
        assert_eq!(schema.len(), 2);
        let name: Vec<_> = schema.get("name").unwrap().iter().map(RuleToken::as_str).collect();
        assert_eq!(name, ["required", "min:2"]);
        assert_eq!(schema.get("scores.*").unwrap()[0].as_str(), "gte:0");
        assert!(schema.get("scores").is_none());
    }

    #[test]
    fn tag_key_selects_annotations() {
        let schema = RuleSchema::of::<Tagged>("strict").unwrap();
        let paths: Vec<_> = schema.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(paths, ["scores"]);
    }

    #[test]
    fn build_rejects_what_unchecked_accepts() {
        let schema = TypeSchema::new(TypeDef::structure([
            FieldDef::new("Name", TypeDef::scalar()).tag("validate", "[]eq:1")
        ]));
        assert!(matches!(
            RuleSchema::build(&schema, "validate"),
            Err(SchemaError::Invalid { .. })
        ));

        let loose = RuleSchema::unchecked(&schema, "validate");
        assert_eq!(loose.get("name.*").unwrap()[0].as_str(), "eq:1");
    }

    #[test]
    fn from_rules_round_trips_map() {
        let mut map = SchemaMap::new();
        map.insert(PathKey::new("a"), vec![RuleToken::parse("required")]);
        let schema = RuleSchema::from_rules("v", map.clone());
        assert!(!schema.is_empty());
        assert_eq!(schema.into_rules(), map);
    }
}
