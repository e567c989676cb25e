//! # Build-Time Schema Checks
//!
//! Extraction is tolerant: it never fails, and it cannot tell a deliberate
//! leaf from a typo in a type name. [`check`] inspects the whole description
//! up front and reports every inconsistency at once.
//!
//! Each definition is inspected exactly once, without following named
//! references, so cyclic catalogs need no guard here.

use std::collections::{BTreeMap, BTreeSet};

use rulepath_core::to_camel;

use crate::error::{SchemaError, SchemaProblem, SchemaProblems};
use crate::tags::parse_field_rules;
use crate::types::{FieldDef, TypeDef, TypeSchema};

const ROOT_OWNER: &str = "<root>";

/// Reject dangling references, element rules on non-array fields and
/// duplicate path segments.
pub fn check(schema: &TypeSchema, tag_key: &str) -> Result<(), SchemaError> {
    let checker = Checker { schema, tag_key };
    let mut problems = SchemaProblems::default();

    checker.def(schema.root(), ROOT_OWNER, ROOT_OWNER, &mut problems);
    for (name, def) in &schema.types {
        checker.def(def, name, name, &mut problems);
    }

    if problems.is_empty() {
        Ok(())
    } else {
        tracing::debug!(problems = problems.len(), "schema check failed");
        Err(SchemaError::Invalid { problems })
    }
}

struct Checker<'s> {
    schema: &'s TypeSchema,
    tag_key: &'s str,
}

impl Checker<'_> {
    /// `owner` names the struct being inspected; `origin` names the catalog
    /// entry (or root) it lives in.
    fn def(&self, ty: &TypeDef, owner: &str, origin: &str, out: &mut SchemaProblems) {
        match ty {
            TypeDef::Scalar => {}
            TypeDef::Named { name } => {
                if self.schema.resolve(name).is_none() {
                    out.push(SchemaProblem::DanglingReference {
                        name: name.clone(),
                        referenced_from: origin.to_string(),
                    });
                }
            }
            TypeDef::Pointer { to } => self.def(to, owner, origin, out),
            TypeDef::Slice { of } => self.def(of, owner, origin, out),
            TypeDef::Struct { fields } => self.fields(fields, owner, origin, out),
        }
    }

    fn fields(&self, fields: &[FieldDef], owner: &str, origin: &str, out: &mut SchemaProblems) {
        let mut seen: BTreeMap<String, usize> = BTreeMap::new();

        for field in fields {
            let rules = field
                .tag_value(self.tag_key)
                .map(parse_field_rules)
                .unwrap_or_default();
            if rules.excluded {
                continue;
            }

            let segment = to_camel(&field.name);
            *seen.entry(segment.clone()).or_default() += 1;

            if !rules.each.is_empty() && !self.is_slice(&field.ty) {
                out.push(SchemaProblem::IterativeOnNonSlice {
                    owner: owner.to_string(),
                    field: field.name.clone(),
                });
            }

            let nested = format!("{owner}.{segment}");
            self.def(&field.ty, &nested, origin, out);
        }

        for (segment, count) in seen {
            if count > 1 {
                out.push(SchemaProblem::DuplicateField {
                    owner: owner.to_string(),
                    segment,
                });
            }
        }
    }

    /// True if `ty`, after one pointer dereference and named resolution, is
    /// an array. A dangling name counts as an array so it is reported once.
    fn is_slice(&self, ty: &TypeDef) -> bool {
        let mut current = ty.deref_once();
        let mut visited = BTreeSet::new();
        while let TypeDef::Named { name } = current {
            if !visited.insert(name.as_str()) {
                return false;
            }
            match self.schema.resolve(name) {
                Some(def) => current = def.deref_once(),
                None => return true,
            }
        }
        matches!(current, TypeDef::Slice { .. })
    }
}
