//! # Schema Path Extraction
//!
//! Walks a [`TypeSchema`] and collects every field annotation into a
//! [`SchemaMap`]: path → ordered rule tokens.
//!
//! ## Walk
//!
//! - Struct fields become path segments, converted to lower camel case.
//! - Pointers are dereferenced once.
//! - Slices are walked once through their element type; element paths use
//!   the wildcard segment (`lines.*.sku`).
//! - Named types are resolved through the catalog.
//!
//! ## Cycle Guard
//!
//! Every named type entered on the way down is pushed onto a [`TypeChain`],
//! an immutable list linked through the call stack. Before a named type is
//! entered, the chain of the *current branch* is searched; a hit stops the
//! descent. The field that closed the cycle still gets its own rules
//! recorded, its children do not.
//!
//! Because the chain is per-branch, a type reachable from two sibling fields
//! is walked fully under both. Termination follows from finite field lists,
//! one representative per slice, and a finite number of distinct names on
//! any chain.

use rulepath_core::{to_camel, PathKey, SchemaMap};

use crate::tags::parse_field_rules;
use crate::types::{FieldDef, TypeDef, TypeSchema};

/// Extract the rule map of `schema`, reading annotations under `tag_key`.
///
/// Never fails. Unresolvable named types are treated as leaves; run
/// [`check`](crate::check) first to reject them.
pub fn extract(schema: &TypeSchema, tag_key: &str) -> SchemaMap {
    let extractor = Extractor { schema, tag_key };
    let mut out = SchemaMap::new();
    extractor.walk(schema.root(), &PathKey::root(), None, &mut out);
    tracing::debug!(tag_key, paths = out.len(), "extracted schema paths");
    out
}

/// The named types entered on the current branch, innermost first.
#[derive(Debug, Clone, Copy)]
pub struct TypeChain<'a> {
    name: &'a str,
    parent: Option<&'a TypeChain<'a>>,
}

impl<'a> TypeChain<'a> {
    /// Start a chain at `name`.
    pub fn new(name: &'a str) -> Self {
        Self { name, parent: None }
    }

    /// Extend `parent` with `name`.
    pub fn push(parent: Option<&'a TypeChain<'a>>, name: &'a str) -> Self {
        Self { name, parent }
    }

    /// True if `name` was entered anywhere on this branch.
    pub fn contains(&self, name: &str) -> bool {
        let mut link = Some(self);
        while let Some(current) = link {
            if current.name == name {
                return true;
            }
            link = current.parent;
        }
        false
    }

    /// Number of named types on the branch.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut link = Some(self);
        while let Some(current) = link {
            depth += 1;
            link = current.parent;
        }
        depth
    }
}

struct Extractor<'s> {
    schema: &'s TypeSchema,
    tag_key: &'s str,
}

impl<'s> Extractor<'s> {
    /// Emit the descendants of a node whose own path is `path`.
    fn walk(
        &self,
        ty: &'s TypeDef,
        path: &PathKey,
        chain: Option<&TypeChain<'_>>,
        out: &mut SchemaMap,
    ) {
        match ty.deref_once() {
            TypeDef::Named { name } => {
                if chain.is_some_and(|c| c.contains(name)) {
                    tracing::trace!(%path, type_name = %name, "type cycle; not descending");
                    return;
                }
                let Some(def) = self.schema.resolve(name) else {
                    tracing::warn!(%path, type_name = %name, "unresolved named type treated as leaf");
                    return;
                };
                let entered = TypeChain::push(chain, name);
                self.walk(def, path, Some(&entered), out);
            }
            TypeDef::Struct { fields } => {
                for field in fields {
                    self.field(field, path, chain, out);
                }
            }
            TypeDef::Slice { of } => {
                self.walk(of, &path.wildcard(), chain, out);
            }
            // A pointer left after one dereference is not followed.
            TypeDef::Scalar | TypeDef::Pointer { .. } => {}
        }
    }

    fn field(
        &self,
        field: &'s FieldDef,
        parent: &PathKey,
        chain: Option<&TypeChain<'_>>,
        out: &mut SchemaMap,
    ) {
        let rules = field
            .tag_value(self.tag_key)
            .map(parse_field_rules)
            .unwrap_or_default();
        if rules.excluded {
            return;
        }

        let path = parent.child(&to_camel(&field.name));
        if !rules.own.is_empty() {
            out.entry(path.clone()).or_default().extend(rules.own);
        }
        if !rules.each.is_empty() {
            out.entry(path.wildcard()).or_default().extend(rules.each);
        }

        self.walk(&field.ty, &path, chain, out);
    }
}
