//! # Type Descriptions
//!
//! Rules live on fields of a target type. Rust has no runtime field
//! reflection, so the target type is described explicitly as a tree of
//! [`TypeDef`] nodes:
//!
//! - [`TypeDef::Scalar`]: a leaf (number, string, bool, or anything whose
//!   inside is not walked).
//! - [`TypeDef::Struct`]: an anonymous struct with ordered fields.
//! - [`TypeDef::Pointer`]: an indirection. The extractor dereferences one
//!   level only.
//! - [`TypeDef::Slice`]: a homogeneous array; its element type is walked
//!   once, as a representative of every element.
//! - [`TypeDef::Named`]: a reference into the catalog of a [`TypeSchema`].
//!
//! Named types are the only nodes with an identity, and the only way to
//! express a recursive type (`Node { children: Vec<Node> }`).
//!
//! ## Serialized Form
//!
//! Nodes are tagged by `kind`, which makes descriptors pleasant to write in
//! YAML:
//!
//! ```yaml
//! root: { kind: named, name: Order }
//! types:
//!   Order:
//!     kind: struct
//!     fields:
//!       - name: Id
//!         type: { kind: scalar }
//!         tags: { validate: "required" }
//!       - name: Lines
//!         type: { kind: slice, of: { kind: named, name: Line } }
//!         tags: { validate: "required|min:1" }
//!   Line:
//!     kind: struct
//!     fields:
//!       - name: Sku
//!         type: { kind: scalar }
//!         tags: { validate: "required|len:8" }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One node of a type description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDef {
    /// A leaf value.
    Scalar,

    /// An anonymous struct.
    Struct {
        /// Fields in declaration order.
        #[serde(default)]
        fields: Vec<FieldDef>,
    },

    /// A single level of indirection.
    Pointer {
        /// The pointee.
        to: Box<TypeDef>,
    },

    /// A homogeneous array.
    Slice {
        /// The element type.
        of: Box<TypeDef>,
    },

    /// A reference to a catalog entry. The name is the type's identity.
    Named {
        /// Catalog key.
        name: String,
    },
}

impl TypeDef {
    /// A leaf.
    pub fn scalar() -> Self {
        Self::Scalar
    }

    /// An anonymous struct with the given fields.
    pub fn structure(fields: impl IntoIterator<Item = FieldDef>) -> Self {
        Self::Struct {
            fields: fields.into_iter().collect(),
        }
    }

    /// A pointer to `to`.
    pub fn pointer(to: TypeDef) -> Self {
        Self::Pointer { to: Box::new(to) }
    }

    /// An array of `of`.
    pub fn slice(of: TypeDef) -> Self {
        Self::Slice { of: Box::new(of) }
    }

    /// A reference to the catalog entry `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named { name: name.into() }
    }

    /// The stable identity used for cycle detection. Only named types have one.
    pub fn identity(&self) -> Option<&str> {
        match self {
            Self::Named { name } => Some(name),
            _ => None,
        }
    }

    /// Strip one level of pointer indirection, if any.
    pub fn deref_once(&self) -> &TypeDef {
        match self {
            Self::Pointer { to } => to,
            other => other,
        }
    }

    /// Short lowercase name of the node kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Struct { .. } => "struct",
            Self::Pointer { .. } => "pointer",
            Self::Slice { .. } => "slice",
            Self::Named { .. } => "named",
        }
    }
}

/// One field of a struct: its declared name, its type and its annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Declared name, in any case convention (`NestedFieldA`, `nested_field_a`).
    pub name: String,

    /// Field type.
    #[serde(rename = "type")]
    pub ty: TypeDef,

    /// Annotation key → raw annotation string (`validate` → `required|len:3`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl FieldDef {
    /// A field without annotations.
    pub fn new(name: impl Into<String>, ty: TypeDef) -> Self {
        Self {
            name: name.into(),
            ty,
            tags: BTreeMap::new(),
        }
    }

    /// Add (or replace) the annotation under `key`.
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// The raw annotation under `key`, if present.
    pub fn tag_value(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

/// A complete type description: the target type plus every named type it
/// can reach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSchema {
    /// The target type.
    pub root: TypeDef,

    /// Named types, keyed by identity.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub types: BTreeMap<String, TypeDef>,
}

impl TypeSchema {
    /// A schema with an empty catalog.
    pub fn new(root: TypeDef) -> Self {
        Self {
            root,
            types: BTreeMap::new(),
        }
    }

    /// A schema whose root is the catalog entry `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(TypeDef::named(name))
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn define(mut self, name: impl Into<String>, def: TypeDef) -> Self {
        self.insert(name, def);
        self
    }

    /// Add a named type, returning the definition it replaced.
    pub fn insert(&mut self, name: impl Into<String>, def: TypeDef) -> Option<TypeDef> {
        self.types.insert(name.into(), def)
    }

    /// Look up a named type.
    pub fn resolve(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    /// The target type.
    pub fn root(&self) -> &TypeDef {
        &self.root
    }
}

/// Types that can describe their own shape.
///
/// This is the explicit replacement for runtime reflection: the
/// implementation spells out fields, nesting and annotations once, and the
/// result is compiled into rules by [`RuleSchema`](crate::RuleSchema).
///
/// ```
/// use rulepath_schema::{Describe, FieldDef, TypeDef, TypeSchema};
///
/// struct Login {
///     user: String,
/// }
///
/// impl Describe for Login {
///     fn type_schema() -> TypeSchema {
///         TypeSchema::named("Login").define(
///             "Login",
///             TypeDef::structure([
///                 FieldDef::new("user", TypeDef::scalar()).tag("validate", "required|min:3"),
///             ]),
///         )
///     }
/// }
///
/// assert!(Login::type_schema().resolve("Login").is_some());
/// ```
pub trait Describe {
    /// The full type description of `Self`.
    fn type_schema() -> TypeSchema;
}
