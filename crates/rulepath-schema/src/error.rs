//! # Schema Errors
//!
//! Build-time problems are collected, not reported one at a time: a schema
//! with three dangling references fails once, listing all three.

use std::fmt;

use thiserror::Error;

/// Error building or loading a schema.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The type description is inconsistent.
    #[error("invalid schema ({} problem(s)):\n{problems}", .problems.len())]
    Invalid {
        /// Every problem found.
        problems: SchemaProblems,
    },

    /// A descriptor file could not be read or parsed.
    #[error("schema load error for '{path}': {reason}")]
    Load {
        /// Path of the descriptor.
        path: String,
        /// Reason the descriptor could not be loaded.
        reason: String,
    },
}

/// A single build-time problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaProblem {
    /// A named type is referenced but absent from the catalog.
    DanglingReference {
        /// The missing catalog key.
        name: String,
        /// Where the reference appears (`<root>` or a catalog key).
        referenced_from: String,
    },

    /// A field carries `[]` rules but is not an array.
    IterativeOnNonSlice {
        /// Owning type (`<root>`, a catalog key, or a path into either).
        owner: String,
        /// Declared field name.
        field: String,
    },

    /// Two fields of one struct collapse onto the same path segment.
    DuplicateField {
        /// Owning type.
        owner: String,
        /// The shared segment.
        segment: String,
    },
}

impl fmt::Display for SchemaProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingReference {
                name,
                referenced_from,
            } => write!(f, "  {referenced_from}: unknown type '{name}'"),
            Self::IterativeOnNonSlice { owner, field } => {
                write!(f, "  {owner}.{field}: element rules on a non-array field")
            }
            Self::DuplicateField { owner, segment } => {
                write!(f, "  {owner}: more than one field maps to '{segment}'")
            }
        }
    }
}

/// Collection of build-time problems.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaProblems {
    problems: Vec<SchemaProblem>,
}

impl SchemaProblems {
    pub(crate) fn push(&mut self, problem: SchemaProblem) {
        self.problems.push(problem);
    }

    /// Returns the number of problems.
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    /// Returns true if there are no problems.
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// Returns a slice of all problems.
    pub fn problems(&self) -> &[SchemaProblem] {
        &self.problems
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<SchemaProblem> {
        self.problems
    }
}

impl fmt::Display for SchemaProblems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, problem) in self.problems.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{problem}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_lists_every_problem() {
        let mut problems = SchemaProblems::default();
        problems.push(SchemaProblem::DanglingReference {
            name: "Missing".into(),
            referenced_from: "<root>".into(),
        });
        problems.push(SchemaProblem::DuplicateField {
            owner: "User".into(),
            segment: "userId".into(),
        });
        let msg = SchemaError::Invalid { problems }.to_string();
        assert!(msg.starts_with("invalid schema (2 problem(s)):"));
        assert!(msg.contains("<root>: unknown type 'Missing'"));
        assert!(msg.contains("User: more than one field maps to 'userId'"));
    }
}
