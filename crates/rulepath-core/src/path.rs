//! # Path Keys — Dot-Delimited Addresses
//!
//! A [`PathKey`] addresses one node in either path space:
//!
//! - the **schema path space**, produced by walking a type description. Array
//!   positions are written as the wildcard segment `*`
//!   (`orders.*.sku`).
//! - the **data path space**, produced by flattening a decoded document.
//!   Array positions are concrete 0-based indices (`orders.3.sku`).
//!
//! Both spaces share one canonical form: segments joined by `.`. The empty
//! key is the root; it addresses the whole document and is never stored in a
//! schema or data map.
//!
//! ## Segments
//!
//! A segment is never split further, so a data key that itself contains a
//! `.` is indistinguishable from two nested keys. Documents with dotted keys
//! therefore address the same node as their nested equivalent.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between path segments.
pub const SEPARATOR: char = '.';

/// Segment standing for "every element of this array".
pub const WILDCARD: &str = "*";

/// A dot-delimited address in the schema or data path space.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathKey(String);

impl PathKey {
    /// The root key. Children of the root have single-segment keys.
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Wrap an already dot-joined path.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Build a key from individual segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        segments
            .into_iter()
            .fold(Self::root(), |path, segment| path.child(segment.as_ref()))
    }

    /// Returns a new key with `segment` appended.
    pub fn child(&self, segment: &str) -> Self {
        if self.0.is_empty() {
            return Self(segment.to_string());
        }
        let mut joined = String::with_capacity(self.0.len() + 1 + segment.len());
        joined.push_str(&self.0);
        joined.push(SEPARATOR);
        joined.push_str(segment);
        Self(joined)
    }

    /// Returns a new key addressing array element `index` under this key.
    pub fn index(&self, index: usize) -> Self {
        self.child(&index.to_string())
    }

    /// Returns a new key addressing every element of the array at this key.
    pub fn wildcard(&self) -> Self {
        self.child(WILDCARD)
    }

    /// True for the root key.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the segments, root first. The root key has none.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        let path = self.0.as_str();
        path.split(SEPARATOR).filter(move |_| !path.is_empty())
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// The final segment, or `None` for the root.
    pub fn last_segment(&self) -> Option<&str> {
        if self.0.is_empty() {
            return None;
        }
        self.0.rsplit(SEPARATOR).next()
    }

    /// The key with its final segment removed, or `None` for the root.
    pub fn parent(&self) -> Option<PathKey> {
        if self.0.is_empty() {
            return None;
        }
        Some(match self.0.rfind(SEPARATOR) {
            Some(pos) => Self(self.0[..pos].to_string()),
            None => Self::root(),
        })
    }

    /// True if the final segment is the wildcard (`items.*`).
    pub fn is_wildcard_terminated(&self) -> bool {
        self.last_segment() == Some(WILDCARD)
    }

    /// True if any segment is the wildcard.
    pub fn has_wildcard(&self) -> bool {
        self.segments().any(|s| s == WILDCARD)
    }

    /// The canonical dot-joined form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key, returning the canonical string.
    pub fn into_string(self) -> String {
        self.0
    }
}

/// True if `segment` is a concrete array index: non-empty, ASCII digits only.
pub fn is_index_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for PathKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PathKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PathKey {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl From<String> for PathKey {
    fn from(path: String) -> Self {
        Self(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_has_no_segments() {
        let root = PathKey::root();
        assert!(root.is_root());
        assert_eq!(root.segments().count(), 0);
        assert_eq!(root.last_segment(), None);
        assert_eq!(root.parent(), None);
    }

    #[test]
    fn child_of_root_has_no_separator() {
        assert_eq!(PathKey::root().child("name").as_str(), "name");
    }

    #[test]
    fn child_and_index_join_with_dots() {
        let key = PathKey::root().child("orders").index(3).child("sku");
        assert_eq!(key.as_str(), "orders.3.sku");
        assert_eq!(key.depth(), 3);
    }

    #[test]
    fn from_segments_matches_child_chain() {
        let key = PathKey::from_segments(["slice", "*", "justBool"]);
        assert_eq!(key, PathKey::root().child("slice").wildcard().child("justBool"));
    }

    #[test]
    fn parent_strips_last_segment() {
        let key = PathKey::new("a.b.c");
        assert_eq!(key.parent(), Some(PathKey::new("a.b")));
        assert_eq!(PathKey::new("a").parent(), Some(PathKey::root()));
    }

    #[test]
    fn wildcard_detection() {
        assert!(PathKey::new("items.*").is_wildcard_terminated());
        assert!(!PathKey::new("items.*.name").is_wildcard_terminated());
        assert!(PathKey::new("items.*.name").has_wildcard());
        assert!(!PathKey::new("items.0").has_wildcard());
    }

    #[test]
    fn index_segments() {
        assert!(is_index_segment("0"));
        assert!(is_index_segment("42"));
        assert!(!is_index_segment(""));
        assert!(!is_index_segment("*"));
        assert!(!is_index_segment("-1"));
        assert!(!is_index_segment("1a"));
    }

    #[test]
    fn borrow_allows_str_lookup() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(PathKey::new("a.b"), 1);
        assert_eq!(map.get("a.b"), Some(&1));
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&PathKey::new("a.0")).unwrap();
        assert_eq!(json, r#""a.0""#);
    }
}
