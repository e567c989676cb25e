//! # Data Path Flattening
//!
//! Projects a decoded document onto the data path space. Every node below
//! the root gets an entry, containers included:
//!
//! ```text
//! {"a": {"b": 1}, "c": [1, 2]}
//!
//! a   -> {"b": 1}
//! a.b -> 1
//! c   -> [1, 2]
//! c.0 -> 1
//! c.1 -> 2
//! ```
//!
//! Values are borrowed from the document, so flattening copies keys only.
//! A key that itself contains `.` lands on the same path as the equivalent
//! nesting; whichever is visited last wins.

use std::collections::BTreeMap;

use rulepath_core::PathKey;
use serde_json::Value;

/// Data path → value at that path.
pub type DataMap<'a> = BTreeMap<PathKey, &'a Value>;

/// Flatten `data`. A scalar root yields an empty map.
pub fn flatten(data: &Value) -> DataMap<'_> {
    let mut out = DataMap::new();
    descend(data, &PathKey::root(), &mut out);
    out
}

fn descend<'a>(node: &'a Value, prefix: &PathKey, out: &mut DataMap<'a>) {
    match node {
        Value::Object(map) => {
            for (key, child) in map {
                visit(child, prefix.child(key), out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                visit(child, prefix.index(index), out);
            }
        }
        _ => {}
    }
}

fn visit<'a>(node: &'a Value, path: PathKey, out: &mut DataMap<'a>) {
    descend(node, &path, out);
    out.insert(path, node);
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn document() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i32>().prop_map(Value::from),
            "[a-z]{0,6}".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 32, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    /// Number of nodes strictly below `value`.
    fn descendants(value: &Value) -> usize {
        match value {
            Value::Object(map) => map.values().map(|v| 1 + descendants(v)).sum(),
            Value::Array(items) => items.iter().map(|v| 1 + descendants(v)).sum(),
            _ => 0,
        }
    }

    proptest! {
        /// One entry per node below the root (keys here never contain dots).
        #[test]
        fn one_entry_per_node(doc in document()) {
            prop_assert_eq!(flatten(&doc).len(), descendants(&doc));
        }

        /// Every stored container holds exactly the children stored beneath it.
        #[test]
        fn containers_match_their_children(doc in document()) {
            let flat = flatten(&doc);
            for (path, value) in &flat {
                let direct = flat
                    .keys()
                    .filter(|k| k.parent().as_ref() == Some(path))
                    .count();
                let expected = match value {
                    Value::Object(map) => map.len(),
                    Value::Array(items) => items.len(),
                    _ => 0,
                };
                prop_assert_eq!(direct, expected, "at {}", path);
            }
        }
    }
}
