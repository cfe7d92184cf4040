//! Shared test tooling for the ddp crates
//!
//! Proptest strategies for generating arbitrary JSON documents of the shape
//! donated export files take, and a re-nesting helper that rebuilds a tree
//! from a flattened record so round-trip laws can be asserted.

use ddp_core::flatten::{FlatRecord, LeafValue};
use ddp_core::path::PathSegment;
use proptest::prelude::*;
use serde_json::{Map, Value};

/// Strategy producing an arbitrary JSON leaf scalar.
pub fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-z0-9 ]{0,12}".prop_map(Value::String),
    ]
}

/// Strategy producing an arbitrary JSON document.
///
/// Trees nest up to depth 6 with non-empty objects and arrays, matching
/// what the flatten round-trip law is specified over: an empty container
/// has no leaves and therefore cannot survive a flatten/re-nest cycle.
pub fn arb_json_tree() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(6, 64, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..5).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,8}", inner, 1..5)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Rebuild a JSON tree from a flattened record by inserting every leaf
/// along its recorded path.
///
/// The inverse of `ddp_core::flatten` for documents without empty
/// containers. Array slots that were never filled stay `null`; a record
/// flattened from one document never produces such gaps.
pub fn renest(record: &FlatRecord) -> Value {
    let mut root = Value::Null;
    for entry in record.entries() {
        insert(&mut root, entry.path.segments(), &entry.value);
    }
    root
}

fn insert(node: &mut Value, segments: &[PathSegment], leaf: &LeafValue) {
    match segments.split_first() {
        None => *node = leaf_to_value(leaf),
        Some((PathSegment::Key(key), rest)) => {
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            let map = node.as_object_mut().expect("node was just made an object");
            let child = map.entry(key.clone()).or_insert(Value::Null);
            insert(child, rest, leaf);
        }
        Some((PathSegment::Index(index), rest)) => {
            if !node.is_array() {
                *node = Value::Array(Vec::new());
            }
            let items = node.as_array_mut().expect("node was just made an array");
            while items.len() <= *index {
                items.push(Value::Null);
            }
            insert(&mut items[*index], rest, leaf);
        }
    }
}

/// Convert a flattened leaf back to a `serde_json::Value`.
pub fn leaf_to_value(leaf: &LeafValue) -> Value {
    match leaf {
        LeafValue::Null => Value::Null,
        LeafValue::Bool(b) => Value::Bool(*b),
        LeafValue::Number(n) => Value::Number(n.clone()),
        LeafValue::String(s) => Value::String(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddp_core::flatten::flatten;
    use serde_json::json;

    #[test]
    fn test_renest_simple_document() {
        let doc = json!({"a": [1, {"b": "x"}], "c": null});
        let record = flatten(&doc, false);
        assert_eq!(renest(&record), doc);
    }

    #[test]
    fn test_renest_bare_scalar() {
        let doc = json!(42);
        let record = flatten(&doc, false);
        assert_eq!(renest(&record), doc);
    }
}
