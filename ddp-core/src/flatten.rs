//! Structural flattening of JSON documents
//!
//! Projects a nested [`serde_json::Value`] into a flat, ordered collection
//! of path→leaf entries. Entries are emitted in strict pre-order following
//! document key order (`serde_json` is built with `preserve_order`), so the
//! emission order is deterministic and reproducible across runs. One
//! implementation serves every platform module.

use serde_json::Value;

use crate::path::JsonPath;
use crate::scalar::{self, LeafClasses};

/// Tag copied from the JSON node type of a leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// JSON null
    Null,
    /// JSON boolean
    Bool,
    /// JSON number
    Number,
    /// JSON string
    String,
}

/// A leaf scalar taken from a JSON document
#[derive(Debug, Clone, PartialEq)]
pub enum LeafValue {
    /// JSON null
    Null,
    /// JSON boolean
    Bool(bool),
    /// JSON number, kept in its original representation
    Number(serde_json::Number),
    /// JSON string
    String(String),
}

impl LeafValue {
    /// The kind tag of this leaf.
    pub fn kind(&self) -> ValueKind {
        match self {
            LeafValue::Null => ValueKind::Null,
            LeafValue::Bool(_) => ValueKind::Bool,
            LeafValue::Number(_) => ValueKind::Number,
            LeafValue::String(_) => ValueKind::String,
        }
    }

    /// The string slice if this leaf is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            LeafValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Render the leaf as display text, the shape field-extraction glue
    /// hands to table builders.
    pub fn to_display_string(&self) -> String {
        match self {
            LeafValue::Null => String::new(),
            LeafValue::Bool(b) => b.to_string(),
            LeafValue::Number(n) => n.to_string(),
            LeafValue::String(s) => s.clone(),
        }
    }
}

/// One flattened leaf: its path, its value, and optional classification
#[derive(Debug, Clone, PartialEq)]
pub struct FlatEntry {
    /// Path from the document root to this leaf.
    pub path: JsonPath,
    /// The leaf value.
    pub value: LeafValue,
    /// Classification of string leaves, present only when requested.
    pub classes: Option<LeafClasses>,
}

/// Ordered collection of [`FlatEntry`] produced from exactly one document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatRecord {
    entries: Vec<FlatEntry>,
}

impl FlatRecord {
    /// The entries in emission order.
    pub fn entries(&self) -> &[FlatEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record holds no entries (the document had no leaves).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries in emission order.
    pub fn iter(&self) -> std::slice::Iter<'_, FlatEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a FlatRecord {
    type Item = &'a FlatEntry;
    type IntoIter = std::slice::Iter<'a, FlatEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Flatten a JSON document into a [`FlatRecord`].
///
/// Walks the tree depth-first in pre-order: object members in document
/// order, array elements by ascending index. Every leaf scalar emits
/// exactly one entry whose path reconstructs the key/index sequence from
/// the root; intermediate objects and arrays emit nothing. A bare scalar
/// document yields a single entry with the empty path.
///
/// With `classify_leaves` set, string leaves carry a [`LeafClasses`];
/// non-string leaves never do.
pub fn flatten(value: &Value, classify_leaves: bool) -> FlatRecord {
    let mut entries = Vec::new();
    walk(value, JsonPath::root(), classify_leaves, &mut entries);
    FlatRecord { entries }
}

fn walk(value: &Value, path: JsonPath, classify_leaves: bool, out: &mut Vec<FlatEntry>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                walk(child, path.child_key(key), classify_leaves, out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                walk(child, path.child_index(index), classify_leaves, out);
            }
        }
        Value::Null => out.push(FlatEntry {
            path,
            value: LeafValue::Null,
            classes: None,
        }),
        Value::Bool(b) => out.push(FlatEntry {
            path,
            value: LeafValue::Bool(*b),
            classes: None,
        }),
        Value::Number(n) => out.push(FlatEntry {
            path,
            value: LeafValue::Number(n.clone()),
            classes: None,
        }),
        Value::String(s) => {
            let classes = classify_leaves.then(|| scalar::classify(s));
            out.push(FlatEntry {
                path,
                value: LeafValue::String(s.clone()),
                classes,
            });
        }
    }
}
