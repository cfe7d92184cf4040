//! Depth-based lookup over flattened records
//!
//! Export schemas place the same semantic field at different nesting depths
//! across app versions and locales; the shallowest placement is taken as
//! the authoritative one. Absence is a normal outcome, not an error: a
//! `None` means "this schema variant does not carry the field."

use crate::flatten::{FlatEntry, FlatRecord, LeafValue};

impl FlatRecord {
    /// Find the least-nested entry whose path matches `token`.
    ///
    /// A path matches when any of its segments contains `token` as a plain
    /// substring; `token` is opaque text, never regex syntax. Among the
    /// matches the entry with the smallest depth (segment count) wins;
    /// entries tied at the minimal depth resolve to the first one emitted.
    pub fn find(&self, token: &str) -> Option<&FlatEntry> {
        let mut best: Option<&FlatEntry> = None;
        for entry in self.entries() {
            if !entry.path.matches_token(token) {
                continue;
            }
            match best {
                // Strictly shallower wins; equal depth keeps the earlier entry.
                Some(current) if entry.path.depth() < current.path.depth() => {
                    best = Some(entry);
                }
                None => best = Some(entry),
                _ => {}
            }
        }
        best
    }

    /// All entries whose path matches `token`, in emission order.
    pub fn find_all(&self, token: &str) -> Vec<&FlatEntry> {
        self.entries()
            .iter()
            .filter(|e| e.path.matches_token(token))
            .collect()
    }

    /// The value of the least-nested match, if any.
    pub fn find_value(&self, token: &str) -> Option<&LeafValue> {
        self.find(token).map(|e| &e.value)
    }
}

#[cfg(test)]
mod tests {
    use crate::flatten::{flatten, LeafValue};
    use serde_json::json;

    #[test]
    fn test_least_nested_match_wins() {
        // "owner" appears at depth 4 and at depth 2.
        let doc = json!({
            "post": {"meta": {"author": {"owner_name": "deep"}}},
            "owner": "shallow"
        });
        let record = flatten(&doc, false);
        let value = record.find_value("owner").unwrap();
        assert_eq!(*value, LeafValue::String("shallow".to_string()));
    }

    #[test]
    fn test_equal_depth_resolves_to_first_emitted() {
        let doc: serde_json::Value =
            serde_json::from_str(r#"{"owner_first": "a", "owner_second": "b"}"#).unwrap();
        let record = flatten(&doc, false);
        assert_eq!(
            record.find_value("owner"),
            Some(&LeafValue::String("a".to_string()))
        );
    }

    #[test]
    fn test_no_match_is_absence_not_error() {
        let record = flatten(&json!({"a": 1}), false);
        assert!(record.find("owner").is_none());
        assert!(record.find_value("owner").is_none());
        assert!(record.find_all("owner").is_empty());
    }

    #[test]
    fn test_matches_on_interior_segment() {
        let doc = json!({"string_map_data": {"Time": {"timestamp": 1650000000}}});
        let record = flatten(&doc, false);
        // Token matches an interior segment, not the leaf-most one.
        assert!(record.find("map_data").is_some());
    }

    #[test]
    fn test_find_all_in_emission_order() {
        let doc = json!({
            "comments": [
                {"owner": "first"},
                {"owner": "second"}
            ]
        });
        let record = flatten(&doc, false);
        let all = record.find_all("owner");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].value, LeafValue::String("first".to_string()));
        assert_eq!(all[1].value, LeafValue::String("second".to_string()));
    }

    #[test]
    fn test_token_is_substring_not_regex() {
        let doc = json!({"a.c": 1});
        let record = flatten(&doc, false);
        // A regex engine would let "." match any character; substring
        // matching must not.
        assert!(record.find("a.c").is_some());
        assert!(record.find("abc").is_none());
    }
}
