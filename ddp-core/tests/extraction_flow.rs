//! End-to-end flow a platform module drives: filter an archive listing,
//! classify it, flatten a member document, and pull fields out of it.

use ddp_core::fingerprint::{FileFormat, Fingerprint, FingerprintRegistry, UiLanguage};
use ddp_core::flatten::flatten;
use ddp_core::{filter_by_extension, timestamp, ClassificationStatus, DEFAULT_THRESHOLD_PERCENT};
use serde_json::json;

fn instagram_registry() -> FingerprintRegistry {
    let known: Vec<String> = (0..29)
        .map(|i| format!("known_{i}.json"))
        .chain(["followers.json".to_string(), "following.json".to_string()])
        .collect();
    FingerprintRegistry::new(vec![Fingerprint::new(
        "json_en",
        FileFormat::Json,
        UiLanguage::En,
        known,
    )])
    .expect("single category")
}

#[test]
fn test_recognize_then_extract() {
    // Raw zip entry listing, as the archive collaborator hands it over.
    let raw_listing = [
        "followers_and_following/followers.json",
        "followers_and_following/following.json",
        "media/photos/1234.jpg",
        "personal_information/README.txt",
    ];
    let entry_names = filter_by_extension(raw_listing, &[".json", ".html"]);

    let registry = instagram_registry();
    let result = registry.classify(&entry_names, DEFAULT_THRESHOLD_PERCENT);
    assert_eq!(result.status, ClassificationStatus::Recognized);
    assert_eq!(result.category_id(), Some("json_en"));

    // A decoded member document, schema-drifted the way real exports are:
    // the same field lives under string_map_data in one version and at the
    // top level in another.
    let doc = json!({
        "relationships_followers": [
            {
                "string_map_data": {
                    "Username": {"value": "alice", "href": ""},
                    "Time": {"timestamp": 1650000000}
                }
            }
        ]
    });

    let record = flatten(&doc, false);
    let username = record.find_value("Username").expect("field present");
    assert_eq!(username.as_str(), Some("alice"));

    let raw_ts = record
        .find_value("timestamp")
        .expect("field present")
        .to_display_string();
    assert_eq!(
        timestamp::epoch_to_iso_lenient(raw_ts),
        "2022-04-15T05:20:00+00:00"
    );
}

#[test]
fn test_unrecognized_listing_gates_retry() {
    let entry_names = filter_by_extension(["random.json", "other.json"], &[".json"]);
    let result = instagram_registry().classify(&entry_names, DEFAULT_THRESHOLD_PERCENT);
    assert_eq!(result.status, ClassificationStatus::Unrecognized);
    assert!(result.matched.is_none());
}

#[test]
fn test_absent_field_is_not_an_error() {
    let record = flatten(&json!({"profile": {"name": "bob"}}), false);
    // The NL schema variant simply does not carry this field.
    assert!(record.find_value("Username").is_none());
}
