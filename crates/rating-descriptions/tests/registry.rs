//! Integration tests for loading rating descriptions registries.
//!
//! These tests validate parsing, structural validation, and file I/O
//! behaviour.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::fs;

use rating_descriptions::{RatingDescriptions, RatingField, RegistryError};
use rstest::rstest;
use serde_json::{Value, json};

fn full_registry() -> Value {
    let fields: serde_json::Map<String, Value> = RatingField::ALL
        .into_iter()
        .map(|field| {
            (
                field.as_str().to_owned(),
                json!({"1": "Poor", "2": "Fair", "3": "Good"}),
            )
        })
        .collect();
    json!({ "version": 1, "fields": fields })
}

fn with_field(mut registry: Value, key: &str, scale: Value) -> Value {
    registry["fields"][key] = scale;
    registry
}

fn with_version(mut registry: Value, version: u32) -> Value {
    registry["version"] = json!(version);
    registry
}

fn without_field(mut registry: Value, key: &str) -> Value {
    if let Some(fields) = registry["fields"].as_object_mut() {
        fields.remove(key);
    }
    registry
}

#[test]
fn parses_complete_registry() {
    let registry =
        RatingDescriptions::from_json(&full_registry().to_string()).expect("valid registry");

    assert_eq!(registry.version(), 1);
    assert!(registry.contains(RatingField::Greasiness, 3));
    assert!(!registry.contains(RatingField::Greasiness, 4));
    assert_eq!(registry.label(RatingField::Aroma, 2), Some("Fair"));
}

#[rstest]
#[case::malformed_json("not valid json")]
#[case::missing_version(r#"{"fields": {}}"#)]
#[case::unknown_top_level_key(r#"{"version": 1, "fields": {}, "extra": true}"#)]
fn rejects_json_with_parse_error(#[case] json: &str) {
    let result = RatingDescriptions::from_json(json);
    assert!(matches!(result, Err(RegistryError::ParseError { .. })));
}

#[rstest]
#[case::unsupported_version(
    with_version(full_registry(), 2),
    RegistryError::UnsupportedVersion { expected: 1, actual: 2 }
)]
#[case::unknown_field(
    with_field(full_registry(), "crunchiness", json!({"1": "Soft"})),
    RegistryError::UnknownField { name: "crunchiness".to_owned() }
)]
#[case::missing_field(
    without_field(full_registry(), "sauceHeat"),
    RegistryError::MissingField { field: RatingField::SauceHeat }
)]
#[case::empty_scale(
    with_field(full_registry(), "aroma", json!({})),
    RegistryError::EmptyScale { field: RatingField::Aroma }
)]
#[case::non_numeric_point(
    with_field(full_registry(), "appearance", json!({"one": "Bad"})),
    RegistryError::InvalidScalePoint { field: RatingField::Appearance, value: "one".to_owned() }
)]
#[case::blank_label(
    with_field(full_registry(), "meatQuality", json!({"1": "  "})),
    RegistryError::EmptyLabel { field: RatingField::MeatQuality, point: 1 }
)]
fn rejects_structurally_invalid_registries(#[case] registry: Value, #[case] expected: RegistryError) {
    let result = RatingDescriptions::from_json(&registry.to_string());
    assert_eq!(result, Err(expected));
}

#[test]
fn loads_registry_from_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("ratings.json");
    fs::write(&path, full_registry().to_string()).expect("write registry");

    let registry = RatingDescriptions::from_file(&path).expect("load registry");
    assert!(registry.contains(RatingField::RecommendationScore, 1));
}

#[test]
fn reports_missing_file_with_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("missing.json");

    let result = RatingDescriptions::from_file(&path);
    assert!(matches!(
        result,
        Err(RegistryError::IoError { path: reported, .. }) if reported == path
    ));
}

#[test]
fn builtin_registry_is_shared() {
    let first = RatingDescriptions::builtin();
    let second = RatingDescriptions::builtin();
    assert!(std::ptr::eq(first, second));
}
