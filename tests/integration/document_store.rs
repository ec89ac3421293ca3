//! Integration tests for the document-backed store

use scc_config::{ConfigError, ConfigStore, Value, ValueType};
use std::fs;
use tempfile::TempDir;

fn write_config(temp_dir: &TempDir, json: &str) -> std::path::PathBuf {
    let file = temp_dir.path().join("config.json");
    fs::write(&file, json).unwrap();
    file
}

#[test]
fn test_explicit_values_win_over_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_config(
        &temp_dir,
        r#"{
            "recent_max": 3,
            "windows_opacity": 0.5,
            "osd_colors": { "text": "FF0000" },
            "recent_profiles": ["Mine"]
        }"#,
    );

    let mut store = ConfigStore::open_document(&file).unwrap();
    assert_eq!(store.get_int("recent_max").unwrap(), 3);
    assert_eq!(store.get_double("windows_opacity").unwrap(), 0.5);
    assert_eq!(store.get_str("osd_colors/text").unwrap(), "FF0000");
    assert_eq!(store.get_str("osd_colors/border").unwrap(), "00FF00");
    assert_eq!(store.get_strings("recent_profiles").unwrap(), vec!["Mine"]);
}

#[test]
fn test_stored_type_disagreeing_with_request() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_config(&temp_dir, r#"{"recent_max": "ten", "gui": {"news": 1}}"#);

    let mut store = ConfigStore::open_document(&file).unwrap();
    match store.get_value("recent_max", ValueType::Int) {
        Err(ConfigError::TypeMismatch {
            path,
            expected,
            found,
        }) => {
            assert_eq!(path, "recent_max");
            assert_eq!(expected, ValueType::Int);
            assert_eq!(found, "string");
        }
        other => panic!("Expected TypeMismatch, got {:?}", other.map(|v| v.value_type())),
    }

    // Nothing can be stored below a scalar, so the default still applies.
    assert!(store.get_bool("gui/news/enabled").unwrap());
}

#[test]
fn test_object_node_is_not_a_value() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_config(&temp_dir, r#"{"gui": {"theme": "dark"}}"#);

    let mut store = ConfigStore::open_document(&file).unwrap();
    assert!(matches!(
        store.get_value("gui", ValueType::String),
        Err(ConfigError::TypeMismatch { found, .. }) if found == "object"
    ));
}

#[test]
fn test_round_trip_every_type_across_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("config.json");

    let written = vec![
        ("custom/string", Value::String("hello".to_string())),
        (
            "custom/array",
            Value::StringArray(vec!["a".to_string(), "b".to_string()]),
        ),
        ("custom/int", Value::Int(i64::MIN)),
        ("custom/double", Value::Double(2.0)),
        ("custom/bool", Value::Bool(false)),
    ];

    let mut store = ConfigStore::open_document(&file).unwrap();
    for (path, value) in &written {
        store.set_value(path, value.clone()).unwrap();
    }
    store.close().unwrap();

    let mut store = ConfigStore::open_document(&file).unwrap();
    for (path, value) in &written {
        let read = store.get_value(path, value.value_type()).unwrap();
        assert_eq!(read.to_value().as_ref(), Some(value), "{}", path);
        for other in ValueType::ALL {
            if other != value.value_type() {
                assert!(
                    matches!(
                        store.get_value(path, other),
                        Err(ConfigError::TypeMismatch { .. })
                    ),
                    "{} read as {}",
                    path,
                    other
                );
            }
        }
    }
}

#[test]
fn test_unsaved_changes_are_dropped() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("config.json");

    {
        let mut store = ConfigStore::open_document(&file).unwrap();
        store.set_int("recent_max", 1).unwrap();
    }
    assert!(!file.exists());

    let mut store = ConfigStore::open_document(&file).unwrap();
    assert_eq!(store.get_int("recent_max").unwrap(), 10);
}

#[test]
fn test_saved_file_is_plain_json() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("config.json");

    let mut store = ConfigStore::open_document(&file).unwrap();
    store.set_bool("drivers/fake", true).unwrap();
    store.save().unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(parsed["drivers"]["fake"], serde_json::Value::Bool(true));
}

#[test]
fn test_normalized_paths_address_same_node() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = ConfigStore::open_document(temp_dir.path().join("config.json")).unwrap();
    store.set_str("/gui//theme/", "dark").unwrap();
    assert_eq!(store.get_str("gui/theme").unwrap(), "dark");
}

#[test]
fn test_broken_file_fails_open() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_config(&temp_dir, "{\"recent_max\": ");
    assert!(matches!(
        ConfigStore::open_document(&file),
        Err(ConfigError::BackingStore(_))
    ));
}

#[test]
fn test_oversized_array_in_file_is_refused() {
    let temp_dir = TempDir::new().unwrap();
    let items: Vec<String> = (0..300).map(|i| format!("profile{}", i)).collect();
    let file = write_config(
        &temp_dir,
        &serde_json::json!({ "recent_profiles": items }).to_string(),
    );

    let mut store = ConfigStore::open_document(&file).unwrap();
    assert!(matches!(
        store.get_strings("recent_profiles"),
        Err(ConfigError::ArrayTooLarge { len: 300, max: 256 })
    ));
}

#[test]
fn test_hand_written_integer_is_not_a_double() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_config(&temp_dir, r#"{"led_level": 80, "windows_opacity": 1.0}"#);

    let mut store = ConfigStore::open_document(&file).unwrap();
    assert!(matches!(
        store.get_double("led_level"),
        Err(ConfigError::TypeMismatch { found, .. }) if found == "int"
    ));
    assert_eq!(store.get_double("windows_opacity").unwrap(), 1.0);
}
