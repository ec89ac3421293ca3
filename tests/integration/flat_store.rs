//! Integration tests for the flat (sled) store

use scc_config::defaults;
use scc_config::path::ConfigPath;
use scc_config::store::flat::{decode, subkey_name};
use scc_config::store::{BackingStore, FlatStore};
use scc_config::{ConfigError, ConfigStore, Value, ValueType, MAX_ARRAY_SIZE};
use tempfile::TempDir;

#[test]
fn test_default_reads_are_cached() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = FlatStore::open(temp_dir.path()).unwrap();
    let path = ConfigPath::parse("osd_colors/background").unwrap();
    let default = defaults::lookup(path.as_str());

    let first = store.resolve(&path, default).unwrap().unwrap().to_value();
    let reads_after_first = store.native_reads();
    let second = store.resolve(&path, default).unwrap().unwrap().to_value();

    assert_eq!(first, second);
    assert_eq!(first, Some(Value::String("101010".to_string())));
    assert_eq!(store.native_reads(), reads_after_first);
}

#[test]
fn test_explicit_reads_are_cached() {
    let temp_dir = TempDir::new().unwrap();
    {
        let mut store = ConfigStore::open_flat(temp_dir.path()).unwrap();
        store.set_str("controllers/sc1/name", "Left").unwrap();
        store.close().unwrap();
    }

    let mut store = FlatStore::open(temp_dir.path()).unwrap();
    let path = ConfigPath::parse("controllers/sc1/name").unwrap();
    for _ in 0..3 {
        let value = store.resolve(&path, None).unwrap().unwrap();
        assert_eq!(value.as_str().unwrap(), "Left");
    }
    assert_eq!(store.native_reads(), 1);
}

#[test]
fn test_round_trip_every_type_across_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let written = vec![
        ("custom/string", Value::String("hello".to_string())),
        (
            "custom/array",
            Value::StringArray((0..MAX_ARRAY_SIZE).map(|i| i.to_string()).collect()),
        ),
        ("custom/int", Value::Int(0x045e)),
        ("custom/double", Value::Double(-0.25)),
        ("custom/bool", Value::Bool(true)),
        ("top_level", Value::Int(1)),
    ];

    {
        let mut store = ConfigStore::open_flat(temp_dir.path()).unwrap();
        for (path, value) in &written {
            store.set_value(path, value.clone()).unwrap();
        }
        store.close().unwrap();
    }

    let mut store = ConfigStore::open_flat(temp_dir.path()).unwrap();
    for (path, value) in &written {
        let read = store.get_value(path, value.value_type()).unwrap();
        assert_eq!(read.to_value().as_ref(), Some(value), "{}", path);
        for other in ValueType::ALL {
            if other != value.value_type() {
                assert!(matches!(
                    store.get_value(path, other),
                    Err(ConfigError::TypeMismatch { .. })
                ));
            }
        }
    }
}

#[test]
fn test_native_layout_follows_subkeys() {
    let temp_dir = TempDir::new().unwrap();
    {
        let mut store = ConfigStore::open_flat(temp_dir.path()).unwrap();
        store.set_int("output/vendor", 0x054c).unwrap();
        store.close().unwrap();
    }

    let db = sled::open(temp_dir.path()).unwrap();
    let tree = db.open_tree(subkey_name("output").unwrap()).unwrap();
    let raw = tree.get("vendor").unwrap().unwrap();
    assert_eq!(decode(&raw).unwrap(), Value::Int(0x054c));
}

#[test]
fn test_oversized_array_on_disk_is_refused() {
    let temp_dir = TempDir::new().unwrap();
    {
        let db = sled::open(temp_dir.path()).unwrap();
        let tree = db.open_tree(subkey_name("").unwrap()).unwrap();
        let items: Vec<String> = (0..=MAX_ARRAY_SIZE).map(|i| i.to_string()).collect();
        let mut raw = vec![ValueType::StringArray.code()];
        raw.extend(bincode::serialize(&items).unwrap());
        tree.insert("recent_profiles", raw).unwrap();
        db.flush().unwrap();
    }

    let mut store = ConfigStore::open_flat(temp_dir.path()).unwrap();
    assert!(matches!(
        store.get_strings("recent_profiles"),
        Err(ConfigError::ArrayTooLarge { len: 257, .. })
    ));
}

#[test]
fn test_keys_and_delete_subtree() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = ConfigStore::open_flat(temp_dir.path()).unwrap();
    store.set_str("controllers/sc1/name", "Left").unwrap();
    store.set_str("controllers/sc1/profile", "Desktop").unwrap();
    store.set_str("controllers/ds4/name", "Right").unwrap();

    assert_eq!(store.keys("controllers").unwrap(), vec!["ds4", "sc1"]);
    assert_eq!(store.keys("controllers/sc1").unwrap(), vec!["name", "profile"]);

    assert!(store.delete_key("controllers/sc1").unwrap());
    assert_eq!(store.keys("controllers").unwrap(), vec!["ds4"]);
    assert!(matches!(
        store.get_str("controllers/sc1/name"),
        Err(ConfigError::NotFound(_))
    ));
}

#[test]
fn test_backslash_paths_refused() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = ConfigStore::open_flat(temp_dir.path()).unwrap();
    assert!(matches!(
        store.set_int("a\\b", 1),
        Err(ConfigError::InvalidPath(_))
    ));
}

#[test]
fn test_derived_subkey_name_respects_path_bound() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = ConfigStore::open_flat(temp_dir.path()).unwrap();

    // 252-byte path whose subkey name would be 257 bytes
    let long = format!("{}/y", "x".repeat(250));
    assert!(matches!(
        store.set_int(&long, 1),
        Err(ConfigError::PathTooLong { len: 257, .. })
    ));
    assert!(matches!(
        store.get_int(&long),
        Err(ConfigError::PathTooLong { .. })
    ));
    assert!(matches!(
        store.delete_key(&long),
        Err(ConfigError::PathTooLong { .. })
    ));

    // Largest parent whose subkey name still fits
    let fits = format!("{}/y", "x".repeat(249));
    store.set_int(&fits, 2).unwrap();
    assert_eq!(store.get_int(&fits).unwrap(), 2);
}
