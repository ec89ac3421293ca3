//! Property-based tests for path handling

use proptest::prelude::*;
use scc_config::path::ConfigPath;
use scc_config::{last_element, ConfigError, ConfigStore, ValueType, MAX_PATH_LEN};
use std::cell::RefCell;
use tempfile::TempDir;

/// Any path over the bound is refused by every accessor, never truncated
#[test]
fn test_overlong_paths_always_refused() {
    let temp_dir = TempDir::new().unwrap();
    let store = RefCell::new(
        ConfigStore::open_document(temp_dir.path().join("config.json")).unwrap(),
    );
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &"[a-z/]{257,400}",
            |path| {
                let mut store = store.borrow_mut();
                prop_assert!(matches!(
                    ConfigPath::parse(&path),
                    Err(ConfigError::PathTooLong { .. })
                ), "expected PathTooLong");
                prop_assert!(matches!(
                    store.get_default(&path),
                    Err(ConfigError::PathTooLong { .. })
                ), "expected PathTooLong");
                for value_type in ValueType::ALL {
                    prop_assert!(matches!(
                        store.get_value(&path, value_type),
                        Err(ConfigError::PathTooLong { .. })
                    ), "expected PathTooLong");
                }
                prop_assert!(matches!(
                    store.set_int(&path, 1),
                    Err(ConfigError::PathTooLong { .. })
                ), "expected PathTooLong");
                Ok(())
            },
        )
        .unwrap();
}

/// Paths within the bound parse, and normalization never lengthens them
#[test]
fn test_bounded_paths_accepted() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&"[a-z_/]{0,256}", |path| {
            let parsed = ConfigPath::parse(&path).unwrap();
            prop_assert!(parsed.as_str().len() <= path.len());
            prop_assert!(parsed.as_str().len() <= MAX_PATH_LEN);
            Ok(())
        })
        .unwrap();
}

/// last_element is the suffix after the final separator
#[test]
fn test_last_element_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&"[a-z/]{0,64}", |path| {
            let leaf = last_element(&path);
            prop_assert!(!leaf.contains('/'));
            prop_assert!(path.ends_with(leaf));
            if !path.contains('/') {
                prop_assert_eq!(leaf, path.as_str());
            } else {
                prop_assert_eq!(path.len() - leaf.len() - 1, path.rfind('/').unwrap());
            }
            Ok(())
        })
        .unwrap();
}
