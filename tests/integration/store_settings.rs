//! Integration tests for store settings layering

use super::test_utils::with_isolated_env;
use scc_config::settings::{user_settings_path, StoreSettings};
use scc_config::store::BackendKind;
use scc_config::{ConfigError, ConfigStore};
use std::path::PathBuf;

#[test]
fn test_defaults_without_any_source() {
    with_isolated_env(|_| {
        let settings = StoreSettings::load().unwrap();
        assert_eq!(settings.backend, BackendKind::platform_default());
        assert!(settings.path.is_none());
    });
}

#[test]
fn test_user_file_is_picked_up() {
    with_isolated_env(|temp_dir| {
        let user_file = user_settings_path().unwrap();
        assert!(user_file.starts_with(temp_dir.path()));
        std::fs::create_dir_all(user_file.parent().unwrap()).unwrap();
        std::fs::write(
            &user_file,
            r#"
backend = "flat"
path = "/var/lib/scc/config.db"
"#,
        )
        .unwrap();

        let settings = StoreSettings::load().unwrap();
        assert_eq!(settings.backend, BackendKind::Flat);
        assert_eq!(settings.store_path(), PathBuf::from("/var/lib/scc/config.db"));
    });
}

#[test]
fn test_explicit_file_overrides_user_file() {
    with_isolated_env(|temp_dir| {
        let user_file = user_settings_path().unwrap();
        std::fs::create_dir_all(user_file.parent().unwrap()).unwrap();
        std::fs::write(&user_file, "backend = \"flat\"\n").unwrap();

        let explicit = temp_dir.path().join("store.toml");
        std::fs::write(&explicit, "backend = \"document\"\n").unwrap();

        let settings = StoreSettings::load_from_file(&explicit).unwrap();
        assert_eq!(settings.backend, BackendKind::Document);
    });
}

#[test]
fn test_environment_overrides_files() {
    with_isolated_env(|temp_dir| {
        let explicit = temp_dir.path().join("store.toml");
        std::fs::write(&explicit, "backend = \"document\"\n").unwrap();

        let db_path = temp_dir.path().join("env.db");
        std::env::set_var("SCC_STORE_BACKEND", "flat");
        std::env::set_var("SCC_STORE_PATH", &db_path);

        let settings = StoreSettings::load_from_file(&explicit).unwrap();
        assert_eq!(settings.backend, BackendKind::Flat);
        assert_eq!(settings.store_path(), db_path);
    });
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    with_isolated_env(|temp_dir| {
        let result = StoreSettings::load_from_file(&temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Settings(_))));
    });
}

#[test]
fn test_open_from_settings() {
    with_isolated_env(|temp_dir| {
        let settings = StoreSettings::new(BackendKind::Flat, temp_dir.path().join("store.db"));
        let mut store = ConfigStore::open(&settings).unwrap();
        assert_eq!(store.kind(), BackendKind::Flat);
        assert_eq!(store.get_int("recent_max").unwrap(), 10);
        store.close().unwrap();

        let settings =
            StoreSettings::new(BackendKind::Document, temp_dir.path().join("config.json"));
        let store = ConfigStore::open(&settings).unwrap();
        assert_eq!(store.kind(), BackendKind::Document);
    });
}
