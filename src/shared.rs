//! Thread-shared configuration handle

use crate::config::ConfigStore;
use crate::error::ConfigError;
use crate::types::{Value, ValueType};
use parking_lot::Mutex;
use std::sync::Arc;

/// A `ConfigStore` behind a mutex.
///
/// Values cannot borrow past the lock, so reads return owned payloads.
#[derive(Clone)]
pub struct SharedConfig {
    inner: Arc<Mutex<ConfigStore>>,
}

impl SharedConfig {
    pub fn new(store: ConfigStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Run `f` with exclusive access to the store.
    pub fn with<R>(&self, f: impl FnOnce(&mut ConfigStore) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    pub fn get_value(&self, path: &str, expected: ValueType) -> Result<Value, ConfigError> {
        self.with(|store| {
            let value = store.get_value(path, expected)?;
            value
                .to_value()
                .ok_or_else(|| ConfigError::mismatch(path, expected, "untyped node"))
        })
    }

    pub fn get_str(&self, path: &str) -> Result<String, ConfigError> {
        self.with(|store| store.get_str(path).map(str::to_string))
    }

    pub fn get_int(&self, path: &str) -> Result<i64, ConfigError> {
        self.with(|store| store.get_int(path))
    }

    pub fn get_double(&self, path: &str) -> Result<f64, ConfigError> {
        self.with(|store| store.get_double(path))
    }

    pub fn get_bool(&self, path: &str) -> Result<bool, ConfigError> {
        self.with(|store| store.get_bool(path))
    }

    pub fn get_strings(&self, path: &str) -> Result<Vec<String>, ConfigError> {
        self.with(|store| store.get_strings(path))
    }

    pub fn set_value(&self, path: &str, value: Value) -> Result<(), ConfigError> {
        self.with(|store| store.set_value(path, value))
    }

    pub fn delete_key(&self, path: &str) -> Result<bool, ConfigError> {
        self.with(|store| store.delete_key(path))
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.with(|store| store.save())
    }
}
