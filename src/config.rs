//! Configuration accessor
//!
//! `ConfigStore` is the one object callers hold. It turns a hierarchical path
//! and an expected type into a verified value, whichever backing store is
//! open, and falls back to the built-in defaults for keys never set.
//!
//! The store is single-owner: every read that hands out a borrowed value
//! takes `&mut self`. Wrap it in [`SharedConfig`](crate::shared::SharedConfig)
//! to use one open store from several threads.

use crate::defaults::{self, DefaultEntry};
use crate::error::ConfigError;
use crate::path::ConfigPath;
use crate::settings::StoreSettings;
use crate::store::{BackendKind, BackingStore, DocumentStore, FlatStore};
use crate::types::{check_array_len, Value, ValueType};
use crate::value::ConfigValue;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info};

/// Typed, path-addressed access to one open configuration
pub struct ConfigStore {
    backend: Box<dyn BackingStore>,
}

impl ConfigStore {
    /// Open the store described by `settings`.
    pub fn open(settings: &StoreSettings) -> Result<Self, ConfigError> {
        let path = settings.store_path();
        match settings.backend {
            BackendKind::Document => Self::open_document(path),
            BackendKind::Flat => Self::open_flat(path),
        }
    }

    pub fn open_document<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Ok(Self::with_backend(Box::new(DocumentStore::open(path)?)))
    }

    pub fn open_flat<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Ok(Self::with_backend(Box::new(FlatStore::open(path)?)))
    }

    pub fn with_backend(backend: Box<dyn BackingStore>) -> Self {
        Self { backend }
    }

    pub fn kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// Default-table entry for `path`, if there is one.
    ///
    /// `Ok(None)` is the normal "no default" answer, not an error.
    pub fn get_default(&self, path: &str) -> Result<Option<&'static DefaultEntry>, ConfigError> {
        let path = ConfigPath::parse(path)?;
        Ok(defaults::lookup(path.as_str()))
    }

    /// Resolve `path` to a value whose tag equals `expected`.
    ///
    /// Explicit values win over defaults. Fails with `NotFound` when neither
    /// exists and with `TypeMismatch` when the tag differs.
    pub fn get_value(
        &mut self,
        path: &str,
        expected: ValueType,
    ) -> Result<ConfigValue<'_>, ConfigError> {
        let path = ConfigPath::parse(path)?;
        if path.is_root() {
            return Err(ConfigError::NotFound(path.to_string()));
        }

        let default = defaults::lookup(path.as_str());
        let value = self
            .backend
            .resolve(&path, default)?
            .ok_or_else(|| ConfigError::NotFound(path.to_string()))?;
        value.expect(path.as_str(), expected)?;
        Ok(value)
    }

    pub fn get_str(&mut self, path: &str) -> Result<&str, ConfigError> {
        self.get_value(path, ValueType::String)?.as_str()
    }

    pub fn get_int(&mut self, path: &str) -> Result<i64, ConfigError> {
        self.get_value(path, ValueType::Int)?.as_int()
    }

    pub fn get_double(&mut self, path: &str) -> Result<f64, ConfigError> {
        self.get_value(path, ValueType::Double)?.as_double()
    }

    pub fn get_bool(&mut self, path: &str) -> Result<bool, ConfigError> {
        self.get_value(path, ValueType::Bool)?.as_bool()
    }

    pub fn get_strings(&mut self, path: &str) -> Result<Vec<String>, ConfigError> {
        let items = self.get_value(path, ValueType::StringArray)?.as_strings()?;
        Ok(items.into_iter().map(str::to_string).collect())
    }

    /// Store `value` at `path`.
    ///
    /// Paths with a default only accept values of the default's type.
    pub fn set_value(&mut self, path: &str, value: Value) -> Result<(), ConfigError> {
        let path = ConfigPath::parse(path)?;
        if path.is_root() {
            return Err(ConfigError::InvalidPath(
                "cannot assign a value to the root".to_string(),
            ));
        }
        if let Value::StringArray(items) = &value {
            check_array_len(items.len())?;
        }
        if let Some(default) = defaults::lookup(path.as_str()) {
            if default.value_type() != value.value_type() {
                return Err(ConfigError::mismatch(
                    path.as_str(),
                    default.value_type(),
                    value.value_type(),
                ));
            }
        }

        debug!(path = %path, value_type = %value.value_type(), "Setting value");
        self.backend.write(&path, value)
    }

    pub fn set_str(&mut self, path: &str, value: &str) -> Result<(), ConfigError> {
        self.set_value(path, Value::String(value.to_string()))
    }

    pub fn set_int(&mut self, path: &str, value: i64) -> Result<(), ConfigError> {
        self.set_value(path, Value::Int(value))
    }

    pub fn set_double(&mut self, path: &str, value: f64) -> Result<(), ConfigError> {
        self.set_value(path, Value::Double(value))
    }

    pub fn set_bool(&mut self, path: &str, value: bool) -> Result<(), ConfigError> {
        self.set_value(path, Value::Bool(value))
    }

    pub fn set_strings<I, S>(&mut self, path: &str, items: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_value(path, Value::strings(items)?)
    }

    /// Drop the explicit value or subtree at `path`; reads fall back to
    /// defaults afterwards. Returns whether anything was removed.
    pub fn delete_key(&mut self, path: &str) -> Result<bool, ConfigError> {
        let path = ConfigPath::parse(path)?;
        if path.is_root() {
            return Err(ConfigError::InvalidPath(
                "cannot delete the root".to_string(),
            ));
        }
        self.backend.remove(&path)
    }

    /// Sorted names of the direct children of `path`, stored or defaulted.
    pub fn keys(&mut self, path: &str) -> Result<Vec<String>, ConfigError> {
        let path = ConfigPath::parse(path)?;
        let mut names: BTreeSet<String> = self.backend.child_names(&path)?.into_iter().collect();
        names.extend(defaults::child_names(path.as_str()).map(str::to_string));
        Ok(names.into_iter().collect())
    }

    pub fn save(&mut self) -> Result<(), ConfigError> {
        self.backend.save()
    }

    /// Save and release the backing store.
    pub fn close(mut self) -> Result<(), ConfigError> {
        self.save()?;
        info!(backend = %self.kind(), "Closed configuration store");
        Ok(())
    }
}
