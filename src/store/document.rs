//! JSON document store
//!
//! The whole file is parsed into a tree on open. Reads walk the tree, writes
//! edit it in place, and `save` writes it back atomically (write `.tmp`, then
//! rename).

use crate::defaults::DefaultEntry;
use crate::error::ConfigError;
use crate::path::ConfigPath;
use crate::store::{BackendKind, BackingStore};
use crate::types::{check_array_len, Value, ValueType};
use crate::value::{document_type, ConfigValue};
use serde_json::Map;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Document-file-backed configuration
pub struct DocumentStore {
    filename: PathBuf,
    root: serde_json::Value,
    dirty: bool,
}

impl DocumentStore {
    /// Parse `filename` into memory.
    ///
    /// A missing file yields an empty document that the first save creates.
    /// Unreadable or malformed files fail the open.
    pub fn open<P: AsRef<Path>>(filename: P) -> Result<Self, ConfigError> {
        let filename = filename.as_ref().to_path_buf();

        let root = if filename.exists() {
            let raw = fs::read_to_string(&filename).map_err(|e| {
                ConfigError::BackingStore(format!("Failed to read {:?}: {}", filename, e))
            })?;
            let root: serde_json::Value = serde_json::from_str(&raw).map_err(|e| {
                ConfigError::BackingStore(format!("Failed to parse {:?}: {}", filename, e))
            })?;
            if !root.is_object() {
                return Err(ConfigError::BackingStore(format!(
                    "Top level of {:?} is not an object",
                    filename
                )));
            }
            root
        } else {
            warn!(
                config_path = %filename.display(),
                "Configuration file not found, starting from defaults"
            );
            serde_json::Value::Object(Map::new())
        };

        info!(config_path = %filename.display(), "Opened document store");
        Ok(Self {
            filename,
            root,
            dirty: false,
        })
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    /// Whether there are edits not yet saved
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn node(&self, path: &ConfigPath) -> Option<&serde_json::Value> {
        let mut node = &self.root;
        for segment in path.segments() {
            node = node.as_object()?.get(segment)?;
        }
        Some(node)
    }

    /// Object that holds the last segment of `path`, created on demand.
    fn parent_object_mut(
        &mut self,
        path: &ConfigPath,
    ) -> Result<&mut Map<String, serde_json::Value>, ConfigError> {
        let mut node = &mut self.root;
        for segment in path.parent().split('/').filter(|s| !s.is_empty()) {
            let map = node.as_object_mut().ok_or_else(|| not_an_object(path))?;
            node = map
                .entry(segment.to_string())
                .or_insert_with(|| serde_json::Value::Object(Map::new()));
        }
        node.as_object_mut().ok_or_else(|| not_an_object(path))
    }
}

fn not_an_object(path: &ConfigPath) -> ConfigError {
    ConfigError::InvalidPath(format!(
        "cannot store '{}': a parent of it holds a value",
        path
    ))
}

fn to_json(value: Value) -> Result<serde_json::Value, ConfigError> {
    Ok(match value {
        Value::String(s) => serde_json::Value::String(s),
        Value::StringArray(items) => {
            serde_json::Value::Array(items.into_iter().map(serde_json::Value::String).collect())
        }
        Value::Int(v) => serde_json::Value::from(v),
        Value::Double(v) => serde_json::Number::from_f64(v)
            .map(serde_json::Value::Number)
            .ok_or_else(|| {
                ConfigError::BackingStore(format!("{} cannot be stored in a JSON document", v))
            })?,
        Value::Bool(v) => serde_json::Value::Bool(v),
    })
}

impl BackingStore for DocumentStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Document
    }

    fn resolve(
        &mut self,
        path: &ConfigPath,
        default: Option<&'static DefaultEntry>,
    ) -> Result<Option<ConfigValue<'_>>, ConfigError> {
        if let Some(node) = self.node(path) {
            if let serde_json::Value::Array(items) = node {
                if document_type(node) == Some(ValueType::StringArray) {
                    check_array_len(items.len())?;
                }
            }
            return Ok(Some(ConfigValue::Document(node)));
        }
        if default.is_some() {
            debug!(path = %path, "Using built-in default");
        }
        Ok(default.map(ConfigValue::Default))
    }

    fn write(&mut self, path: &ConfigPath, value: Value) -> Result<(), ConfigError> {
        let json = to_json(value)?;
        let name = path.name().to_string();
        self.parent_object_mut(path)?.insert(name, json);
        self.dirty = true;
        debug!(path = %path, "Updated document value");
        Ok(())
    }

    fn remove(&mut self, path: &ConfigPath) -> Result<bool, ConfigError> {
        let mut node = &mut self.root;
        for segment in path.parent().split('/').filter(|s| !s.is_empty()) {
            match node.as_object_mut().and_then(|map| map.get_mut(segment)) {
                Some(child) => node = child,
                None => return Ok(false),
            }
        }
        let removed = node
            .as_object_mut()
            .and_then(|map| map.remove(path.name()))
            .is_some();
        if removed {
            self.dirty = true;
            debug!(path = %path, "Removed document value");
        }
        Ok(removed)
    }

    fn child_names(&mut self, path: &ConfigPath) -> Result<Vec<String>, ConfigError> {
        let names = match self.node(path).and_then(|n| n.as_object()) {
            Some(map) => map.keys().cloned().collect(),
            None => Vec::new(),
        };
        Ok(names)
    }

    fn save(&mut self) -> Result<(), ConfigError> {
        if let Some(parent) = self.filename.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    ConfigError::BackingStore(format!(
                        "Failed to create directory {:?}: {}",
                        parent, e
                    ))
                })?;
            }
        }

        let serialized = serde_json::to_vec_pretty(&self.root)?;

        let mut temp_path = self.filename.clone().into_os_string();
        temp_path.push(".tmp");
        let temp_path = PathBuf::from(temp_path);

        fs::write(&temp_path, &serialized).map_err(|e| {
            ConfigError::BackingStore(format!("Failed to write {:?}: {}", temp_path, e))
        })?;
        fs::rename(&temp_path, &self.filename).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            ConfigError::BackingStore(format!(
                "Failed to rename temp file to {:?}: {}",
                self.filename, e
            ))
        })?;

        self.dirty = false;
        info!(config_path = %self.filename.display(), "Saved document store");
        Ok(())
    }
}
