//! Flat key/value store on sled
//!
//! Laid out like a registry: every configuration lives under the root key
//! (`config` tree). A value at `a/b/c` is stored in the subkey tree
//! `config\a\b` under the value name `c`; top-level values live directly in
//! the root tree. `\` is refused inside path segments, so the mapping is
//! collision-free. Subkey names obey the same length bound as paths; a path
//! whose subkey name would exceed it fails with `PathTooLong`.
//!
//! Stored bytes do not describe themselves, so each value starts with one
//! byte holding its `ValueType` code followed by the bincode payload.
//!
//! Decoded values are kept in a path-keyed cache that owns every payload
//! handed out to callers; it is released in one go when the store drops.

use crate::defaults::DefaultEntry;
use crate::error::ConfigError;
use crate::path::{check_len, ConfigPath, SUBKEY_SEPARATOR};
use crate::store::{BackendKind, BackingStore};
use crate::types::{check_array_len, Value, ValueType};
use crate::value::ConfigValue;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use tracing::{debug, info};

/// Name of the root key tree
pub const ROOT_KEY: &str = "config";

/// sled-backed flat configuration
pub struct FlatStore {
    db: sled::Db,
    root: sled::Tree,
    cache: HashMap<String, Value>,
    native_reads: u64,
}

impl FlatStore {
    /// Open (or create) the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let db = sled::open(path).map_err(|e| {
            ConfigError::BackingStore(format!("Failed to open sled database {:?}: {}", path, e))
        })?;
        let root = db.open_tree(ROOT_KEY)?;
        info!(store_path = %path.display(), "Opened flat store");
        Ok(Self {
            db,
            root,
            cache: HashMap::new(),
            native_reads: 0,
        })
    }

    /// Number of value lookups that went to sled rather than the cache.
    pub fn native_reads(&self) -> u64 {
        self.native_reads
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Subkey tree that holds the children of `parent` if it exists.
    fn subkey(&self, parent: &str) -> Result<Option<sled::Tree>, ConfigError> {
        if parent.is_empty() {
            return Ok(Some(self.root.clone()));
        }
        let name = subkey_name(parent)?;
        let exists = self
            .db
            .tree_names()
            .iter()
            .any(|n| n.as_ref() == name.as_bytes());
        if exists {
            Ok(Some(self.db.open_tree(name)?))
        } else {
            Ok(None)
        }
    }

    fn subkey_or_create(&self, parent: &str) -> Result<sled::Tree, ConfigError> {
        if parent.is_empty() {
            return Ok(self.root.clone());
        }
        Ok(self.db.open_tree(subkey_name(parent)?)?)
    }

    fn read_native(&mut self, path: &ConfigPath) -> Result<Option<Value>, ConfigError> {
        self.native_reads += 1;
        let Some(tree) = self.subkey(path.parent())? else {
            return Ok(None);
        };
        match tree.get(path.name().as_bytes())? {
            Some(raw) => Ok(Some(decode(&raw)?)),
            None => Ok(None),
        }
    }

    /// Subkey tree names at or below `path`.
    ///
    /// A subkey whose name would exceed the bound can never have been
    /// created, so such a `path` has none.
    fn subkeys_under(&self, path: &ConfigPath) -> Vec<sled::IVec> {
        let Ok(own) = subkey_name(path.as_str()) else {
            return Vec::new();
        };
        let mut nested = own.clone();
        nested.push(SUBKEY_SEPARATOR);
        self.db
            .tree_names()
            .into_iter()
            .filter(|n| n.as_ref() == own.as_bytes() || n.starts_with(nested.as_bytes()))
            .collect()
    }
}

/// Native subkey name for a normalized hierarchical parent path.
///
/// Fails with `PathTooLong` when the name exceeds `MAX_PATH_LEN`.
pub fn subkey_name(parent: &str) -> Result<String, ConfigError> {
    let mut name = String::with_capacity(ROOT_KEY.len() + 1 + parent.len());
    name.push_str(ROOT_KEY);
    for segment in parent.split('/').filter(|s| !s.is_empty()) {
        name.push(SUBKEY_SEPARATOR);
        name.push_str(segment);
    }
    check_len(&name)?;
    Ok(name)
}

/// Type code byte followed by the bincode payload.
pub fn encode(value: &Value) -> Result<Vec<u8>, ConfigError> {
    let mut out = vec![value.value_type().code()];
    match value {
        Value::String(s) => bincode::serialize_into(&mut out, s)?,
        Value::StringArray(items) => {
            check_array_len(items.len())?;
            bincode::serialize_into(&mut out, items)?
        }
        Value::Int(v) => bincode::serialize_into(&mut out, v)?,
        Value::Double(v) => bincode::serialize_into(&mut out, v)?,
        Value::Bool(v) => bincode::serialize_into(&mut out, v)?,
    }
    Ok(out)
}

pub fn decode(raw: &[u8]) -> Result<Value, ConfigError> {
    let (&code, payload) = raw
        .split_first()
        .ok_or_else(|| ConfigError::BackingStore("empty stored value".to_string()))?;
    let value_type = ValueType::from_code(code)
        .ok_or_else(|| ConfigError::BackingStore(format!("unknown value type code {}", code)))?;

    Ok(match value_type {
        ValueType::String => Value::String(bincode::deserialize(payload)?),
        ValueType::StringArray => {
            let items: Vec<String> = bincode::deserialize(payload)?;
            check_array_len(items.len())?;
            Value::StringArray(items)
        }
        ValueType::Int => Value::Int(bincode::deserialize(payload)?),
        ValueType::Double => Value::Double(bincode::deserialize(payload)?),
        ValueType::Bool => Value::Bool(bincode::deserialize(payload)?),
    })
}

impl BackingStore for FlatStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Flat
    }

    fn resolve(
        &mut self,
        path: &ConfigPath,
        default: Option<&'static DefaultEntry>,
    ) -> Result<Option<ConfigValue<'_>>, ConfigError> {
        let key = path.as_str();
        if self.cache.contains_key(key) {
            debug!(path = %path, "Cache hit");
        } else {
            let value = match self.read_native(path)? {
                Some(value) => value,
                None => match default {
                    Some(entry) => {
                        debug!(path = %path, "Materializing built-in default");
                        entry.to_value()
                    }
                    None => return Ok(None),
                },
            };
            debug!(path = %path, "Cache miss, populated");
            self.cache.insert(key.to_string(), value);
        }
        Ok(self.cache.get(key).map(ConfigValue::Flat))
    }

    fn write(&mut self, path: &ConfigPath, value: Value) -> Result<(), ConfigError> {
        let raw = encode(&value)?;
        let tree = self.subkey_or_create(path.parent())?;
        tree.insert(path.name().as_bytes(), raw)?;
        self.cache.insert(path.as_str().to_string(), value);
        debug!(path = %path, parent = %path.parent(), "Stored flat value");
        Ok(())
    }

    fn remove(&mut self, path: &ConfigPath) -> Result<bool, ConfigError> {
        let mut removed = match self.subkey(path.parent())? {
            Some(tree) => tree.remove(path.name().as_bytes())?.is_some(),
            None => false,
        };

        for name in self.subkeys_under(path) {
            let tree = self.db.open_tree(&name)?;
            removed |= !tree.is_empty();
            self.db.drop_tree(&name)?;
        }

        self.cache.retain(|cached, _| !path.contains(cached));
        if removed {
            debug!(path = %path, "Removed flat value");
        }
        Ok(removed)
    }

    fn child_names(&mut self, path: &ConfigPath) -> Result<Vec<String>, ConfigError> {
        let mut names = BTreeSet::new();

        if let Some(tree) = self.subkey(path.as_str())? {
            for item in tree.iter() {
                let (key, _) = item?;
                names.insert(String::from_utf8_lossy(&key).into_owned());
            }
        }

        let mut prefix = subkey_name(path.as_str())?;
        prefix.push(SUBKEY_SEPARATOR);
        for name in self.db.tree_names() {
            let Some(rest) = name.strip_prefix(prefix.as_bytes()) else {
                continue;
            };
            if self.db.open_tree(&name)?.is_empty() {
                continue;
            }
            let rest = String::from_utf8_lossy(rest);
            if let Some(child) = rest.split(SUBKEY_SEPARATOR).next() {
                names.insert(child.to_string());
            }
        }

        Ok(names.into_iter().collect())
    }

    fn save(&mut self) -> Result<(), ConfigError> {
        let flushed = self.db.flush()?;
        info!(bytes = flushed, "Flushed flat store");
        Ok(())
    }
}
