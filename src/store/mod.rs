//! Backing stores
//!
//! Two concrete stores sit behind one trait: a JSON document held in memory
//! and written back on save, and a flat sled database laid out like a
//! registry (root key, subkeys, named values).

pub mod document;
pub mod flat;

pub use document::DocumentStore;
pub use flat::FlatStore;

use crate::defaults::DefaultEntry;
use crate::error::ConfigError;
use crate::path::ConfigPath;
use crate::types::Value;
use crate::value::ConfigValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which backing store a configuration lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Document,
    Flat,
}

impl BackendKind {
    /// Flat store on Windows, document file everywhere else.
    pub fn platform_default() -> Self {
        if cfg!(windows) {
            BackendKind::Flat
        } else {
            BackendKind::Document
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BackendKind::Document => "document",
            BackendKind::Flat => "flat",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store interface
///
/// Paths handed to a store are already validated and never the root.
pub trait BackingStore: Send {
    fn kind(&self) -> BackendKind;

    /// Resolve an explicit value, falling back to `default` when the store
    /// holds nothing at `path`. Returns `None` when neither exists.
    fn resolve(
        &mut self,
        path: &ConfigPath,
        default: Option<&'static DefaultEntry>,
    ) -> Result<Option<ConfigValue<'_>>, ConfigError>;

    fn write(&mut self, path: &ConfigPath, value: Value) -> Result<(), ConfigError>;

    /// Remove the value or subtree at `path`; `true` if anything was there.
    fn remove(&mut self, path: &ConfigPath) -> Result<bool, ConfigError>;

    /// Names of explicitly stored children of `path` (which may be the root).
    fn child_names(&mut self, path: &ConfigPath) -> Result<Vec<String>, ConfigError>;

    /// Persist pending changes.
    fn save(&mut self) -> Result<(), ConfigError>;
}
