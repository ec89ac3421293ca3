//! Store settings
//!
//! Decides which backing store to open and where it lives. Layered with the
//! `config` crate; see [`sources`] for the precedence order.

mod sources;

pub use sources::user_settings_path;

use crate::error::ConfigError;
use crate::store::BackendKind;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where and how the configuration is stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Backing store kind: document or flat
    #[serde(default = "BackendKind::platform_default")]
    pub backend: BackendKind,

    /// Store location; defaults to the platform configuration directory
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: BackendKind::platform_default(),
            path: None,
        }
    }
}

impl StoreSettings {
    pub fn new(backend: BackendKind, path: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            path: Some(path.into()),
        }
    }

    /// Load from defaults, the user file and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_layers(None)
    }

    /// Like [`load`](Self::load), with `file` layered above the user file.
    pub fn load_from_file(file: &Path) -> Result<Self, ConfigError> {
        Self::load_layers(Some(file))
    }

    fn load_layers(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = sources::builder_with_defaults()?;
        builder = sources::add_user_file(builder)?;
        if let Some(file) = file {
            builder = sources::add_explicit_file(builder, file)?;
        }
        builder = sources::add_environment(builder)?;

        let settings: StoreSettings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }

    /// Explicit path, or the default location for the backend.
    pub fn store_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| default_store_path(self.backend))
    }
}

/// `config.json` in the config directory or `config.db` in the data directory.
pub fn default_store_path(backend: BackendKind) -> PathBuf {
    let dirs = ProjectDirs::from("", "", "scc");
    match (backend, dirs) {
        (BackendKind::Document, Some(dirs)) => dirs.config_dir().join("config.json"),
        (BackendKind::Flat, Some(dirs)) => dirs.data_dir().join("config.db"),
        (BackendKind::Document, None) => PathBuf::from(".scc").join("config.json"),
        (BackendKind::Flat, None) => PathBuf::from(".scc").join("config.db"),
    }
}
