//! Settings sources: built-in defaults, the user file, an explicit file and
//! `SCC_STORE_*` environment variables, lowest precedence first.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::store::BackendKind;

/// `$XDG_CONFIG_HOME/scc/store.toml`, or `~/.config/scc/store.toml`.
pub fn user_settings_path() -> Option<PathBuf> {
    let base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => PathBuf::from(std::env::var("HOME").ok()?).join(".config"),
    };
    Some(base.join("scc").join("store.toml"))
}

/// Builder with the platform's backend preselected.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder().set_default("backend", BackendKind::platform_default().as_str())
}

/// Add the user settings file if present.
pub fn add_user_file(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if let Some(path) = user_settings_path() {
        if path.exists() {
            debug!(settings_path = %path.display(), "Loading user store settings");
            builder = builder.add_source(File::from(path).required(false));
        }
    }
    Ok(builder)
}

/// Add a file the caller named explicitly; it must exist.
pub fn add_explicit_file(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(File::from(path).required(true)))
}

pub fn add_environment(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(Environment::with_prefix("SCC_STORE")))
}
