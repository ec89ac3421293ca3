//! CLI route: single route table and run context.

use crate::cli::output::{format_defaults_table, format_value};
use crate::cli::parse::{Cli, Commands};
use crate::config::ConfigStore;
use crate::defaults::DEFAULT_VALUES;
use crate::error::ConfigError;
use crate::settings::StoreSettings;
use crate::types::Value;
use tracing::info;

/// Runtime context for CLI execution: the open configuration store.
pub struct RunContext {
    store: ConfigStore,
}

impl RunContext {
    /// Resolve store settings (file, environment, then CLI flags) and open it.
    pub fn new(cli: &Cli) -> Result<Self, ConfigError> {
        let mut settings = match cli.settings {
            Some(ref path) => StoreSettings::load_from_file(path)?,
            None => StoreSettings::load()?,
        };
        if let Some(backend) = cli.backend {
            settings.backend = backend;
        }
        if let Some(ref store) = cli.store {
            settings.path = Some(store.clone());
        }

        info!(
            backend = %settings.backend,
            store_path = %settings.store_path().display(),
            "Opening configuration store"
        );
        Ok(Self {
            store: ConfigStore::open(&settings)?,
        })
    }

    pub fn from_store(store: ConfigStore) -> Self {
        Self { store }
    }

    pub fn store(&mut self) -> &mut ConfigStore {
        &mut self.store
    }

    pub fn execute(&mut self, command: &Commands) -> Result<String, ConfigError> {
        match command {
            Commands::Get { path, value_type } => {
                let value = self.store.get_value(path, *value_type)?;
                let source = if value.is_default() { " (default)" } else { "" };
                let value = value
                    .to_value()
                    .ok_or_else(|| ConfigError::NotFound(path.clone()))?;
                info!(path = %path, "Read value{}", source);
                Ok(format_value(&value))
            }
            Commands::Set {
                path,
                value_type,
                values,
            } => {
                let value = Value::parse_as(*value_type, values)
                    .map_err(|e| ConfigError::InvalidValue(format!("{}: {}", path, e)))?;
                self.store.set_value(path, value)?;
                self.store.save()?;
                Ok(format!("Set {}", path))
            }
            Commands::Unset { path } => {
                let removed = self.store.delete_key(path)?;
                self.store.save()?;
                Ok(if removed {
                    format!("Removed {}", path)
                } else {
                    format!("{} was not set", path)
                })
            }
            Commands::Keys { path } => Ok(self.store.keys(path)?.join("\n")),
            Commands::Defaults => Ok(format_defaults_table(DEFAULT_VALUES)),
        }
    }
}
