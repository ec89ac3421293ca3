//! scc-config: typed configuration access for the controller daemon
//!
//! One path-addressed, typed key/value API over two backing stores: a JSON
//! document file and a flat, registry-like sled database. Keys that were
//! never set resolve to compiled-in defaults.

pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod logging;
pub mod path;
pub mod settings;
pub mod shared;
pub mod store;
pub mod types;
pub mod value;

pub use config::ConfigStore;
pub use error::ConfigError;
pub use path::last_element;
pub use shared::SharedConfig;
pub use types::{Value, ValueType, MAX_ARRAY_SIZE, MAX_PATH_LEN};
pub use value::ConfigValue;
