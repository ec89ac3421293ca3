//! CLI parse: clap types for scc-config. No behavior; definitions only.

use crate::store::BackendKind;
use crate::types::ValueType;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// scc-config - inspect and edit controller daemon settings
#[derive(Parser)]
#[command(name = "scc-config")]
#[command(about = "Typed access to controller daemon settings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Store settings file (TOML, YAML or JSON)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Backing store kind (overrides settings)
    #[arg(long, value_enum)]
    pub backend: Option<BackendKind>,

    /// Store location (overrides settings)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the value at a path, falling back to its default
    Get {
        /// Hierarchical path, e.g. gui/news/enabled
        path: String,
        /// Expected type: string, string-array, int, double, bool
        value_type: ValueType,
    },
    /// Store a value at a path
    Set {
        path: String,
        value_type: ValueType,
        /// One value, or several for string-array
        #[arg(required = true, num_args = 1..)]
        values: Vec<String>,
    },
    /// Remove an explicit value or subtree
    Unset { path: String },
    /// List child keys of a path
    Keys {
        #[arg(default_value = "")]
        path: String,
    },
    /// Show the built-in defaults
    Defaults,
}
