//! CLI output: error mapping and presentation.

use crate::defaults::{DefaultEntry, DefaultValue, DEFAULT_ENABLED_DRIVERS, DEFAULT_PROFILES};
use crate::error::ConfigError;
use crate::types::Value;
use comfy_table::Table;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &ConfigError) -> String {
    match e {
        ConfigError::TypeMismatch { expected, .. } => {
            format!("{}\nHint: read it with the stored type instead of {}.", e, expected)
        }
        _ => e.to_string(),
    }
}

/// One value per line; arrays print one element per line.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::StringArray(items) => items.join("\n"),
        other => other.to_string(),
    }
}

fn format_default(value: &DefaultValue) -> String {
    match value {
        DefaultValue::String(s) => format!("\"{}\"", s),
        DefaultValue::StringArray(items) => format!("[{}]", items.join(", ")),
        DefaultValue::Int(v) => v.to_string(),
        DefaultValue::Double(v) => v.to_string(),
        DefaultValue::Bool(v) => v.to_string(),
    }
}

pub fn format_defaults_table(entries: &[DefaultEntry]) -> String {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Path", "Type", "Default"]);
    for entry in entries {
        table.add_row(vec![
            entry.path.to_string(),
            entry.value_type().to_string(),
            format_default(&entry.value),
        ]);
    }

    let mut output = table.to_string();
    output.push_str(&format!(
        "\n\nDefault profiles: {}\nEnabled drivers: {}",
        DEFAULT_PROFILES.join(", "),
        DEFAULT_ENABLED_DRIVERS.join(", ")
    ));
    output
}
