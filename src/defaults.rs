//! Built-in default values
//!
//! Every key the daemon reads has an entry here, so a fresh installation works
//! without a configuration file. The table is sorted by path and searched with
//! a binary search; paths are unique.

use crate::types::{Value, ValueType};

/// Profiles offered in the "recent" list before the user has picked any.
pub const DEFAULT_PROFILES: &[&str] = &[
    "Desktop",
    "XBox Controller",
    "XBox Controller with High Precision Camera",
];

/// Drivers that are enabled unless the user turns them off.
pub const DEFAULT_ENABLED_DRIVERS: &[&str] =
    &["sc_dongle", "sc_by_cable", "ds4drv", "hiddrv", "evdevdrv"];

/// Payload of a compiled-in default
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    String(&'static str),
    StringArray(&'static [&'static str]),
    Int(i64),
    Double(f64),
    Bool(bool),
}

/// One (path, value) pair of the default table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultEntry {
    pub path: &'static str,
    pub value: DefaultValue,
}

impl DefaultEntry {
    /// Tag derived from the payload, so the two can never disagree.
    pub fn value_type(&self) -> ValueType {
        match self.value {
            DefaultValue::String(_) => ValueType::String,
            DefaultValue::StringArray(_) => ValueType::StringArray,
            DefaultValue::Int(_) => ValueType::Int,
            DefaultValue::Double(_) => ValueType::Double,
            DefaultValue::Bool(_) => ValueType::Bool,
        }
    }

    /// Copy the payload into an owned value.
    pub fn to_value(&self) -> Value {
        match self.value {
            DefaultValue::String(s) => Value::String(s.to_string()),
            DefaultValue::StringArray(items) => {
                Value::StringArray(items.iter().map(|s| s.to_string()).collect())
            }
            DefaultValue::Int(v) => Value::Int(v),
            DefaultValue::Double(v) => Value::Double(v),
            DefaultValue::Bool(v) => Value::Bool(v),
        }
    }
}

const fn entry(path: &'static str, value: DefaultValue) -> DefaultEntry {
    DefaultEntry { path, value }
}

/// Sorted by path (byte order).
pub static DEFAULT_VALUES: &[DefaultEntry] = &[
    entry("autoswitch_osd", DefaultValue::Bool(true)),
    entry("drivers/ds4drv", DefaultValue::Bool(true)),
    entry("drivers/evdevdrv", DefaultValue::Bool(true)),
    entry("drivers/fake", DefaultValue::Bool(false)),
    entry("drivers/hiddrv", DefaultValue::Bool(true)),
    entry("drivers/remotepad", DefaultValue::Bool(false)),
    entry("drivers/sc_by_cable", DefaultValue::Bool(true)),
    entry("drivers/sc_dongle", DefaultValue::Bool(true)),
    entry("enable_sniffing", DefaultValue::Bool(false)),
    entry("fix_xinput", DefaultValue::Bool(true)),
    entry("gui/autokill_daemon", DefaultValue::Bool(false)),
    entry("gui/enable_status_icon", DefaultValue::Bool(false)),
    entry("gui/minimize_on_start", DefaultValue::Bool(false)),
    entry("gui/minimize_to_status_icon", DefaultValue::Bool(true)),
    entry("gui/news/enabled", DefaultValue::Bool(true)),
    entry("gui/news/last_version", DefaultValue::String("0.4.8")),
    entry("led_level", DefaultValue::Double(80.0)),
    entry("osd_color_theme", DefaultValue::String("None")),
    entry("osd_colors/background", DefaultValue::String("101010")),
    entry("osd_colors/border", DefaultValue::String("00FF00")),
    entry("osd_colors/menuitem_border", DefaultValue::String("004000")),
    entry("osd_colors/menuitem_hilight", DefaultValue::String("000070")),
    entry("osd_colors/menuitem_hilight_border", DefaultValue::String("00FF00")),
    entry("osd_colors/menuitem_hilight_text", DefaultValue::String("FFFFFF")),
    entry("osd_colors/menuseparator", DefaultValue::String("109010")),
    entry("osd_colors/text", DefaultValue::String("16BF24")),
    entry("osd_style", DefaultValue::String("Reloaded.gtkstyle.css")),
    entry("output/name", DefaultValue::String("Microsoft X-Box 360 pad")),
    entry("output/product", DefaultValue::Int(0x028e)),
    entry("output/rumble", DefaultValue::Bool(true)),
    entry("output/vendor", DefaultValue::Int(0x045e)),
    entry("output/version", DefaultValue::Int(0x0110)),
    entry("recent_max", DefaultValue::Int(10)),
    entry("recent_profiles", DefaultValue::StringArray(DEFAULT_PROFILES)),
    entry("windows_opacity", DefaultValue::Double(0.95)),
];

/// Find the default for an exact, normalized path.
pub fn lookup(path: &str) -> Option<&'static DefaultEntry> {
    DEFAULT_VALUES
        .binary_search_by(|e| e.path.cmp(path))
        .ok()
        .map(|idx| &DEFAULT_VALUES[idx])
}

/// Names of the direct children of `parent` that have defaults.
///
/// `parent` is a normalized path; the empty string is the root.
pub fn child_names(parent: &str) -> impl Iterator<Item = &'static str> + '_ {
    DEFAULT_VALUES.iter().filter_map(move |e| {
        let rest = if parent.is_empty() {
            e.path
        } else {
            e.path.strip_prefix(parent)?.strip_prefix('/')?
        };
        rest.split('/').next()
    })
}
