//! Read contract shared by every value source
//!
//! A `ConfigValue` borrows from whichever place the value lives in: a node of
//! the parsed document, an entry in the flat store's cache, or the default
//! table. Payload accessors always verify the tag first.
//!
//! Document numbers are typed by how they are written: `80` is an int and
//! `80.0` a double, and neither is read as the other. A hand-edited file
//! must write doubles such as `led_level` with a decimal point.

use crate::defaults::{DefaultEntry, DefaultValue};
use crate::error::ConfigError;
use crate::types::{Value, ValueType};

/// A borrowed, tagged configuration value
#[derive(Debug, Clone, Copy)]
pub enum ConfigValue<'a> {
    Document(&'a serde_json::Value),
    Flat(&'a Value),
    Default(&'static DefaultEntry),
}

/// Tag of a document node, or `None` for nodes that carry no value.
pub fn document_type(node: &serde_json::Value) -> Option<ValueType> {
    match node {
        serde_json::Value::String(_) => Some(ValueType::String),
        serde_json::Value::Bool(_) => Some(ValueType::Bool),
        serde_json::Value::Number(n) if n.is_i64() => Some(ValueType::Int),
        serde_json::Value::Number(_) => Some(ValueType::Double),
        serde_json::Value::Array(items) if items.iter().all(|i| i.is_string()) => {
            Some(ValueType::StringArray)
        }
        serde_json::Value::Array(_) | serde_json::Value::Object(_) | serde_json::Value::Null => {
            None
        }
    }
}

fn document_kind(node: &serde_json::Value) -> &'static str {
    match node {
        serde_json::Value::Object(_) => "object",
        serde_json::Value::Null => "null",
        serde_json::Value::Array(_) => "array",
        _ => "value",
    }
}

impl<'a> ConfigValue<'a> {
    /// The value's tag; `None` only for document containers and nulls.
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            ConfigValue::Document(node) => document_type(node),
            ConfigValue::Flat(value) => Some(value.value_type()),
            ConfigValue::Default(entry) => Some(entry.value_type()),
        }
    }

    /// Fail with `TypeMismatch` unless the tag equals `expected`.
    pub fn expect(&self, path: &str, expected: ValueType) -> Result<(), ConfigError> {
        match self.value_type() {
            Some(found) if found == expected => Ok(()),
            Some(found) => Err(ConfigError::mismatch(path, expected, found)),
            None => match self {
                ConfigValue::Document(node) => {
                    Err(ConfigError::mismatch(path, expected, document_kind(node)))
                }
                _ => unreachable!("only document nodes lack a tag"),
            },
        }
    }

    fn mismatch(&self, expected: ValueType) -> ConfigError {
        let found = self
            .value_type()
            .map(|t| t.name())
            .unwrap_or("untyped node");
        ConfigError::mismatch(self.origin(), expected, found)
    }

    fn origin(&self) -> &'static str {
        match self {
            ConfigValue::Document(_) => "<document>",
            ConfigValue::Flat(_) => "<flat store>",
            ConfigValue::Default(entry) => entry.path,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, ConfigValue::Default(_))
    }

    pub fn as_str(&self) -> Result<&'a str, ConfigError> {
        match *self {
            ConfigValue::Document(serde_json::Value::String(s)) => Ok(s.as_str()),
            ConfigValue::Flat(Value::String(s)) => Ok(s.as_str()),
            ConfigValue::Default(DefaultEntry {
                value: DefaultValue::String(s),
                ..
            }) => Ok(*s),
            _ => Err(self.mismatch(ValueType::String)),
        }
    }

    pub fn as_int(&self) -> Result<i64, ConfigError> {
        match *self {
            ConfigValue::Document(serde_json::Value::Number(n)) if n.is_i64() => {
                n.as_i64().ok_or_else(|| self.mismatch(ValueType::Int))
            }
            ConfigValue::Flat(Value::Int(v)) => Ok(*v),
            ConfigValue::Default(DefaultEntry {
                value: DefaultValue::Int(v),
                ..
            }) => Ok(*v),
            _ => Err(self.mismatch(ValueType::Int)),
        }
    }

    pub fn as_double(&self) -> Result<f64, ConfigError> {
        match *self {
            ConfigValue::Document(serde_json::Value::Number(n)) if !n.is_i64() => {
                n.as_f64().ok_or_else(|| self.mismatch(ValueType::Double))
            }
            ConfigValue::Flat(Value::Double(v)) => Ok(*v),
            ConfigValue::Default(DefaultEntry {
                value: DefaultValue::Double(v),
                ..
            }) => Ok(*v),
            _ => Err(self.mismatch(ValueType::Double)),
        }
    }

    pub fn as_bool(&self) -> Result<bool, ConfigError> {
        match *self {
            ConfigValue::Document(serde_json::Value::Bool(v)) => Ok(*v),
            ConfigValue::Flat(Value::Bool(v)) => Ok(*v),
            ConfigValue::Default(DefaultEntry {
                value: DefaultValue::Bool(v),
                ..
            }) => Ok(*v),
            _ => Err(self.mismatch(ValueType::Bool)),
        }
    }

    pub fn as_strings(&self) -> Result<Vec<&'a str>, ConfigError> {
        if self.value_type() != Some(ValueType::StringArray) {
            return Err(self.mismatch(ValueType::StringArray));
        }
        match *self {
            ConfigValue::Document(serde_json::Value::Array(items)) => {
                Ok(items.iter().filter_map(|i| i.as_str()).collect())
            }
            ConfigValue::Flat(Value::StringArray(items)) => {
                Ok(items.iter().map(String::as_str).collect())
            }
            ConfigValue::Default(DefaultEntry {
                value: DefaultValue::StringArray(items),
                ..
            }) => Ok(items.to_vec()),
            _ => Err(self.mismatch(ValueType::StringArray)),
        }
    }

    /// Copy the payload out, whatever its source.
    pub fn to_value(&self) -> Option<Value> {
        Some(match self.value_type()? {
            ValueType::String => Value::String(self.as_str().ok()?.to_string()),
            ValueType::StringArray => Value::StringArray(
                self.as_strings()
                    .ok()?
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            ),
            ValueType::Int => Value::Int(self.as_int().ok()?),
            ValueType::Double => Value::Double(self.as_double().ok()?),
            ValueType::Bool => Value::Bool(self.as_bool().ok()?),
        })
    }
}
