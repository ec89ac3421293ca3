//! Value type tags and owned payloads.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length of any path, requested or derived
pub const MAX_PATH_LEN: usize = 256;

/// Maximum number of elements in a string array
pub const MAX_ARRAY_SIZE: usize = 256;

/// Discriminant for every stored or default value.
///
/// Codes loosely follow the JSON document type numbering; `Int` has no
/// counterpart there and sits outside that range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ValueType {
    StringArray = 1,
    Double = 2,
    String = 3,
    Bool = 4,
    Int = 10,
}

impl ValueType {
    pub const ALL: [ValueType; 5] = [
        ValueType::StringArray,
        ValueType::Double,
        ValueType::String,
        ValueType::Bool,
        ValueType::Int,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    pub fn name(self) -> &'static str {
        match self {
            ValueType::StringArray => "string-array",
            ValueType::Double => "double",
            ValueType::String => "string",
            ValueType::Bool => "bool",
            ValueType::Int => "int",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| {
                format!(
                    "Unknown value type: {} (expected string, string-array, int, double or bool)",
                    s
                )
            })
    }
}

/// Owned configuration payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    String(String),
    StringArray(Vec<String>),
    Int(i64),
    Double(f64),
    Bool(bool),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::String(_) => ValueType::String,
            Value::StringArray(_) => ValueType::StringArray,
            Value::Int(_) => ValueType::Int,
            Value::Double(_) => ValueType::Double,
            Value::Bool(_) => ValueType::Bool,
        }
    }

    /// Build a string array, refusing more than `MAX_ARRAY_SIZE` elements.
    pub fn strings<I, S>(items: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        check_array_len(items.len())?;
        Ok(Value::StringArray(items))
    }

    /// Parse command-line style arguments into a payload of the given type.
    pub fn parse_as(value_type: ValueType, args: &[String]) -> Result<Self, String> {
        if value_type == ValueType::StringArray {
            return Value::strings(args.iter().cloned()).map_err(|e| e.to_string());
        }
        let [arg] = args else {
            return Err(format!("{} takes exactly one value, got {}", value_type, args.len()));
        };
        match value_type {
            ValueType::String => Ok(Value::String(arg.clone())),
            ValueType::Int => arg
                .parse()
                .map(Value::Int)
                .map_err(|e| format!("Invalid int '{}': {}", arg, e)),
            ValueType::Double => arg
                .parse()
                .map(Value::Double)
                .map_err(|e| format!("Invalid double '{}': {}", arg, e)),
            ValueType::Bool => arg
                .parse()
                .map(Value::Bool)
                .map_err(|e| format!("Invalid bool '{}': {}", arg, e)),
            ValueType::StringArray => unreachable!("handled above"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::StringArray(items) => write!(f, "[{}]", items.join(", ")),
            Value::Int(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
        }
    }
}

pub(crate) fn check_array_len(len: usize) -> Result<(), ConfigError> {
    if len > MAX_ARRAY_SIZE {
        return Err(ConfigError::ArrayTooLarge {
            len,
            max: MAX_ARRAY_SIZE,
        });
    }
    Ok(())
}
