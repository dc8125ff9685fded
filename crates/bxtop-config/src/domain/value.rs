//! Typed configuration values.
//!
//! Every schema key holds exactly one [`ConfigValue`].  The variant is fixed
//! by the key's default: a key whose default is an integer can only ever hold
//! an integer, and so on.  [`ValueKind`] is the type tag used to express that
//! rule without carrying a value around.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The semantic type of a schema key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Integer,
    Boolean,
    String,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Integer => "an integer",
            ValueKind::Boolean => "a boolean",
            ValueKind::String => "a string",
        };
        f.write_str(name)
    }
}

/// A single live configuration value.
///
/// Serialized untagged so a snapshot renders as plain JSON scalars
/// (`{"update_ms": 2000, "proc_tree": false}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl ConfigValue {
    /// Returns the type tag for this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            ConfigValue::Bool(_) => ValueKind::Boolean,
            ConfigValue::Int(_) => ValueKind::Integer,
            ConfigValue::Str(_) => ValueKind::String,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::Str(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Renders the value the way it appears on the right-hand side of a
    /// `key=value` line in the config file.
    ///
    /// Strings are quoted, booleans use the `True`/`False` spelling the file
    /// format has always used, integers are plain decimal.
    pub fn to_file_literal(&self) -> String {
        match self {
            ConfigValue::Bool(true) => "True".to_string(),
            ConfigValue::Bool(false) => "False".to_string(),
            ConfigValue::Int(v) => v.to_string(),
            ConfigValue::Str(v) => format!("\"{v}\""),
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(v) => write!(f, "{v}"),
            ConfigValue::Int(v) => write!(f, "{v}"),
            ConfigValue::Str(v) => f.write_str(v),
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(v: bool) -> Self {
        ConfigValue::Bool(v)
    }
}

impl From<i64> for ConfigValue {
    fn from(v: i64) -> Self {
        ConfigValue::Int(v)
    }
}

impl From<&str> for ConfigValue {
    fn from(v: &str) -> Self {
        ConfigValue::Str(v.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(v: String) -> Self {
        ConfigValue::Str(v)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
