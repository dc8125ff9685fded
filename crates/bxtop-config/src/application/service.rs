//! `ConfigService`: the live configuration and its change tracking.
//!
//! # Lifecycle
//!
//! ```text
//! ConfigService::from_text(schema, file text or None, app version)
//!  ├─ parse → coerce → validate      (collects warnings)
//!  ├─ version check                   (may set `recreate`, adds info)
//!  └─ merge with schema defaults      (rejected / missing keys set `recreate`)
//!
//! service.set(key, value)             (checks value, sets `changed`)
//! service.apply_overrides(cli)        (session-only layer, never persisted)
//!
//! ConfigStore::save(&mut service)     (writes only if changed || recreate)
//! ```
//!
//! # Two flags
//!
//! - `changed`: a value was mutated through [`ConfigService::set`] since the
//!   file was last written.
//! - `recreate`: the file on disk is missing, from another version, missing
//!   keys or holds values that were rejected, so it must be rewritten in full.
//!
//! Neither flag is a config key; they are only reachable through the
//! read-only accessors and are cleared by a successful save.
//!
//! # Overrides
//!
//! Command-line flags such as `--debug` and `--boxes` change what the rest of
//! the application sees for this run only.  They live in a separate layer on
//! top of the snapshot: getters see them, saves do not, and they do not set
//! `changed`.  Calling [`ConfigService::set`] on an overridden key drops the
//! override so the explicit change is what gets persisted.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::application::coerce::Candidate;
use crate::application::diagnostics::Diagnostics;
use crate::application::validate::{check_value, validate_text};
use crate::domain::options::{parse_box_list, BoxName, LogLevel, OptionSet, SortingMode, TempScale};
use crate::domain::schema::Schema;
use crate::domain::value::{ConfigValue, ValueKind};
use crate::APP_NAME;

/// Error returned by [`ConfigService::set`].
#[derive(Debug, Error, PartialEq)]
pub enum SetError {
    /// The key is not part of the schema.
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// The value's type does not match the key's default.
    #[error("config key {key} must be {expected}, got {found}")]
    TypeMismatch {
        key: &'static str,
        expected: ValueKind,
        found: ValueKind,
    },

    /// The value has the right type but is not an accepted value for the key.
    #[error("value {value:?} is not allowed for config key {key}")]
    NotAllowed { key: &'static str, value: String },
}

/// Values supplied on the command line for this run only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--debug` forces [`LogLevel::Debug`].
    pub log_level: Option<LogLevel>,
    /// `--boxes "<list>"`.
    pub shown_boxes: Option<String>,
    /// `--low-color` forces `truecolor` off.
    pub truecolor: Option<bool>,
}

/// A fully populated key → value map.
///
/// Every schema key is present and every value has the key's type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConfigSnapshot {
    values: BTreeMap<&'static str, ConfigValue>,
}

impl ConfigSnapshot {
    /// A snapshot holding every schema default.
    pub fn defaults(schema: &Schema) -> Self {
        Self {
            values: schema
                .entries()
                .iter()
                .map(|e| (e.key, e.default.clone()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates in key-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ConfigValue)> + '_ {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    fn insert(&mut self, key: &'static str, value: ConfigValue) {
        self.values.insert(key, value);
    }
}

/// Owns the schema, the live values, the load diagnostics and the flags.
#[derive(Debug, Clone)]
pub struct ConfigService {
    schema: Schema,
    app_version: String,
    snapshot: ConfigSnapshot,
    overrides: HashMap<&'static str, ConfigValue>,
    diagnostics: Diagnostics,
    changed: bool,
    recreate: bool,
}

impl ConfigService {
    /// Builds the live configuration from the config file text.
    ///
    /// `text` is `None` when no config file exists; that is treated exactly
    /// like a file without a version header.
    pub fn from_text(schema: Schema, text: Option<&str>, app_version: &str) -> Self {
        let validated = validate_text(text.unwrap_or_default(), &schema);
        let mut diagnostics = validated.diagnostics;
        let mut recreate = false;

        match validated.version.as_deref() {
            None => {
                recreate = true;
                diagnostics.note("Config file malformatted or missing, will be recreated on exit!");
            }
            Some(v) if v != app_version => {
                recreate = true;
                diagnostics.note(format!(
                    "Config file version and {APP_NAME} version mismatch, will be recreated on exit!"
                ));
            }
            Some(_) => {}
        }

        let mut snapshot = ConfigSnapshot::defaults(&schema);
        for key in schema.keys() {
            match validated.candidates.get(key) {
                Some(Candidate::Accepted(value)) => snapshot.insert(key, value.clone()),
                Some(Candidate::Rejected) | None => {
                    debug!(key, "using default value");
                    recreate = true;
                }
            }
        }

        Self {
            schema,
            app_version: app_version.to_string(),
            snapshot,
            overrides: HashMap::new(),
            diagnostics,
            changed: false,
            recreate,
        }
    }

    /// A service holding only defaults, as if no config file existed.
    pub fn with_defaults(schema: Schema, app_version: &str) -> Self {
        Self::from_text(schema, None, app_version)
    }

    // ── Reading ───────────────────────────────────────────────────────────────

    /// Returns the effective value of `key`: the override if one is active,
    /// otherwise the snapshot value.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.overrides.get(key).or_else(|| self.snapshot.get(key))
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(ConfigValue::as_int)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(ConfigValue::as_bool)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ConfigValue::as_str)
    }

    pub fn log_level(&self) -> LogLevel {
        self.typed("log_level").unwrap_or(LogLevel::Warning)
    }

    pub fn sorting_mode(&self) -> SortingMode {
        self.typed("proc_sorting").unwrap_or(SortingMode::CpuLazy)
    }

    pub fn temp_scale(&self) -> TempScale {
        self.typed("temp_scale").unwrap_or(TempScale::Celsius)
    }

    pub fn shown_boxes(&self) -> Vec<BoxName> {
        self.get_str("shown_boxes")
            .and_then(|v| parse_box_list(v).ok())
            .unwrap_or_else(|| BoxName::ALL.to_vec())
    }

    fn typed<T: OptionSet>(&self, key: &str) -> Option<T> {
        self.get_str(key).and_then(T::from_name)
    }

    /// The values that would be persisted, without session overrides.
    pub fn snapshot(&self) -> &ConfigSnapshot {
        &self.snapshot
    }

    /// The values the application sees, overrides included.
    pub fn effective(&self) -> ConfigSnapshot {
        let mut effective = self.snapshot.clone();
        for (&key, value) in &self.overrides {
            effective.insert(key, value.clone());
        }
        effective
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    pub fn warnings(&self) -> &[String] {
        self.diagnostics.warnings()
    }

    pub fn info(&self) -> &[String] {
        self.diagnostics.info()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn needs_recreate(&self) -> bool {
        self.recreate
    }

    /// `true` when a save would write the file.
    pub fn needs_save(&self) -> bool {
        self.changed || self.recreate
    }

    // ── Mutation ──────────────────────────────────────────────────────────────

    /// Replaces the value of `key` and marks the configuration as changed.
    ///
    /// # Errors
    ///
    /// Returns [`SetError`] if the key is unknown, the value has the wrong
    /// type, or the value is not accepted for the key.  The stored value and
    /// the flags are untouched on error.
    pub fn set(&mut self, key: &str, value: impl Into<ConfigValue>) -> Result<(), SetError> {
        let value = value.into();
        let key = check_value(&self.schema, key, &value)?.key;

        self.overrides.remove(key);
        self.snapshot.insert(key, value);
        self.changed = true;
        Ok(())
    }

    /// Installs command-line overrides for this run.
    ///
    /// Does not set `changed`.  An invalid `--boxes` list is ignored with a
    /// warning, leaving the loaded value in effect.
    pub fn apply_overrides(&mut self, overrides: &CliOverrides) {
        if let Some(level) = overrides.log_level {
            self.overrides
                .insert("log_level", ConfigValue::from(level.as_str()));
        }

        if let Some(boxes) = &overrides.shown_boxes {
            match parse_box_list(boxes) {
                Ok(_) => {
                    self.overrides
                        .insert("shown_boxes", ConfigValue::from(boxes.trim()));
                }
                Err(token) => self.diagnostics.warn(format!(
                    "Command line argument \"--boxes\" contains invalid box name {token:?}!"
                )),
            }
        }

        if let Some(truecolor) = overrides.truecolor {
            self.overrides.insert("truecolor", ConfigValue::Bool(truecolor));
        }
    }

    /// Clears both flags after the file has been written.
    pub(crate) fn mark_persisted(&mut self) {
        self.changed = false;
        self.recreate = false;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
