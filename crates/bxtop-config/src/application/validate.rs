//! Semantic validation of coerced values.
//!
//! The chain is a list of independent rules.  Each rule looks at the key (or
//! keys) it owns and either leaves the candidate alone, repairs it, or turns
//! it into [`Candidate::Rejected`] and records a warning.  Keys that were not
//! in the file, or that failed coercion, are simply absent and every rule
//! skips them.
//!
//! | Rule                | Keys                                  | On failure |
//! |---------------------|---------------------------------------|------------|
//! | sorting mode        | `proc_sorting`                        | reject     |
//! | log level           | `log_level`                           | reject     |
//! | update interval     | `update_ms`                           | clamp      |
//! | network rates       | `net_download`, `net_upload`          | reject     |
//! | cpu sensor          | `cpu_sensor`                          | reject     |
//! | shown boxes         | `shown_boxes`                         | reject     |
//! | cpu graph fields    | `cpu_graph_upper`, `cpu_graph_lower`  | reject     |
//! | temperature scale   | `temp_scale`                          | reject     |
//!
//! The same checks back [`check_value`], which guards runtime mutation.

use crate::application::coerce::{coerce, Candidate, Candidates};
use crate::application::diagnostics::Diagnostics;
use crate::application::parser::parse_config_text;
use crate::domain::options::parse_box_list;
use crate::domain::schema::{Membership, Schema, SchemaEntry};
use crate::domain::value::ConfigValue;
use crate::SetError;

/// Lowest accepted refresh interval in milliseconds.
pub const MIN_UPDATE_MS: i64 = 100;

/// Keys whose value must begin with a digit (e.g. `"10M"`, `"100mbit"`).
pub const NET_RATE_KEYS: [&str; 2] = ["net_download", "net_upload"];

/// Keys naming a CPU stat field for the two halves of the CPU graph.
pub const CPU_GRAPH_KEYS: [&str; 2] = ["cpu_graph_upper", "cpu_graph_lower"];

/// A single validation rule.
pub type Rule = fn(&mut Candidates, &Schema, &mut Diagnostics);

/// An ordered list of rules applied to the coerced candidates.
pub struct ValidationChain {
    rules: Vec<Rule>,
}

impl ValidationChain {
    /// The rule set every config file goes through.
    pub fn standard() -> Self {
        Self {
            rules: vec![
                check_proc_sorting as Rule,
                check_log_level,
                check_update_ms,
                check_net_rates,
                check_cpu_sensor,
                check_shown_boxes,
                check_cpu_graphs,
                check_temp_scale,
            ],
        }
    }

    pub fn run(&self, candidates: &mut Candidates, schema: &Schema, diagnostics: &mut Diagnostics) {
        for rule in &self.rules {
            rule(candidates, schema, diagnostics);
        }
    }
}

impl Default for ValidationChain {
    fn default() -> Self {
        Self::standard()
    }
}

/// Outcome of running a whole config file through parse, coerce and validate.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub version: Option<String>,
    pub candidates: Candidates,
    pub diagnostics: Diagnostics,
}

/// Runs `text` through the full lexical, coercion and validation pipeline.
pub fn validate_text(text: &str, schema: &Schema) -> ValidatedConfig {
    let raw = parse_config_text(text, schema);
    let mut diagnostics = Diagnostics::new();
    let mut candidates = coerce(&raw, schema, &mut diagnostics);
    ValidationChain::standard().run(&mut candidates, schema, &mut diagnostics);
    ValidatedConfig {
        version: raw.version,
        candidates,
        diagnostics,
    }
}

// ── Rules ─────────────────────────────────────────────────────────────────────

/// Rejects `key` unless its accepted string value satisfies `ok`.
fn reject_unless(
    candidates: &mut Candidates,
    key: &'static str,
    diagnostics: &mut Diagnostics,
    warning: &str,
    ok: impl Fn(&str) -> bool,
) {
    let passes = match candidates.get(key).and_then(Candidate::accepted) {
        Some(ConfigValue::Str(value)) => ok(value.as_str()),
        _ => return,
    };
    if !passes {
        candidates.insert(key, Candidate::Rejected);
        diagnostics.warn(format!("Config key \"{key}\" {warning}"));
    }
}

fn check_membership(
    candidates: &mut Candidates,
    schema: &Schema,
    diagnostics: &mut Diagnostics,
    key: &'static str,
    membership: Membership,
    warning: &str,
) {
    reject_unless(candidates, key, diagnostics, warning, |v| {
        schema.accepts(membership, v)
    });
}

fn check_proc_sorting(c: &mut Candidates, schema: &Schema, diag: &mut Diagnostics) {
    check_membership(
        c,
        schema,
        diag,
        "proc_sorting",
        Membership::SortingMode,
        "didn't get an acceptable value!",
    );
}

fn check_log_level(c: &mut Candidates, schema: &Schema, diag: &mut Diagnostics) {
    check_membership(
        c,
        schema,
        diag,
        "log_level",
        Membership::LogLevel,
        "didn't get an acceptable value!",
    );
}

fn check_update_ms(c: &mut Candidates, _schema: &Schema, diag: &mut Diagnostics) {
    if let Some(Candidate::Accepted(ConfigValue::Int(ms))) = c.get_mut("update_ms") {
        if *ms < MIN_UPDATE_MS {
            *ms = MIN_UPDATE_MS;
            diag.warn(format!(
                "Config key \"update_ms\" can't be lower than {MIN_UPDATE_MS}!"
            ));
        }
    }
}

fn check_net_rates(c: &mut Candidates, _schema: &Schema, diag: &mut Diagnostics) {
    for key in NET_RATE_KEYS {
        reject_unless(c, key, diag, "must start with a number!", starts_with_digit);
    }
}

fn check_cpu_sensor(c: &mut Candidates, schema: &Schema, diag: &mut Diagnostics) {
    check_membership(
        c,
        schema,
        diag,
        "cpu_sensor",
        Membership::CpuSensor,
        "does not contain an available sensor!",
    );
}

fn check_shown_boxes(c: &mut Candidates, _schema: &Schema, diag: &mut Diagnostics) {
    reject_unless(c, "shown_boxes", diag, "contains invalid box names!", |v| {
        parse_box_list(v).is_ok()
    });
}

fn check_cpu_graphs(c: &mut Candidates, schema: &Schema, diag: &mut Diagnostics) {
    for key in CPU_GRAPH_KEYS {
        check_membership(
            c,
            schema,
            diag,
            key,
            Membership::CpuStatField,
            "does not contain an available cpu stat attribute!",
        );
    }
}

fn check_temp_scale(c: &mut Candidates, schema: &Schema, diag: &mut Diagnostics) {
    check_membership(
        c,
        schema,
        diag,
        "temp_scale",
        Membership::TempScale,
        "does not contain a recognized temperature scale!",
    );
}

/// Only the first character is inspected; `"10Mbit-garbage"` passes.
fn starts_with_digit(value: &str) -> bool {
    value.chars().next().is_some_and(|c| c.is_ascii_digit())
}

// ── Runtime checks ────────────────────────────────────────────────────────────

/// Checks a value about to be stored by `ConfigService::set`.
///
/// Applies the type tag, the key's membership set and the same semantic
/// rules the chain applies to file input.  Unlike the chain, an `update_ms`
/// below the floor is refused rather than clamped so callers see the error.
/// Strings the file format cannot carry are refused as well, see
/// [`is_file_safe`].
///
/// Returns the key's schema entry on success.
///
/// # Errors
///
/// Returns [`SetError`] describing the first rule the value breaks.
pub fn check_value<'s>(
    schema: &'s Schema,
    key: &str,
    value: &ConfigValue,
) -> Result<&'s SchemaEntry, SetError> {
    let entry = schema
        .entry(key)
        .ok_or_else(|| SetError::UnknownKey(key.to_string()))?;

    if value.kind() != entry.kind() {
        return Err(SetError::TypeMismatch {
            key: entry.key,
            expected: entry.kind(),
            found: value.kind(),
        });
    }

    let allowed = match value {
        ConfigValue::Str(s) if !is_file_safe(s) => false,
        ConfigValue::Str(s) => {
            let member_ok = entry.membership.map_or(true, |m| schema.accepts(m, s));
            let rate_ok = !NET_RATE_KEYS.contains(&entry.key) || starts_with_digit(s);
            member_ok && rate_ok
        }
        ConfigValue::Int(ms) if entry.key == "update_ms" => *ms >= MIN_UPDATE_MS,
        _ => true,
    };

    if allowed {
        Ok(entry)
    } else {
        Err(SetError::NotAllowed {
            key: entry.key,
            value: value.to_string(),
        })
    }
}

/// `true` if a string value reads back unchanged after being written as
/// `key="value"`.
///
/// The reader is line based and strips every leading and trailing `"`, so a
/// value may not contain a line break or begin or end with a quote.
pub fn is_file_safe(value: &str) -> bool {
    !value.contains(['\n', '\r']) && !value.starts_with('"') && !value.ends_with('"')
}

// ── Tests ─────────────────────────────────────────────────────────────────────
