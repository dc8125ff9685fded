//! Converts raw textual values to the type of each key's default.
//!
//! The type comes from the schema, never from the text: `update_ms="2000"`
//! and `update_ms=2000` both coerce to an integer because the default of
//! `update_ms` is an integer.  A value that does not coerce is dropped with a
//! warning and the key falls back to its default when the snapshot is built.

use std::collections::HashMap;

use crate::application::diagnostics::Diagnostics;
use crate::application::parser::RawConfig;
use crate::domain::schema::Schema;
use crate::domain::value::{ConfigValue, ValueKind};

/// A per-key verdict carried through the validation chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// The value passed every check so far.
    Accepted(ConfigValue),
    /// A check refused the value; the default is used and the file is rewritten.
    Rejected,
}

impl Candidate {
    pub fn accepted(&self) -> Option<&ConfigValue> {
        match self {
            Candidate::Accepted(v) => Some(v),
            Candidate::Rejected => None,
        }
    }
}

/// Candidates keyed by schema key.
pub type Candidates = HashMap<&'static str, Candidate>;

/// Coerces every raw value in schema order so warnings come out in file order.
pub fn coerce(raw: &RawConfig, schema: &Schema, diagnostics: &mut Diagnostics) -> Candidates {
    let mut candidates = Candidates::with_capacity(raw.values.len());

    for entry in schema.entries() {
        let Some(text) = raw.values.get(entry.key) else {
            continue;
        };

        let value = match entry.kind() {
            ValueKind::Integer => match parse_int(text) {
                Some(v) => ConfigValue::Int(v),
                None => {
                    diagnostics.warn(format!("Config key \"{}\" should be an integer!", entry.key));
                    continue;
                }
            },
            ValueKind::Boolean => match parse_bool(text) {
                Some(v) => ConfigValue::Bool(v),
                None => {
                    diagnostics.warn(format!(
                        "Config key \"{}\" can only be True or False!",
                        entry.key
                    ));
                    continue;
                }
            },
            ValueKind::String => ConfigValue::Str(text.clone()),
        };

        candidates.insert(entry.key, Candidate::Accepted(value));
    }

    candidates
}

/// Parses a base-10 integer with an optional sign.
pub fn parse_int(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

/// Parses the usual spellings of true and false, ignoring case.
///
/// Accepts `y yes t true on 1` and `n no f false off 0`.
pub fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "t" | "true" | "on" | "1" => Some(true),
        "n" | "no" | "f" | "false" | "off" | "0" => Some(false),
        _ => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::parser::parse_config_text;

    fn coerce_text(text: &str) -> (Candidates, Diagnostics) {
        let schema = Schema::default();
        let raw = parse_config_text(text, &schema);
        let mut diag = Diagnostics::new();
        let candidates = coerce(&raw, &schema, &mut diag);
        (candidates, diag)
    }

    #[test]
    fn test_parse_bool_accepts_common_spellings() {
        for t in ["True", "TRUE", "yes", "Y", "on", "1", "t"] {
            assert_eq!(parse_bool(t), Some(true), "{t}");
        }
        for f in ["False", "no", "N", "off", "0", "F"] {
            assert_eq!(parse_bool(f), Some(false), "{f}");
        }
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn test_parse_int_accepts_sign_and_rejects_garbage() {
        assert_eq!(parse_int("2000"), Some(2000));
        assert_eq!(parse_int("-5"), Some(-5));
        assert_eq!(parse_int("+7"), Some(7));
        assert_eq!(parse_int("2k"), None);
        assert_eq!(parse_int("1.5"), None);
    }

    #[test]
    fn test_coerce_uses_default_type_not_quoting() {
        // Arrange / Act: quoted integer and unquoted boolean
        let (candidates, diag) = coerce_text("update_ms=\"1500\"\nproc_tree=True");

        // Assert
        assert!(diag.is_empty());
        assert_eq!(
            candidates["update_ms"],
            Candidate::Accepted(ConfigValue::Int(1500))
        );
        assert_eq!(
            candidates["proc_tree"],
            Candidate::Accepted(ConfigValue::Bool(true))
        );
    }

    #[test]
    fn test_coerce_drops_bad_integer_with_warning() {
        let (candidates, diag) = coerce_text("update_ms=fast");

        assert!(!candidates.contains_key("update_ms"));
        assert_eq!(diag.warnings(), ["Config key \"update_ms\" should be an integer!"]);
    }

    #[test]
    fn test_coerce_drops_bad_boolean_with_warning() {
        let (candidates, diag) = coerce_text("truecolor=sometimes");

        assert!(!candidates.contains_key("truecolor"));
        assert_eq!(
            diag.warnings(),
            ["Config key \"truecolor\" can only be True or False!"]
        );
    }

    #[test]
    fn test_coerce_keeps_strings_verbatim() {
        let (candidates, _) = coerce_text("draw_clock=\"%H:%M\"\ncustom_cpu_name=");

        assert_eq!(
            candidates["draw_clock"],
            Candidate::Accepted(ConfigValue::from("%H:%M"))
        );
        assert_eq!(
            candidates["custom_cpu_name"],
            Candidate::Accepted(ConfigValue::from(""))
        );
    }

    #[test]
    fn test_coerce_warnings_follow_schema_order() {
        let (_, diag) = coerce_text("log_level=DEBUG\nupdate_ms=x\ntheme_background=x");

        // theme_background precedes update_ms in the schema
        assert_eq!(
            diag.warnings(),
            [
                "Config key \"theme_background\" can only be True or False!",
                "Config key \"update_ms\" should be an integer!",
            ]
        );
    }
}
