//! Lexical pass over the config file text.
//!
//! # File format
//!
//! ```text
//! #? Config file for bxtop v. 1.0.0
//!
//! #* Update time in milliseconds ...
//! update_ms=2000
//!
//! #* Processes sorting ...
//! proc_sorting="cpu lazy"
//! ```
//!
//! - The `#? Config` line carries the version that wrote the file.
//! - Any line without `=` is ignored, which covers comments and blank lines.
//! - `key=value` lines are split on the first `=`; surrounding double quotes
//!   are stripped from the value.
//! - Keys the schema does not know are skipped, so files written by older or
//!   newer releases still load.
//!
//! No type checking happens here; see `coerce` and `validate`.

use std::collections::HashMap;

use crate::domain::schema::Schema;

/// Prefix of the header line that carries the file version.
pub const VERSION_MARKER: &str = "#? Config";

/// Token that precedes the version on the header line.
const VERSION_TOKEN: &str = "v. ";

/// Result of the lexical pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawConfig {
    /// Version declared on the header line, if there was one.
    ///
    /// A header without the `v. ` token yields `Some("")`, which never equals
    /// a real version and so forces a rewrite.
    pub version: Option<String>,
    /// Recognised keys and their unquoted textual values.
    pub values: HashMap<&'static str, String>,
}

/// Splits config file text into a version and a raw key/value map.
pub fn parse_config_text(text: &str, schema: &Schema) -> RawConfig {
    let mut raw = RawConfig::default();

    for line in text.lines() {
        let line = line.trim();

        if line.starts_with(VERSION_MARKER) {
            let version = line
                .split_once(VERSION_TOKEN)
                .map(|(_, v)| v.trim())
                .unwrap_or_default();
            raw.version = Some(version.to_string());
            continue;
        }

        if line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        // Resolve to the schema's own &'static str so the map owns no key strings.
        let Some(entry) = schema.entry(key.trim()) else {
            continue;
        };

        let value = value.trim().trim_matches('"');
        raw.values.insert(entry.key, value.to_string());
    }

    raw
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reads_version_from_header() {
        // Arrange
        let text = "#? Config file for bxtop v. 1.2.3\nupdate_ms=1000\n";

        // Act
        let raw = parse_config_text(text, &Schema::default());

        // Assert
        assert_eq!(raw.version.as_deref(), Some("1.2.3"));
        assert_eq!(raw.values.get("update_ms").map(String::as_str), Some("1000"));
    }

    #[test]
    fn test_parse_without_header_has_no_version() {
        let raw = parse_config_text("update_ms=1000", &Schema::default());
        assert_eq!(raw.version, None);
    }

    #[test]
    fn test_parse_header_without_version_token_yields_empty_version() {
        let raw = parse_config_text("#? Config file for bxtop", &Schema::default());
        assert_eq!(raw.version.as_deref(), Some(""));
    }

    #[test]
    fn test_parse_strips_quotes_and_ignores_comments() {
        // Arrange
        let text = concat!(
            "#* Processes sorting\n",
            "proc_sorting=\"cpu lazy\"\n",
            "\n",
            "# a plain comment\n",
            "color_theme=\"+monokai\"\n",
        );

        // Act
        let raw = parse_config_text(text, &Schema::default());

        // Assert
        assert_eq!(raw.values.len(), 2);
        assert_eq!(raw.values["proc_sorting"], "cpu lazy");
        assert_eq!(raw.values["color_theme"], "+monokai");
    }

    #[test]
    fn test_parse_ignores_unknown_keys() {
        let raw = parse_config_text("no_such_option=1\nupdate_ms=500", &Schema::default());
        assert_eq!(raw.values.len(), 1);
        assert!(raw.values.contains_key("update_ms"));
    }

    #[test]
    fn test_parse_splits_on_first_equals_only() {
        let text = "disks_filter=\"exclude=/boot, /home/user\"";
        let raw = parse_config_text(text, &Schema::default());
        assert_eq!(raw.values["disks_filter"], "exclude=/boot, /home/user");
    }

    #[test]
    fn test_parse_later_assignment_wins() {
        let raw = parse_config_text("tree_depth=3\ntree_depth=7", &Schema::default());
        assert_eq!(raw.values["tree_depth"], "7");
    }

    #[test]
    fn test_parse_tolerates_spaces_around_equals() {
        let raw = parse_config_text("  update_ms = 750  ", &Schema::default());
        assert_eq!(raw.values["update_ms"], "750");
    }
}
