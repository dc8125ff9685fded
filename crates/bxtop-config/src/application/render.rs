//! Renders the live configuration as documented config file text.
//!
//! The output always contains every schema key in registry order, each
//! preceded by its `#*` documentation block, under a `#? Config` header that
//! records the running version.  Loading the rendered text back yields the
//! same snapshot with `recreate` unset.

use crate::application::parser::VERSION_MARKER;
use crate::application::service::ConfigSnapshot;
use crate::domain::schema::Schema;
use crate::APP_NAME;

/// Prefix of documentation comment lines.
const DOC_PREFIX: &str = "#*";

/// Produces the full config file for `snapshot`.
///
/// Keys missing from the snapshot (which a snapshot built by `ConfigService`
/// never has) fall back to the schema default so the output is always complete.
pub fn render_config(schema: &Schema, snapshot: &ConfigSnapshot, app_version: &str) -> String {
    let mut out = format!("{VERSION_MARKER} file for {APP_NAME} v. {app_version}\n");

    for entry in schema.entries() {
        if !entry.doc.is_empty() {
            out.push('\n');
            for line in entry.doc {
                out.push_str(DOC_PREFIX);
                out.push(' ');
                out.push_str(line);
                out.push('\n');
            }
        }

        let value = snapshot.get(entry.key).unwrap_or(&entry.default);
        out.push_str(entry.key);
        out.push('=');
        out.push_str(&value.to_file_literal());
        out.push('\n');
    }

    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::service::ConfigService;

    #[test]
    fn test_render_starts_with_versioned_header() {
        let schema = Schema::default();
        let text = render_config(&schema, &ConfigSnapshot::defaults(&schema), "2.0.1");

        assert!(text.starts_with("#? Config file for bxtop v. 2.0.1\n"));
    }

    #[test]
    fn test_render_writes_every_key_once_in_schema_order() {
        // Arrange
        let schema = Schema::default();

        // Act
        let text = render_config(&schema, &ConfigSnapshot::defaults(&schema), "1.0.0");

        // Assert
        let written: Vec<&str> = text
            .lines()
            .filter(|l| !l.starts_with('#') && l.contains('='))
            .map(|l| l.split_once('=').map(|(k, _)| k).unwrap_or_default())
            .collect();
        let expected: Vec<&str> = schema.keys().collect();
        assert_eq!(written, expected);
    }

    #[test]
    fn test_render_precedes_assignment_with_doc_block() {
        let schema = Schema::default();
        let text = render_config(&schema, &ConfigSnapshot::defaults(&schema), "1.0.0");

        let lines: Vec<&str> = text.lines().collect();
        let idx = lines
            .iter()
            .position(|l| l.starts_with("update_ms="))
            .expect("update_ms written");
        assert!(lines[idx - 1].starts_with("#* Update time in milliseconds"));
        assert_eq!(lines[idx], "update_ms=2000");
    }

    #[test]
    fn test_render_uses_live_values_and_file_literals() {
        // Arrange
        let mut svc = ConfigService::with_defaults(Schema::default(), "1.0.0");
        svc.set("proc_sorting", "memory").expect("valid");
        svc.set("proc_tree", true).expect("valid");

        // Act
        let text = render_config(svc.schema(), svc.snapshot(), svc.app_version());

        // Assert
        assert!(text.contains("\nproc_sorting=\"memory\"\n"));
        assert!(text.contains("\nproc_tree=True\n"));
        assert!(text.contains("\nnet_download=\"10M\"\nnet_upload=\"10M\"\n"));
    }
}
