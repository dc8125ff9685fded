//! Reads and writes the config file.
//!
//! [`ConfigStore`] is the only place that touches the file on disk.  It holds
//! two paths because the file that is read and the file that is written are
//! not always the same: a system-wide `/etc/bxtop.conf` may seed the first
//! run, but changes are always written to the user's own file.
//!
//! Both directions are forgiving.  A read failure is logged and the load
//! carries on as if there were no file; a write failure is logged and
//! returned, and the in-memory configuration stays authoritative.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, error, info};

use crate::application::render::render_config;
use crate::application::service::ConfigService;
use crate::domain::schema::Schema;
use crate::infrastructure::paths::ConfigPaths;

/// Error type for config file I/O.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What [`ConfigStore::save`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing changed and the file was current; no write happened.
    Skipped,
    /// The file was written.
    Written,
}

/// File-backed source and sink for a [`ConfigService`].
#[derive(Debug, Clone)]
pub struct ConfigStore {
    read_path: Option<PathBuf>,
    write_path: PathBuf,
}

impl ConfigStore {
    /// Creates a store that loads from `read_path` (if any) and saves to `write_path`.
    pub fn new(read_path: Option<PathBuf>, write_path: PathBuf) -> Self {
        Self {
            read_path,
            write_path,
        }
    }

    /// Creates a store using the resolved platform paths.
    pub fn from_paths(paths: &ConfigPaths) -> Self {
        Self::new(paths.read_path(), paths.config_file.clone())
    }

    pub fn read_path(&self) -> Option<&Path> {
        self.read_path.as_deref()
    }

    pub fn write_path(&self) -> &Path {
        &self.write_path
    }

    /// Loads the configuration, falling back to defaults for anything missing.
    ///
    /// Never fails: an unreadable file is logged at error level and treated as
    /// absent, which also marks the configuration for recreation.
    pub fn load(&self, schema: Schema, app_version: &str) -> ConfigService {
        let text = match &self.read_path {
            Some(path) => match read_config_file(path) {
                Ok(text) => text,
                Err(e) => {
                    error!("{e}");
                    None
                }
            },
            None => {
                debug!("no config file found, using defaults");
                None
            }
        };

        ConfigService::from_text(schema, text.as_deref(), app_version)
    }

    /// Writes the configuration if it changed or the file must be recreated.
    ///
    /// On success both flags are cleared.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory or file cannot be
    /// written.  The error is also logged; the service and its flags are left
    /// untouched so a later save can try again.
    pub fn save(&self, service: &mut ConfigService) -> Result<SaveOutcome, StorageError> {
        if !service.needs_save() {
            debug!("config unchanged, skipping save");
            return Ok(SaveOutcome::Skipped);
        }

        let content = render_config(service.schema(), service.snapshot(), service.app_version());
        if let Err(e) = write_config_file(&self.write_path, &content) {
            error!("{e}");
            return Err(e);
        }

        info!(path = %self.write_path.display(), "config saved");
        service.mark_persisted();
        Ok(SaveOutcome::Written)
    }
}

/// Reads the config file, returning `None` if it does not exist.
///
/// # Errors
///
/// Returns [`StorageError::Io`] for file-system errors other than "not found".
pub fn read_config_file(path: &Path) -> Result<Option<String>, StorageError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StorageError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Writes `content` to `path`, creating the parent directory and the file if
/// needed and replacing any existing file.
///
/// # Errors
///
/// Returns [`StorageError::Io`] for file-system failures.
pub fn write_config_file(path: &Path, content: &str) -> Result<(), StorageError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| StorageError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    std::fs::write(path, content).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    const VERSION: &str = "1.0.0";

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("bxtop_storage_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn test_read_config_file_returns_none_when_absent() {
        let path = PathBuf::from("/nonexistent/path/that/cannot/exist/bxtop.conf");
        assert!(matches!(read_config_file(&path), Ok(None)));
    }

    #[test]
    fn test_load_without_read_path_uses_defaults() {
        let store = ConfigStore::new(None, PathBuf::from("/unused/bxtop.conf"));

        let svc = store.load(Schema::default(), VERSION);

        assert!(svc.needs_recreate());
        assert_eq!(svc.get_int("update_ms"), Some(2000));
    }

    #[test]
    fn test_load_from_directory_path_logs_and_uses_defaults() {
        // Arrange: reading a directory as a file is an I/O error other than NotFound
        let dir = temp_dir();
        let store = ConfigStore::new(Some(dir.clone()), dir.join("bxtop.conf"));

        // Act
        let svc = store.load(Schema::default(), VERSION);

        // Assert
        assert!(svc.needs_recreate());
        assert_eq!(svc.get_str("log_level"), Some("WARNING"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_creates_file_then_skips_when_unchanged() {
        // Arrange
        let dir = temp_dir();
        let path = dir.join("nested").join("bxtop.conf");
        let store = ConfigStore::new(None, path.clone());
        let mut svc = store.load(Schema::default(), VERSION);

        // Act
        let first = store.save(&mut svc).expect("first save");
        let second = store.save(&mut svc).expect("second save");

        // Assert
        assert_eq!(first, SaveOutcome::Written);
        assert_eq!(second, SaveOutcome::Skipped);
        let text = std::fs::read_to_string(&path).expect("file written");
        assert!(text.starts_with("#? Config file for bxtop v. 1.0.0"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_failure_keeps_flags_set() {
        // Arrange: the write target is an existing directory
        let dir = temp_dir();
        let store = ConfigStore::new(None, dir.clone());
        let mut svc = store.load(Schema::default(), VERSION);

        // Act
        let result = store.save(&mut svc);

        // Assert
        assert!(matches!(result, Err(StorageError::Io { .. })));
        assert!(svc.needs_recreate());

        std::fs::remove_dir_all(&dir).ok();
    }
}
