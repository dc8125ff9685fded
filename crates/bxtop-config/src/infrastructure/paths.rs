//! Where bxtop keeps its files.
//!
//! | Path            | Location                                         |
//! |-----------------|--------------------------------------------------|
//! | config dir      | `$XDG_CONFIG_HOME/bxtop` or `~/.config/bxtop`    |
//! | config file     | `<config dir>/bxtop.conf`                        |
//! | user themes     | `<config dir>/themes`                            |
//! | error log       | `<config dir>/error.log`                         |
//! | system fallback | `/usr/local/etc/bxtop.conf` (BSD), `/etc/bxtop.conf` |
//!
//! The user file is always the save target.  When it does not exist yet the
//! system fallback, if present, is read instead so a packaged default can
//! seed the first run.

use std::path::{Path, PathBuf};

use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "bxtop.conf";
pub const ERROR_LOG_NAME: &str = "error.log";
pub const THEMES_DIR_NAME: &str = "themes";
const APP_DIR_NAME: &str = "bxtop";

/// Error type for resolving and creating the config directories.
#[derive(Debug, Error)]
pub enum PathError {
    /// Neither `XDG_CONFIG_HOME`, `HOME` nor `APPDATA` is set.
    #[error("could not determine the user config directory")]
    NoConfigBase,

    /// The process may not create or write to a required directory.
    #[error("no permission to write to \"{}\" directory", path.display())]
    PermissionDenied { path: PathBuf },

    /// Any other file system failure.
    #[error("I/O error creating {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Resolved locations of every file the configuration subsystem uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    pub themes_dir: PathBuf,
    pub error_log: PathBuf,
    pub system_file: PathBuf,
}

impl ConfigPaths {
    /// Resolves the paths from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NoConfigBase`] when no base directory variable is set.
    pub fn from_env() -> Result<Self, PathError> {
        let base = config_base_dir().ok_or(PathError::NoConfigBase)?;
        Ok(Self::in_dir(base.join(APP_DIR_NAME), system_config_file()))
    }

    /// Builds the path set rooted at `config_dir`.
    pub fn in_dir(config_dir: PathBuf, system_file: PathBuf) -> Self {
        Self {
            config_file: config_dir.join(CONFIG_FILE_NAME),
            themes_dir: config_dir.join(THEMES_DIR_NAME),
            error_log: config_dir.join(ERROR_LOG_NAME),
            config_dir,
            system_file,
        }
    }

    /// The file to load: the user file if it exists, else the system
    /// fallback if it exists, else `None`.
    pub fn read_path(&self) -> Option<PathBuf> {
        [&self.config_file, &self.system_file]
            .into_iter()
            .find(|p| p.is_file())
            .cloned()
    }

    /// Creates the config and themes directories.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::PermissionDenied`] when the OS refuses, which the
    /// binary treats as fatal, or [`PathError::Io`] for other failures.
    pub fn make_required_dirs(&self) -> Result<(), PathError> {
        create_dir(&self.config_dir)?;
        create_dir(&self.themes_dir)
    }
}

fn create_dir(path: &Path) -> Result<(), PathError> {
    std::fs::create_dir_all(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            PathError::PermissionDenied {
                path: path.to_path_buf(),
            }
        } else {
            PathError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// `$XDG_CONFIG_HOME`, then `$HOME/.config`, then `%APPDATA%`.
fn config_base_dir() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
        .or_else(|| std::env::var_os("APPDATA").map(PathBuf::from))
}

fn system_config_file() -> PathBuf {
    #[cfg(any(
        target_os = "freebsd",
        target_os = "openbsd",
        target_os = "netbsd",
        target_os = "dragonfly"
    ))]
    {
        PathBuf::from("/usr/local/etc").join(CONFIG_FILE_NAME)
    }

    #[cfg(not(any(
        target_os = "freebsd",
        target_os = "openbsd",
        target_os = "netbsd",
        target_os = "dragonfly"
    )))]
    {
        PathBuf::from("/etc").join(CONFIG_FILE_NAME)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn scratch() -> PathBuf {
        std::env::temp_dir().join(format!("bxtop_paths_{}", Uuid::new_v4()))
    }

    #[test]
    fn test_in_dir_places_files_under_config_dir() {
        let paths = ConfigPaths::in_dir(PathBuf::from("/home/u/.config/bxtop"), PathBuf::from("/etc/bxtop.conf"));

        assert_eq!(paths.config_file, PathBuf::from("/home/u/.config/bxtop/bxtop.conf"));
        assert_eq!(paths.themes_dir, PathBuf::from("/home/u/.config/bxtop/themes"));
        assert_eq!(paths.error_log, PathBuf::from("/home/u/.config/bxtop/error.log"));
    }

    #[test]
    fn test_read_path_prefers_user_file_then_fallback() {
        // Arrange
        let root = scratch();
        let paths = ConfigPaths::in_dir(root.join("user"), root.join("system.conf"));
        paths.make_required_dirs().expect("dirs");

        // Assert: nothing exists yet
        assert_eq!(paths.read_path(), None);

        // Fallback only
        std::fs::write(&paths.system_file, "").unwrap();
        assert_eq!(paths.read_path(), Some(paths.system_file.clone()));

        // User file wins
        std::fs::write(&paths.config_file, "").unwrap();
        assert_eq!(paths.read_path(), Some(paths.config_file.clone()));

        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_make_required_dirs_creates_config_and_themes() {
        let root = scratch();
        let paths = ConfigPaths::in_dir(root.join("bxtop"), root.join("none.conf"));

        paths.make_required_dirs().expect("dirs");

        assert!(paths.config_dir.is_dir());
        assert!(paths.themes_dir.is_dir());
        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_config_file_name_is_bxtop_conf() {
        if let Ok(paths) = ConfigPaths::from_env() {
            assert!(paths.config_file.ends_with("bxtop/bxtop.conf"));
        }
        // NoConfigBase in a stripped environment is also acceptable.
    }
}
