//! # bxtop-config
//!
//! The configuration subsystem of the bxtop system monitor: a typed schema of
//! every setting, a forgiving parser for the `bxtop.conf` file, the
//! validation rules each setting must pass, the live configuration with its
//! change tracking, and the writer that saves it back.
//!
//! # Architecture overview (for beginners)
//!
//! A user edits `~/.config/bxtop/bxtop.conf` by hand, so the file can contain
//! anything: typos, values from an older release, keys that no longer exist.
//! bxtop must still start.  The rule is simple: every bad value is replaced
//! by its default, a warning is recorded, and the file is rewritten in full
//! on exit so the user sees a clean, documented file next time.
//!
//! The crate is split in three layers:
//!
//! - **`domain`** – The schema: every key, its default value, its type and
//!   its set of accepted values.  No I/O.
//!
//! - **`application`** – The load pipeline (parse → coerce → validate →
//!   merge), the [`ConfigService`] holding the live values and the
//!   renderer producing the file text.  No I/O.
//!
//! - **`infrastructure`** – File paths, the config file itself and the host
//!   probes for temperature sensors and CPU time fields.
//!
//! # Typical use
//!
//! ```no_run
//! use bxtop_config::infrastructure::probe::{host_capabilities, NativeSensorSource};
//! use bxtop_config::{ConfigPaths, ConfigStore, Schema};
//!
//! let paths = ConfigPaths::from_env().expect("config dir");
//! let schema = Schema::new(host_capabilities(&NativeSensorSource::default()));
//! let store = ConfigStore::from_paths(&paths);
//!
//! let mut config = store.load(schema, "1.0.0");
//! config.set("proc_tree", true).expect("valid value");
//! store.save(&mut config).expect("writable config dir");
//! ```

// Declare the three top-level modules.
pub mod application;
pub mod domain;
pub mod infrastructure;

/// Program name used in the file header and the version-mismatch message.
pub const APP_NAME: &str = "bxtop";

// Re-export the most-used types at the crate root so callers can write
// `bxtop_config::ConfigService` instead of the full module path.
pub use application::diagnostics::Diagnostics;
pub use application::service::{CliOverrides, ConfigService, ConfigSnapshot, SetError};
pub use domain::options::{BoxName, LogLevel, OptionSet, SortingMode, TempScale, UnknownOption};
pub use domain::schema::{HostCapabilities, Schema};
pub use domain::value::{ConfigValue, ValueKind};
pub use infrastructure::paths::{ConfigPaths, PathError};
pub use infrastructure::storage::{ConfigStore, SaveOutcome, StorageError};
