//! Error log setup.
//!
//! bxtop owns the terminal while it runs, so log records cannot go to the
//! screen.  They are appended to `~/.config/bxtop/error.log` without ANSI
//! colour codes instead.  If that file cannot be opened, records go to
//! stderr so startup problems are still visible.
//!
//! Logging starts before the config file is read, so the level is set in
//! two steps:
//!
//! 1. [`init`] installs the subscriber at a provisional level (`WARNING`, or
//!    `DEBUG` with `--debug`) so probe and load records are not lost.
//! 2. [`LogHandle::set_level`] switches to the `log_level` from the loaded
//!    config once it is known.
//!
//! A `RUST_LOG` environment variable, when set and valid, takes precedence
//! over both and is never replaced.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use bxtop_config::LogLevel;
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{reload, EnvFilter, Registry};

/// Controls the level of the installed subscriber.
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
    /// `RUST_LOG` supplied the filter; config levels are ignored.
    env_override: bool,
}

impl LogHandle {
    /// Switches the filter to `level` unless `RUST_LOG` is in charge.
    pub fn set_level(&self, level: LogLevel) {
        if self.env_override {
            return;
        }
        if let Err(e) = self.filter.reload(level_filter(level)) {
            tracing::warn!("could not change log level to {level}: {e}");
        }
    }
}

/// Installs the global subscriber at `level`.  Call once, as early as the
/// log path is known.
///
/// Opening the log file is the only failure that can happen here, and it
/// falls back to stderr.
pub fn init(log_path: &Path, level: LogLevel) -> LogHandle {
    let (filter, env_override) = build_filter(level);

    match open_log_file(log_path) {
        Ok(file) => {
            let (subscriber, handle) = subscriber(Mutex::new(file), false, filter, env_override);
            subscriber.init();
            handle
        }
        Err(e) => {
            let (subscriber, handle) = subscriber(std::io::stderr, true, filter, env_override);
            subscriber.init();
            tracing::warn!("could not open {}: {e}, logging to stderr", log_path.display());
            handle
        }
    }
}

/// `RUST_LOG` if set and valid, otherwise `level`.  The flag reports
/// whether `RUST_LOG` was used.
pub fn build_filter(level: LogLevel) -> (EnvFilter, bool) {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (level_filter(level), false),
    }
}

fn level_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::new(level.to_level_filter().to_string())
}

/// Builds a fmt subscriber behind a reloadable filter, without installing it.
fn subscriber<W>(
    writer: W,
    ansi: bool,
    filter: EnvFilter,
    env_override: bool,
) -> (impl Subscriber + Send + Sync + 'static, LogHandle)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let (filter, handle) = reload::Layer::new(filter);
    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_ansi(ansi)
            .with_writer(writer),
    );
    (
        subscriber,
        LogHandle {
            filter: handle,
            env_override,
        },
    )
}

/// Opens `path` for appending, creating it if needed.
pub fn open_log_file(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;
    use uuid::Uuid;

    /// In-memory log sink shared between the subscriber and the test.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, bytes: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_records_before_config_load_are_kept_and_level_applies_after() {
        // Arrange: provisional DEBUG level, as with --debug
        let buf = SharedBuf::default();
        let sink = buf.clone();
        let (subscriber, handle) =
            subscriber(move || sink.clone(), false, level_filter(LogLevel::Debug), false);

        // Act
        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("sensor probe failed");
            tracing::error!("I/O error accessing config");
            handle.set_level(LogLevel::Error);
            tracing::warn!("after load warning");
            tracing::error!("after load error");
        });

        // Assert
        let log = buf.contents();
        assert!(log.contains("sensor probe failed"));
        assert!(log.contains("I/O error accessing config"));
        assert!(!log.contains("after load warning"));
        assert!(log.contains("after load error"));
        assert!(!log.contains("\u{1b}["), "file output must not contain ANSI codes");
    }

    #[test]
    fn test_env_override_ignores_config_level() {
        let buf = SharedBuf::default();
        let sink = buf.clone();
        let (subscriber, handle) =
            subscriber(move || sink.clone(), false, level_filter(LogLevel::Info), true);

        tracing::subscriber::with_default(subscriber, || {
            handle.set_level(LogLevel::Error);
            tracing::info!("still visible");
        });

        assert!(buf.contents().contains("still visible"));
    }

    #[test]
    fn test_open_log_file_appends() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("bxtop_log_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("error.log");

        // Act
        writeln!(open_log_file(&path).unwrap(), "first").unwrap();
        writeln!(open_log_file(&path).unwrap(), "second").unwrap();

        // Assert
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_open_log_file_in_missing_dir_fails() {
        let path = Path::new("/nonexistent/bxtop/dir/error.log");
        assert!(open_log_file(path).is_err());
    }
}
