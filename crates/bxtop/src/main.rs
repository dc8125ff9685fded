//! bxtop: entry point.
//!
//! Brings the configuration up, reports what happened while loading, and
//! saves the configuration on the way out.  The monitor UI itself is driven
//! by the loaded [`ConfigService`]; this binary owns its lifetime.
//!
//! # What happens at startup
//!
//! 1. The command line is parsed.  `--version` prints and exits with 0.
//! 2. The config, themes and log paths are resolved and the directories are
//!    created.  A permission error here is fatal: exit status 1.
//! 3. Logging is started at a provisional level (`WARNING`, or `DEBUG`
//!    with `--debug`).
//! 4. The host is probed for temperature sensors and CPU time fields, and
//!    the schema is built from the result.
//! 5. `bxtop.conf` is loaded and validated; command-line overrides are
//!    layered on top.  The log switches to the configured level and every
//!    load warning and info message is written to the error log.
//! 6. On exit the configuration is saved if it changed or must be recreated.

use std::process::ExitCode;

use anyhow::Context;
use bxtop::cli::{version_line, Cli};
use bxtop::logging;
use bxtop_config::infrastructure::probe::{host_capabilities, NativeSensorSource};
use bxtop_config::{ConfigPaths, ConfigService, ConfigStore, LogLevel, PathError, Schema};
use tracing::{debug, info, warn};

/// Version written into the config file header.
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> anyhow::Result<ExitCode> {
    // ── Parse CLI arguments ───────────────────────────────────────────────────
    let cli = Cli::parse_normalized();

    if cli.version {
        println!("{}", version_line(VERSION));
        return Ok(ExitCode::SUCCESS);
    }

    // ── Paths ─────────────────────────────────────────────────────────────────
    let paths = ConfigPaths::from_env().context("resolving the bxtop config directory")?;

    match paths.make_required_dirs() {
        Ok(()) => {}
        Err(PathError::PermissionDenied { path }) => {
            eprintln!("ERROR!\nNo permission to write to \"{}\" directory!", path.display());
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e).context("creating the bxtop config directories"),
    }

    // ── Logging setup ─────────────────────────────────────────────────────────
    // Installed before probing and loading so their records reach the log.
    let provisional = if cli.debug { LogLevel::Debug } else { LogLevel::Warning };
    let logger = logging::init(&paths.error_log, provisional);
    info!("bxtop version {VERSION} started");
    if cli.debug {
        info!("Running in DEBUG mode!");
    }

    // ── Configuration ─────────────────────────────────────────────────────────
    let schema = Schema::new(host_capabilities(&NativeSensorSource::default()));
    let store = ConfigStore::from_paths(&paths);
    let mut config = store.load(schema, VERSION);
    config.apply_overrides(&cli.to_overrides());
    logger.set_level(config.log_level());
    report_load(&config);

    // ── Shutdown ──────────────────────────────────────────────────────────────
    // A failed save is logged by the store; the exit status stays 0 because
    // the session itself ran fine.
    if store.save(&mut config).is_err() {
        warn!("configuration changes from this session were not saved");
    }

    info!("bxtop stopped");
    Ok(ExitCode::SUCCESS)
}

/// Writes the load diagnostics and the effective configuration to the log.
fn report_load(config: &ConfigService) {
    for message in config.info() {
        info!("{message}");
    }
    for message in config.warnings() {
        warn!("{message}");
    }

    if config.log_level() >= LogLevel::Debug {
        match serde_json::to_string(&config.effective()) {
            Ok(json) => debug!(config = %json, "effective configuration"),
            Err(e) => debug!("could not serialize configuration: {e}"),
        }
    }
}
