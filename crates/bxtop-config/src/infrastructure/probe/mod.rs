//! Host probing for the two dynamic option sets.
//!
//! `cpu_sensor` may name any temperature sensor the host exposes, and
//! `cpu_graph_upper` / `cpu_graph_lower` may name any per-CPU time field the
//! OS reports.  Both sets are discovered once at startup, before the schema
//! is built, and passed in as [`HostCapabilities`].
//!
//! # Platform implementations
//!
//! Sensors come from a [`SensorSource`]; the native one is selected at
//! compile time and re-exported as `NativeSensorSource`:
//!
//! | Module     | OS         | Source                          |
//! |------------|------------|---------------------------------|
//! | `hwmon`    | Linux      | `/sys/class/hwmon/hwmon*/`      |
//! | (none)     | others     | [`NullSensorSource`], no sensors |
//!
//! Probing never fails the startup: an error is logged at debug level and
//! only the built-in `Auto` sensor is offered.

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use crate::domain::schema::{HostCapabilities, AUTO_SENSOR};

pub mod cpu_fields;
pub mod hwmon;

#[cfg(target_os = "linux")]
pub use hwmon::HwmonSensorSource as NativeSensorSource;

#[cfg(not(target_os = "linux"))]
pub use self::NullSensorSource as NativeSensorSource;

/// Error type for sensor probing.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("I/O error probing sensors at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One temperature input reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorReading {
    /// Chip or driver name, e.g. `coretemp` or `k10temp`.
    pub chip: String,
    /// Human label, empty when the driver provides none.
    pub label: String,
    /// Whether a current temperature could be read.
    pub has_current: bool,
}

/// A source of temperature sensor readings.
#[cfg_attr(test, mockall::automock)]
pub trait SensorSource {
    /// Lists every temperature input, grouped by chip in a stable order.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] if the host cannot be queried at all.
    fn readings(&self) -> Result<Vec<SensorReading>, ProbeError>;
}

/// A sensor source for platforms without a supported sensor interface.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSensorSource;

impl SensorSource for NullSensorSource {
    fn readings(&self) -> Result<Vec<SensorReading>, ProbeError> {
        Ok(Vec::new())
    }
}

/// Builds the accepted `cpu_sensor` values: `Auto` followed by one
/// `chip:label` entry per sensor with a current reading.
///
/// Sensors without a label are named by their 1-based position within the
/// chip, e.g. `acpitz:1`.
pub fn probe_cpu_sensors(source: &dyn SensorSource) -> Vec<String> {
    let mut sensors = vec![AUTO_SENSOR.to_string()];

    let readings = match source.readings() {
        Ok(readings) => readings,
        Err(e) => {
            debug!("sensor probe failed: {e}");
            return sensors;
        }
    };

    let mut positions: HashMap<&str, usize> = HashMap::new();
    for reading in &readings {
        let position = positions.entry(reading.chip.as_str()).or_insert(0);
        *position += 1;

        if !reading.has_current {
            continue;
        }
        let name = if reading.label.is_empty() {
            format!("{}:{}", reading.chip, position)
        } else {
            format!("{}:{}", reading.chip, reading.label)
        };
        sensors.push(name);
    }

    debug!(count = sensors.len() - 1, "cpu sensors discovered");
    sensors
}

/// Probes everything the schema needs from the host.
pub fn host_capabilities(source: &dyn SensorSource) -> HostCapabilities {
    HostCapabilities {
        cpu_sensors: probe_cpu_sensors(source),
        cpu_stat_fields: cpu_fields::cpu_stat_fields(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
