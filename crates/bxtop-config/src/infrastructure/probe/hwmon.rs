//! Linux temperature sensors via the hwmon sysfs interface.
//!
//! Each `/sys/class/hwmon/hwmonN/` directory is one chip.  Its `name` file
//! holds the driver name and every `tempK_input` file is one temperature
//! input, optionally described by a matching `tempK_label` file.
//!
//! Only `std::fs` is used, so the module builds on every platform and the
//! tests run against a fake tree in a temp directory.

use std::fs;
use std::path::{Path, PathBuf};

use super::{ProbeError, SensorReading, SensorSource};

/// Default sysfs root.
pub const HWMON_ROOT: &str = "/sys/class/hwmon";

/// Reads temperature inputs from a hwmon sysfs tree.
#[derive(Debug, Clone)]
pub struct HwmonSensorSource {
    root: PathBuf,
}

impl HwmonSensorSource {
    pub fn new() -> Self {
        Self::with_root(HWMON_ROOT)
    }

    /// Reads from `root` instead of `/sys/class/hwmon`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for HwmonSensorSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorSource for HwmonSensorSource {
    fn readings(&self) -> Result<Vec<SensorReading>, ProbeError> {
        let mut chips = sorted_entries(&self.root)?;
        chips.retain(|p| p.is_dir());

        let mut readings = Vec::new();
        for chip_dir in chips {
            let chip = read_trimmed(&chip_dir.join("name")).unwrap_or_else(|| {
                chip_dir
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default()
            });

            // An unreadable chip directory is skipped rather than failing the probe.
            let Ok(files) = sorted_entries(&chip_dir) else {
                continue;
            };

            let mut inputs: Vec<u32> = files.iter().filter_map(|p| temp_input_index(p)).collect();
            inputs.sort_unstable();

            for index in inputs {
                let label = read_trimmed(&chip_dir.join(format!("temp{index}_label")))
                    .unwrap_or_default();
                let has_current = read_trimmed(&chip_dir.join(format!("temp{index}_input")))
                    .is_some_and(|v| v.parse::<i64>().is_ok());
                readings.push(SensorReading {
                    chip: chip.clone(),
                    label,
                    has_current,
                });
            }
        }

        Ok(readings)
    }
}

/// Directory entries sorted by name so chip and input order is stable.
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, ProbeError> {
    let entries = fs::read_dir(dir).map_err(|source| ProbeError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut paths: Vec<PathBuf> = entries.filter_map(|e| e.ok().map(|e| e.path())).collect();
    paths.sort();
    Ok(paths)
}

/// `temp3_input` → `Some(3)`.
fn temp_input_index(path: &Path) -> Option<u32> {
    path.file_name()?
        .to_str()?
        .strip_prefix("temp")?
        .strip_suffix("_input")?
        .parse()
        .ok()
}

fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok().map(|s| s.trim().to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    /// Builds a fake hwmon tree: one `coretemp` chip with two labelled inputs
    /// and one `acpitz` chip with an unlabelled input.
    fn fake_tree() -> PathBuf {
        let root = std::env::temp_dir().join(format!("bxtop_hwmon_{}", Uuid::new_v4()));

        let chip0 = root.join("hwmon0");
        fs::create_dir_all(&chip0).unwrap();
        fs::write(chip0.join("name"), "acpitz\n").unwrap();
        fs::write(chip0.join("temp1_input"), "27800\n").unwrap();

        let chip1 = root.join("hwmon1");
        fs::create_dir_all(&chip1).unwrap();
        fs::write(chip1.join("name"), "coretemp\n").unwrap();
        fs::write(chip1.join("temp1_input"), "45000\n").unwrap();
        fs::write(chip1.join("temp1_label"), "Package id 0\n").unwrap();
        fs::write(chip1.join("temp2_input"), "43000\n").unwrap();
        fs::write(chip1.join("temp2_label"), "Core 0\n").unwrap();
        fs::write(chip1.join("temp2_crit"), "100000\n").unwrap();

        root
    }

    #[test]
    fn test_hwmon_reads_chips_and_inputs_in_order() {
        // Arrange
        let root = fake_tree();
        let source = HwmonSensorSource::with_root(&root);

        // Act
        let readings = source.readings().expect("readings");

        // Assert
        let names: Vec<(String, String)> = readings
            .iter()
            .map(|r| (r.chip.clone(), r.label.clone()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("acpitz".to_string(), String::new()),
                ("coretemp".to_string(), "Package id 0".to_string()),
                ("coretemp".to_string(), "Core 0".to_string()),
            ]
        );
        assert!(readings.iter().all(|r| r.has_current));

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_hwmon_marks_unparsable_input_as_no_current() {
        let root = fake_tree();
        fs::write(root.join("hwmon0").join("temp1_input"), "n/a").unwrap();

        let readings = HwmonSensorSource::with_root(&root).readings().expect("readings");

        assert!(!readings[0].has_current);
        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_hwmon_missing_root_is_an_error() {
        let source = HwmonSensorSource::with_root("/nonexistent/hwmon/root");
        assert!(matches!(source.readings(), Err(ProbeError::Io { .. })));
    }

    #[test]
    fn test_temp_input_index_parses_only_input_files() {
        assert_eq!(temp_input_index(Path::new("/x/temp3_input")), Some(3));
        assert_eq!(temp_input_index(Path::new("/x/temp3_label")), None);
        assert_eq!(temp_input_index(Path::new("/x/in0_input")), None);
    }
}
