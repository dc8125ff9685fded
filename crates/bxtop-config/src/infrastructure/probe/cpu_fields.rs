//! Per-CPU time fields the OS reports.
//!
//! The CPU graphs can plot either the total usage or one of the raw time
//! fields.  Which fields exist depends on the platform, and on Linux on the
//! kernel: older kernels report fewer columns on the `cpu` line of
//! `/proc/stat`.

use crate::domain::schema::TOTAL_CPU_FIELD;

/// Column names of the `cpu` line in `/proc/stat`, in kernel order.
pub const LINUX_CPU_FIELDS: [&str; 10] = [
    "user",
    "nice",
    "system",
    "idle",
    "iowait",
    "irq",
    "softirq",
    "steal",
    "guest",
    "guest_nice",
];

/// Field names for the aggregate `cpu ` line of a `/proc/stat` dump.
///
/// Returns only as many names as the line has numeric columns.  No `cpu `
/// line yields an empty list.
pub fn linux_fields_from_proc_stat(text: &str) -> Vec<&'static str> {
    let columns = text
        .lines()
        .find(|l| l.starts_with("cpu "))
        .map(|l| l.split_whitespace().skip(1).count())
        .unwrap_or(0);

    LINUX_CPU_FIELDS[..columns.min(LINUX_CPU_FIELDS.len())].to_vec()
}

/// The accepted `cpu_graph_upper` / `cpu_graph_lower` values on this host:
/// `total` followed by the platform's time fields.
pub fn cpu_stat_fields() -> Vec<String> {
    let mut fields = vec![TOTAL_CPU_FIELD.to_string()];
    fields.extend(platform_fields().into_iter().map(str::to_string));
    fields
}

#[cfg(target_os = "linux")]
fn platform_fields() -> Vec<&'static str> {
    match std::fs::read_to_string("/proc/stat") {
        Ok(text) => linux_fields_from_proc_stat(&text),
        Err(e) => {
            tracing::debug!("could not read /proc/stat: {e}");
            Vec::new()
        }
    }
}

#[cfg(target_os = "macos")]
fn platform_fields() -> Vec<&'static str> {
    vec!["user", "nice", "system", "idle"]
}

#[cfg(any(
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd",
    target_os = "dragonfly"
))]
fn platform_fields() -> Vec<&'static str> {
    vec!["user", "nice", "system", "idle", "irq"]
}

#[cfg(target_os = "windows")]
fn platform_fields() -> Vec<&'static str> {
    vec!["user", "system", "idle", "interrupt", "dpc"]
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "macos",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd",
    target_os = "dragonfly",
    target_os = "windows"
)))]
fn platform_fields() -> Vec<&'static str> {
    Vec::new()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
