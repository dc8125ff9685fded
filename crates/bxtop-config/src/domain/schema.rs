//! The schema registry: every recognised config key, its default, its type
//! and the set of values it may take.
//!
//! # Static and dynamic parts
//!
//! Almost everything here is fixed at build time.  Two membership sets are
//! not: the available CPU temperature sensors and the CPU time fields the OS
//! reports.  Those are probed once at startup (see
//! `infrastructure::probe`) and handed to [`Schema::new`] as a
//! [`HostCapabilities`] value, so the schema stays a plain immutable value
//! with no global state.
//!
//! # Order
//!
//! Entries are kept in the order they are written to the config file.  The
//! order carries no meaning for loading; it only makes regeneration
//! deterministic.

use crate::domain::options::{parse_box_list, BoxName, LogLevel, OptionSet, SortingMode, TempScale};
use crate::domain::value::{ConfigValue, ValueKind};

/// Name of the built-in sensor entry that lets the monitor pick a sensor itself.
pub const AUTO_SENSOR: &str = "Auto";

/// CPU stat field that is available on every platform.
pub const TOTAL_CPU_FIELD: &str = "total";

/// Which closed set a string key must belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    SortingMode,
    LogLevel,
    TempScale,
    /// Whitespace-separated list where every token is a [`BoxName`].
    BoxList,
    /// One of the probed [`HostCapabilities::cpu_sensors`].
    CpuSensor,
    /// One of the probed [`HostCapabilities::cpu_stat_fields`].
    CpuStatField,
}

/// One recognised configuration key.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaEntry {
    pub key: &'static str,
    pub default: ConfigValue,
    pub membership: Option<Membership>,
    /// Comment lines written above the assignment, without the `#*` prefix.
    pub doc: &'static [&'static str],
}

impl SchemaEntry {
    pub fn kind(&self) -> ValueKind {
        self.default.kind()
    }
}

/// Host-dependent option sets, probed once before the schema is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCapabilities {
    /// Always starts with [`AUTO_SENSOR`].
    pub cpu_sensors: Vec<String>,
    /// Always starts with [`TOTAL_CPU_FIELD`].
    pub cpu_stat_fields: Vec<String>,
}

impl Default for HostCapabilities {
    /// The minimal sets every host supports.
    fn default() -> Self {
        Self {
            cpu_sensors: vec![AUTO_SENSOR.to_string()],
            cpu_stat_fields: vec![TOTAL_CPU_FIELD.to_string()],
        }
    }
}

/// The immutable schema registry.
#[derive(Debug, Clone)]
pub struct Schema {
    entries: Vec<SchemaEntry>,
    host: HostCapabilities,
}

impl Schema {
    /// Builds the registry from the built-in key table and the probed host sets.
    pub fn new(host: HostCapabilities) -> Self {
        let entries = builtin_entries();
        debug_assert!(
            {
                let mut keys: Vec<_> = entries.iter().map(|e| e.key).collect();
                keys.sort_unstable();
                keys.windows(2).all(|w| w[0] != w[1])
            },
            "schema keys must be unique"
        );
        Self { entries, host }
    }

    /// All entries in file order.
    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }

    /// All key names in file order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.key)
    }

    pub fn entry(&self, key: &str) -> Option<&SchemaEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entry(key).is_some()
    }

    /// Returns the default value and type tag for `key`.
    pub fn default_for(&self, key: &str) -> Option<(&ConfigValue, ValueKind)> {
        self.entry(key).map(|e| (&e.default, e.kind()))
    }

    pub fn kind_of(&self, key: &str) -> Option<ValueKind> {
        self.entry(key).map(SchemaEntry::kind)
    }

    pub fn membership_for(&self, key: &str) -> Option<Membership> {
        self.entry(key).and_then(|e| e.membership)
    }

    /// Returns the closed set of accepted values for `key`, if it has one.
    ///
    /// For `shown_boxes` this is the set of accepted tokens, not of whole values.
    pub fn membership_set_for(&self, key: &str) -> Option<Vec<String>> {
        let set = match self.membership_for(key)? {
            Membership::SortingMode => owned(SortingMode::names()),
            Membership::LogLevel => owned(LogLevel::names()),
            Membership::TempScale => owned(TempScale::names()),
            Membership::BoxList => owned(BoxName::names()),
            Membership::CpuSensor => self.host.cpu_sensors.clone(),
            Membership::CpuStatField => self.host.cpu_stat_fields.clone(),
        };
        Some(set)
    }

    /// Tests `value` against a membership set.
    pub fn accepts(&self, membership: Membership, value: &str) -> bool {
        match membership {
            Membership::SortingMode => SortingMode::is_member(value),
            Membership::LogLevel => LogLevel::is_member(value),
            Membership::TempScale => TempScale::is_member(value),
            Membership::BoxList => parse_box_list(value).is_ok(),
            Membership::CpuSensor => self.host.cpu_sensors.iter().any(|s| s == value),
            Membership::CpuStatField => self.host.cpu_stat_fields.iter().any(|s| s == value),
        }
    }

    pub fn cpu_sensors(&self) -> &[String] {
        &self.host.cpu_sensors
    }

    pub fn cpu_stat_fields(&self) -> &[String] {
        &self.host.cpu_stat_fields
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new(HostCapabilities::default())
    }
}

fn owned(names: Vec<&'static str>) -> Vec<String> {
    names.into_iter().map(str::to_string).collect()
}

// ── Built-in key table ────────────────────────────────────────────────────────

fn string(key: &'static str, default: &str, doc: &'static [&'static str]) -> SchemaEntry {
    SchemaEntry {
        key,
        default: ConfigValue::Str(default.to_string()),
        membership: None,
        doc,
    }
}

fn member(
    key: &'static str,
    default: &str,
    membership: Membership,
    doc: &'static [&'static str],
) -> SchemaEntry {
    SchemaEntry {
        membership: Some(membership),
        ..string(key, default, doc)
    }
}

fn boolean(key: &'static str, default: bool, doc: &'static [&'static str]) -> SchemaEntry {
    SchemaEntry {
        key,
        default: ConfigValue::Bool(default),
        membership: None,
        doc,
    }
}

fn integer(key: &'static str, default: i64, doc: &'static [&'static str]) -> SchemaEntry {
    SchemaEntry {
        key,
        default: ConfigValue::Int(default),
        membership: None,
        doc,
    }
}

fn builtin_entries() -> Vec<SchemaEntry> {
    vec![
        string("color_theme", "Default", &[
            "Color theme, looks for a .theme file in \"/usr/[local/]share/bxtop/themes\" and \"~/.config/bxtop/themes\", \"Default\" for builtin default theme.",
            "Prefix name by a plus sign (+) for a theme located in user themes folder, i.e. color_theme=\"+monokai\"",
        ]),
        boolean("theme_background", true, &[
            "If the theme set background should be shown, set to False if you want terminal background transparency",
        ]),
        boolean("truecolor", true, &[
            "Sets if 24-bit truecolor should be used, will convert 24-bit colors to 256 color (6x6x6 color cube) if false.",
        ]),
        member("shown_boxes", "cpu mem net proc", Membership::BoxList, &[
            "Manually set which boxes to show. Available values are \"cpu mem net proc\", separate values with whitespace.",
        ]),
        integer("update_ms", 2000, &[
            "Update time in milliseconds, increases automatically if set below internal loops processing time, recommended 2000 ms or above for better sample times for graphs.",
        ]),
        integer("proc_update_mult", 2, &[
            "Processes update multiplier, sets how often the process list is updated as a multiplier of \"update_ms\".",
            "Set to 2 or higher to greatly decrease bxtop cpu usage. (Only integers)",
        ]),
        member("proc_sorting", "cpu lazy", Membership::SortingMode, &[
            "Processes sorting, \"pid\" \"program\" \"arguments\" \"threads\" \"user\" \"memory\" \"cpu lazy\" \"cpu responsive\",",
            "\"cpu lazy\" updates top process over time, \"cpu responsive\" updates top process directly.",
        ]),
        boolean("proc_reversed", false, &["Reverse sorting order, True or False."]),
        boolean("proc_tree", false, &["Show processes as a tree"]),
        integer("tree_depth", 3, &["Which depth the tree view should auto collapse processes at"]),
        boolean("proc_colors", true, &["Use the cpu graph colors in the process list."]),
        boolean("proc_gradient", true, &["Use a darkening gradient in the process list."]),
        boolean("proc_per_core", false, &[
            "If process cpu usage should be of the core it's running on or usage of the total available cpu power.",
        ]),
        boolean("proc_mem_bytes", true, &["Show process memory as bytes instead of percent"]),
        member("cpu_graph_upper", TOTAL_CPU_FIELD, Membership::CpuStatField, &[
            "Sets the CPU stat shown in upper half of the CPU graph, \"total\" is always available.",
            "Other values depend on the per-cpu time fields the platform reports, e.g. \"user\", \"system\", \"iowait\".",
            "Select from a list of detected attributes from the options menu",
        ]),
        member("cpu_graph_lower", TOTAL_CPU_FIELD, Membership::CpuStatField, &[
            "Sets the CPU stat shown in lower half of the CPU graph, \"total\" is always available.",
            "Other values depend on the per-cpu time fields the platform reports, e.g. \"user\", \"system\", \"iowait\".",
            "Select from a list of detected attributes from the options menu",
        ]),
        boolean("cpu_invert_lower", true, &["Toggles if the lower CPU graph should be inverted."]),
        boolean("cpu_single_graph", false, &["Set to True to completely disable the lower CPU graph."]),
        boolean("show_uptime", true, &["Shows the system uptime in the CPU box."]),
        boolean("check_temp", true, &["Check cpu temperature, needs \"osx-cpu-temp\" on MacOS X."]),
        member("cpu_sensor", AUTO_SENSOR, Membership::CpuSensor, &[
            "Which sensor to use for cpu temperature, use options menu to select from list of available sensors.",
        ]),
        boolean("show_coretemp", true, &[
            "Show temperatures for cpu cores also if check_temp is True and sensors has been found",
        ]),
        member("temp_scale", "celsius", Membership::TempScale, &[
            "Which temperature scale to use, available values: \"celsius\", \"fahrenheit\", \"kelvin\" and \"rankine\"",
        ]),
        boolean("show_cpu_freq", true, &[
            "Show CPU frequency, can cause slowdowns on certain systems with some versions of the sensor backend",
        ]),
        string("draw_clock", "%X", &[
            "Draw a clock at top of screen, formatting according to strftime, empty string to disable.",
        ]),
        boolean("background_update", true, &[
            "Update main ui in background when menus are showing, set this to false if the menus is flickering too much for comfort.",
        ]),
        string("custom_cpu_name", "", &["Custom cpu model name, empty string to disable."]),
        string("disks_filter", "", &[
            "Optional filter for shown disks, should be full path of a mountpoint, separate multiple values with a comma \",\".",
            "Begin line with \"exclude=\" to change to exclude filter, otherwise defaults to \"most include\" filter. Example: disks_filter=\"exclude=/boot, /home/user\"",
        ]),
        boolean("mem_graphs", true, &["Show graphs instead of meters for memory values."]),
        boolean("show_swap", true, &["If swap memory should be shown in memory box."]),
        boolean("swap_disk", true, &[
            "Show swap as a disk, ignores show_swap value above, inserts itself after first disk.",
        ]),
        boolean("show_disks", true, &["If mem box should be split to also show disks info."]),
        boolean("only_physical", true, &[
            "Filter out non physical disks. Set this to False to include network disks, RAM disks and similar.",
        ]),
        boolean("use_fstab", false, &["Read disks list from /etc/fstab. This also disables only_physical."]),
        boolean("show_io_stat", true, &["Toggles if io stats should be shown in regular disk usage view"]),
        boolean("io_mode", false, &[
            "Toggles io mode for disks, showing only big graphs for disk read/write speeds.",
        ]),
        boolean("io_graph_combined", false, &["Set to True to show combined read/write io graphs in io mode."]),
        string("io_graph_speeds", "", &[
            "Set the top speed for the io graphs in MiB/s (10 by default), use format \"device:speed\" separate disks with a comma \",\".",
            "Example: \"/dev/sda:100, /dev/sdb:20\"",
        ]),
        string("net_download", "10M", &[
            "Set fixed values for network graphs, default \"10M\" = 10 Mebibytes, possible units \"K\", \"M\", \"G\", append with \"bit\" for bits instead of bytes, i.e \"100mbit\"",
        ]),
        string("net_upload", "10M", &[]),
        boolean("net_auto", true, &[
            "Start in network graphs auto rescaling mode, ignores any values set above and rescales down to 10 Kibibytes at the lowest.",
        ]),
        boolean("net_sync", false, &[
            "Sync the scaling for download and upload to whichever currently has the highest scale",
        ]),
        boolean("net_color_fixed", false, &[
            "If the network graphs color gradient should scale to bandwidth usage or auto scale, bandwidth usage is based on \"net_download\" and \"net_upload\" values",
        ]),
        string("net_iface", "", &["Starts with the Network Interface specified here."]),
        boolean("show_battery", true, &["Show battery stats in top right if battery is present"]),
        boolean("show_init", false, &["Show init screen at startup, the init screen is purely cosmetical"]),
        boolean("update_check", true, &["Enable check for new version at start."]),
        member("log_level", "WARNING", Membership::LogLevel, &[
            "Set loglevel for \"~/.config/bxtop/error.log\" levels are: \"ERROR\" \"WARNING\" \"INFO\" \"DEBUG\".",
            "The level set includes all lower levels, i.e. \"DEBUG\" will show all logging info.",
        ]),
    ]
}

// ── Tests ─────────────────────────────────────────────────────────────────────
