//! Closed option sets.
//!
//! Several string-typed keys only accept a value from a fixed list: the
//! process sorting mode, the log level, the temperature scale and the names
//! of the boxes that can be shown.  Each list is a plain Rust enum that
//! implements [`OptionSet`], which supplies the membership test used by the
//! validation chain and by [`crate::ConfigService::set`].
//!
//! The values stored in the config snapshot stay strings (that is what the
//! file holds); the enums are how the rest of the application reads them
//! back in typed form, e.g. `SortingMode::from_name(service.get_str("proc_sorting")?)`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::level_filters::LevelFilter;

/// Returned by `FromStr` when a name is not a member of the set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown option {0:?}")]
pub struct UnknownOption(pub String);

/// A closed set of named options.
pub trait OptionSet: Sized + Copy + 'static {
    /// Every member of the set, in display order.
    const ALL: &'static [Self];

    /// The canonical spelling written to the config file.
    fn as_str(&self) -> &'static str;

    /// Extra spellings accepted on input.  Never written back.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Looks up a member by its canonical name or one of its aliases.
    ///
    /// Matching is exact (case-sensitive); the file format has always been
    /// case-sensitive for these keys.
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == name || m.aliases().contains(&name))
    }

    /// Returns `true` if `name` names a member of this set.
    fn is_member(name: &str) -> bool {
        Self::from_name(name).is_some()
    }

    /// Canonical names of every member, in display order.
    fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|m| m.as_str()).collect()
    }
}

// ── Sorting mode ──────────────────────────────────────────────────────────────

/// How the process list is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortingMode {
    Pid,
    Program,
    Arguments,
    Threads,
    User,
    Memory,
    /// Top process is updated over time.
    #[serde(rename = "cpu lazy", alias = "cpu-lazy")]
    CpuLazy,
    /// Top process is updated on every refresh.
    #[serde(rename = "cpu responsive", alias = "cpu-responsive")]
    CpuResponsive,
}

impl OptionSet for SortingMode {
    const ALL: &'static [Self] = &[
        SortingMode::Pid,
        SortingMode::Program,
        SortingMode::Arguments,
        SortingMode::Threads,
        SortingMode::User,
        SortingMode::Memory,
        SortingMode::CpuLazy,
        SortingMode::CpuResponsive,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            SortingMode::Pid => "pid",
            SortingMode::Program => "program",
            SortingMode::Arguments => "arguments",
            SortingMode::Threads => "threads",
            SortingMode::User => "user",
            SortingMode::Memory => "memory",
            SortingMode::CpuLazy => "cpu lazy",
            SortingMode::CpuResponsive => "cpu responsive",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            SortingMode::CpuLazy => &["cpu-lazy"],
            SortingMode::CpuResponsive => &["cpu-responsive"],
            _ => &[],
        }
    }
}

// ── Box names ─────────────────────────────────────────────────────────────────

/// One of the top-level boxes the UI can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxName {
    Cpu,
    Mem,
    Net,
    Proc,
}

impl OptionSet for BoxName {
    const ALL: &'static [Self] = &[BoxName::Cpu, BoxName::Mem, BoxName::Net, BoxName::Proc];

    fn as_str(&self) -> &'static str {
        match self {
            BoxName::Cpu => "cpu",
            BoxName::Mem => "mem",
            BoxName::Net => "net",
            BoxName::Proc => "proc",
        }
    }
}

/// Parses a whitespace-separated list of box names such as `"cpu mem net"`.
///
/// An empty or all-whitespace string is a valid, empty list.
///
/// # Errors
///
/// Returns the first token that is not a box name.
pub fn parse_box_list(value: &str) -> Result<Vec<BoxName>, String> {
    value
        .split_whitespace()
        .map(|token| BoxName::from_name(token).ok_or_else(|| token.to_string()))
        .collect()
}

// ── Log level ─────────────────────────────────────────────────────────────────

/// Severity threshold for the error log.
///
/// Ordered from least to most verbose, so `level >= LogLevel::Info` means
/// "INFO messages are written".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    /// Returns `true` if a message of severity `message` passes this threshold.
    pub fn includes(&self, message: LogLevel) -> bool {
        message <= *self
    }

    /// The equivalent `tracing` filter.
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warning => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
        }
    }
}

impl OptionSet for LogLevel {
    const ALL: &'static [Self] = &[
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Debug,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

// ── Temperature scale ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TempScale {
    Celsius,
    Fahrenheit,
    Kelvin,
    Rankine,
}

impl OptionSet for TempScale {
    const ALL: &'static [Self] = &[
        TempScale::Celsius,
        TempScale::Fahrenheit,
        TempScale::Kelvin,
        TempScale::Rankine,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            TempScale::Celsius => "celsius",
            TempScale::Fahrenheit => "fahrenheit",
            TempScale::Kelvin => "kelvin",
            TempScale::Rankine => "rankine",
        }
    }
}

macro_rules! string_conversions {
    ($($ty:ty),+) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::from_name(s).ok_or_else(|| UnknownOption(s.to_string()))
            }
        })+
    };
}

string_conversions!(SortingMode, BoxName, LogLevel, TempScale);

// ── Tests ─────────────────────────────────────────────────────────────────────
