//! Command-line interface.
//!
//! ```text
//! bxtop [OPTIONS]
//!
//! Options:
//!   -b, --boxes <BOXES>   Which boxes to show at start, e.g. "cpu mem net proc"
//!   -lc, --low-color      Disable truecolor, use the 256-color palette
//!   -v, --version         Show version info and exit
//!       --debug           Start with log level DEBUG
//! ```
//!
//! Every flag applies to the current run only.  The flags are turned into a
//! [`CliOverrides`] value which the config service layers on top of the
//! loaded file; nothing given here is ever written back to `bxtop.conf`.
//!
//! `-lc` is a two-letter short flag, which `clap` does not support, so the
//! raw argument list is rewritten by [`normalize_args`] before parsing.

use std::ffi::OsString;

use bxtop_config::{CliOverrides, LogLevel};
use clap::Parser;

/// The legacy spelling of `--low-color`.
const LOW_COLOR_SHORT: &str = "-lc";

/// bxtop: a terminal resource monitor.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "bxtop",
    about = "Resource monitor that shows usage and stats for processor, memory, disks, network and processes",
    disable_version_flag = true
)]
pub struct Cli {
    /// Which boxes to show at start, example: -b "cpu mem net proc".
    ///
    /// Valid names are `cpu`, `mem`, `net` and `proc`, separated by
    /// whitespace.
    #[arg(short = 'b', long = "boxes", value_name = "BOXES")]
    pub boxes: Option<String>,

    /// Disable truecolor, converts 24-bit colors to the 256-color palette.
    #[arg(long = "low-color")]
    pub low_color: bool,

    /// Show version info and exit.
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Start with log level DEBUG regardless of the config file.
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parses `std::env::args()` after [`normalize_args`].
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// The session overrides these flags request.
    pub fn to_overrides(&self) -> CliOverrides {
        CliOverrides {
            log_level: self.debug.then_some(LogLevel::Debug),
            shown_boxes: self.boxes.clone(),
            truecolor: self.low_color.then_some(false),
        }
    }
}

/// Replaces every `-lc` argument with `--low-color`.
///
/// Arguments after a `--` separator are left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut after_separator = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if after_separator {
                return arg;
            }
            if arg == "--" {
                after_separator = true;
                arg
            } else if arg == LOW_COLOR_SHORT {
                OsString::from("--low-color")
            } else {
                arg
            }
        })
        .collect()
}

/// The line printed by `--version`.
pub fn version_line(version: &str) -> String {
    format!("{} version: {version}", bxtop_config::APP_NAME)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
