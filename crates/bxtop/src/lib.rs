//! bxtop front-end library crate.
//!
//! Holds the pieces of the `bxtop` binary that are worth testing on their
//! own: the command-line parser and the error log setup.  The binary in
//! `main.rs` wires them to `bxtop-config`.
//!
//! ```text
//! argv ──► cli::Cli ──► CliOverrides ─┐
//!                                      ▼
//! ConfigPaths ──► ConfigStore::load ──► ConfigService ──► logging::init
//!                                      │
//!                     exit ──► ConfigStore::save
//! ```

/// Command-line flags and their translation into config overrides.
pub mod cli;

/// Error log sink.
pub mod logging;
