//! Infrastructure layer: everything that touches the host.
//!
//! - **`paths`** – resolves the config directory, config file, themes
//!   directory and error log, and creates the directories.
//! - **`probe`** – discovers the temperature sensors and CPU time fields the
//!   schema offers as choices.
//! - **`storage`** – reads the config file into a `ConfigService` and writes
//!   it back.
//!
//! **Dependency rule**: this layer may depend on `application` and `domain`,
//! but MUST NOT be imported by either of them.

pub mod paths;
pub mod probe;
pub mod storage;
