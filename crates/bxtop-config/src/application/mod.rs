//! Application layer: the load pipeline, the live configuration and the
//! file renderer.
//!
//! # What happens on load
//!
//! - **`parser`** – splits the file text into a declared version and a raw
//!   `key → text` map, dropping comments and unknown keys.
//! - **`coerce`** – turns each raw text into the type of the key's default.
//! - **`validate`** – runs the semantic rule chain; values are kept, clamped
//!   or rejected.
//! - **`service`** – merges the survivors with the schema defaults into a
//!   [`service::ConfigService`] and tracks `changed` / `recreate`.
//! - **`render`** – the inverse of `parser`: produces the documented file.
//!
//! Nothing in this layer performs I/O.  Reading and writing the file lives in
//! `infrastructure::storage`.

pub mod coerce;
pub mod diagnostics;
pub mod parser;
pub mod render;
pub mod service;
pub mod validate;
