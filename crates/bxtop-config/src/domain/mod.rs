//! Domain layer: the schema and the value types it is made of.
//!
//! Nothing here touches the file system or the host; the two host-dependent
//! option sets arrive as data through [`schema::HostCapabilities`].

pub mod options;
pub mod schema;
pub mod value;
