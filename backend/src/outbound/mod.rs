//! Outbound adapters implementing domain ports.
//!
//! - **memory**: an in-process review store implementing every store port,
//!   loadable from and savable to a JSON snapshot file.
//! - **theme_file**: a one-value file holding the display theme.
//!
//! Adapters translate between domain types and their storage shape. They
//! contain no business logic. Filesystem access goes through `cap-std`.

mod cap_io;
pub mod memory;
pub mod theme_file;
