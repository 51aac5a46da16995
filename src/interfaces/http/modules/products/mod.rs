//! Product module: read-only listing and lookup

pub mod handlers;

pub use handlers::*;
