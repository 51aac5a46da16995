//! Category module: listing, lookup and the highlighted set

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
