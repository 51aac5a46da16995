//! Data Transfer Objects exposed at the API boundary
//!
//! Mapping from domain values is pure; storage row ids never appear here.

pub mod category;
pub mod product;

pub use category::*;
pub use product::*;
