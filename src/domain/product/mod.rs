//! Product aggregate

pub mod model;
pub mod repository;

pub use model::{price_from_minor_units, price_to_minor_units, CategoryRef, Product};
pub use repository::ProductRepository;
