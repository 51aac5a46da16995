//! Catalog import (seed) contract

pub mod model;
pub mod repository;

pub use model::{CatalogImport, NewCategory, NewProduct, SeedReport};
pub use repository::CatalogWriter;
