pub mod catalog;
pub mod category;
pub mod product;
pub mod repositories;

// Re-export commonly used types
pub use catalog::{CatalogImport, CatalogWriter, NewCategory, NewProduct, SeedReport};
pub use category::{
    Category, CategoryDetail, CategoryRepository, Highlight, HighlightedCategory, ProductRef,
};
pub use product::{CategoryRef, Product, ProductRepository};
pub use repositories::RepositoryProvider;

pub use crate::shared::errors::{DomainError, DomainResult, InfraError};
