//! Application services

mod category_service;
mod product_service;
mod seed_service;

pub use category_service::CategoryService;
pub use product_service::ProductService;
pub use seed_service::{SeedCategory, SeedData, SeedHighlight, SeedProduct, SeedService};
