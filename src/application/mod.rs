pub mod dto;
pub mod services;
pub mod usecases;

// Re-export key types for convenience
pub use services::{CategoryService, ProductService, SeedData, SeedService};
pub use usecases::{CategoryUseCase, ProductUseCase, ResourceId};
