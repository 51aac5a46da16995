//! # Storefront Catalog
//!
//! Catalog API serving categories, highlighted categories and products as
//! HAL resources.
//!
//! ## Architecture
//!
//! - **domain**: Categories, products, highlights and the repository traits
//! - **application**: Services, use cases and DTO mapping
//! - **infrastructure**: SeaORM entities, migrations and repositories
//! - **interfaces**: REST API (axum) with HAL transformers and Swagger docs
//! - **server**: Runtime bootstrap shared by the CLI

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::create_api_router;
