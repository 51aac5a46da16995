//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod catalog_repository;
pub mod category_repository;
pub mod product_repository;
pub mod relations;
pub mod repository_provider;

pub use catalog_repository::SeaOrmCatalogWriter;
pub use category_repository::SeaOrmCategoryRepository;
pub use product_repository::SeaOrmProductRepository;
pub use repository_provider::SeaOrmRepositoryProvider;

use uuid::Uuid;

use crate::domain::{DomainError, InfraError};

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Infrastructure(InfraError::Database(e))
}

/// Uuids are stored as text; a row that does not parse is corrupt.
fn parse_uuid(table: &str, id: i32, raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw).map_err(|e| {
        DomainError::Infrastructure(InfraError::CorruptRow(format!(
            "{}#{} has invalid uuid '{}': {}",
            table, id, raw, e
        )))
    })
}
