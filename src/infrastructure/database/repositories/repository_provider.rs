//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::catalog::CatalogWriter;
use crate::domain::category::CategoryRepository;
use crate::domain::product::ProductRepository;
use crate::domain::repositories::RepositoryProvider;

use super::catalog_repository::SeaOrmCatalogWriter;
use super::category_repository::SeaOrmCategoryRepository;
use super::product_repository::SeaOrmProductRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let sale = repos.categories().find_by_slug("sale").await?;
/// let products = repos.products().find().await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    db: DatabaseConnection,
    categories: SeaOrmCategoryRepository,
    products: SeaOrmProductRepository,
    catalog: SeaOrmCatalogWriter,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            categories: SeaOrmCategoryRepository::new(db.clone()),
            products: SeaOrmProductRepository::new(db.clone()),
            catalog: SeaOrmCatalogWriter::new(db.clone()),
            db,
        }
    }

    /// Underlying pool, for health checks.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn categories(&self) -> &dyn CategoryRepository {
        &self.categories
    }

    fn products(&self) -> &dyn ProductRepository {
        &self.products
    }

    fn catalog(&self) -> &dyn CatalogWriter {
        &self.catalog
    }
}
