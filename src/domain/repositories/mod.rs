//! Repository traits for the domain layer
//!
//! `RepositoryProvider` gives unified access to the per-aggregate
//! repositories. Consumers request only the repository they need:
//!
//! ```ignore
//! async fn handle(repos: &dyn RepositoryProvider) {
//!     let sale = repos.categories().find_by_slug("sale").await?;
//!     let products = repos.products().find().await?;
//! }
//! ```

use super::catalog::CatalogWriter;
use super::category::CategoryRepository;
use super::product::ProductRepository;

pub trait RepositoryProvider: Send + Sync {
    fn categories(&self) -> &dyn CategoryRepository;
    fn products(&self) -> &dyn ProductRepository;
    fn catalog(&self) -> &dyn CatalogWriter;
}
