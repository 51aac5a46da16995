//! Catalog writer interface

use async_trait::async_trait;

use super::model::{CatalogImport, SeedReport};
use crate::domain::DomainResult;

#[async_trait]
pub trait CatalogWriter: Send + Sync {
    /// Clear every catalog table and insert `import` in one transaction.
    ///
    /// On error nothing is changed.
    async fn replace_catalog(&self, import: CatalogImport) -> DomainResult<SeedReport>;
}
