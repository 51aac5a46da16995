//! Product repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Product;
use crate::domain::DomainResult;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products ordered by name, categories loaded.
    async fn find(&self) -> DomainResult<Vec<Product>>;
    async fn find_by_uuid(&self, uuid: Uuid) -> DomainResult<Option<Product>>;
    async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<Product>>;
    /// Products matching any of `uuids`, in no particular order.
    async fn find_by_ids(&self, uuids: &[Uuid]) -> DomainResult<Vec<Product>>;
}
