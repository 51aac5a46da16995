//! Category repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{Category, CategoryDetail, Highlight, HighlightedCategory};
use crate::domain::DomainResult;

/// Read access to categories and the highlighted set.
///
/// Lookups report absence as `Ok(None)` or an empty vector; only storage
/// failures are returned as errors.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories ordered by name, products loaded.
    async fn find(&self) -> DomainResult<Vec<Category>>;
    /// All categories ordered by name with `product_count` only.
    async fn find_summaries(&self) -> DomainResult<Vec<Category>>;
    async fn find_by_uuid(&self, uuid: Uuid) -> DomainResult<Option<Category>>;
    async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<Category>>;
    /// Categories matching any of `uuids`, in no particular order.
    async fn find_by_ids(&self, uuids: &[Uuid]) -> DomainResult<Vec<Category>>;
    /// Categories ordered by name that have at least `min_products` products.
    async fn find_with_min_products(
        &self,
        min_products: u64,
        detail: CategoryDetail,
    ) -> DomainResult<Vec<Category>>;
    /// Highlighted categories ordered by ascending position.
    async fn find_highlighted(&self) -> DomainResult<Vec<HighlightedCategory>>;
    async fn find_highlight_at(&self, position: i32) -> DomainResult<Option<Uuid>>;
    /// Mark (or re-rank) a category as highlighted.
    ///
    /// A position already held by another category is a `Conflict`.
    async fn highlight(
        &self,
        uuid: Uuid,
        highlight: Highlight,
    ) -> DomainResult<HighlightedCategory>;
    /// Returns `false` when the category carried no highlight.
    async fn remove_highlight(&self, uuid: Uuid) -> DomainResult<bool>;
}
