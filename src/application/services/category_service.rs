//! Category business logic service

use std::sync::Arc;

use log::info;
use uuid::Uuid;

use crate::domain::{
    Category, CategoryDetail, DomainError, DomainResult, Highlight, HighlightedCategory,
    RepositoryProvider,
};

/// Service for category reads and the highlighted set
pub struct CategoryService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CategoryService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Every category, ordered by name.
    ///
    /// `Summary` leaves `products` empty and fills `product_count`; `Full`
    /// loads the product references as well.
    pub async fn find_all_categories(&self, detail: CategoryDetail) -> DomainResult<Vec<Category>> {
        match detail {
            CategoryDetail::Full => self.repos.categories().find().await,
            CategoryDetail::Summary => self.repos.categories().find_summaries().await,
        }
    }

    /// Categories, ordered by name, with at least `min_products` products.
    pub async fn find_categories_with_min_products(
        &self,
        min_products: u64,
        detail: CategoryDetail,
    ) -> DomainResult<Vec<Category>> {
        self.repos
            .categories()
            .find_with_min_products(min_products, detail)
            .await
    }

    /// Highlighted categories by ascending position, products embedded.
    pub async fn find_highlighted_categories(&self) -> DomainResult<Vec<HighlightedCategory>> {
        self.repos.categories().find_highlighted().await
    }

    pub async fn find_category(&self, uuid: Uuid) -> DomainResult<Option<Category>> {
        self.repos.categories().find_by_uuid(uuid).await
    }

    pub async fn find_category_by_slug(&self, slug: &str) -> DomainResult<Option<Category>> {
        self.repos.categories().find_by_slug(slug).await
    }

    pub async fn find_categories_by_ids(&self, uuids: &[Uuid]) -> DomainResult<Vec<Category>> {
        self.repos.categories().find_by_ids(uuids).await
    }

    /// Place a category in the highlighted set at `position`.
    ///
    /// Positions are unique: taking one held by another category is a
    /// conflict. Re-highlighting the same category moves it.
    pub async fn highlight_category(
        &self,
        uuid: Uuid,
        position: i32,
    ) -> DomainResult<HighlightedCategory> {
        if position < 0 {
            return Err(DomainError::Validation(format!(
                "Position must be zero or greater, got {}",
                position
            )));
        }

        let categories = self.repos.categories();
        if let Some(holder) = categories.find_highlight_at(position).await? {
            if holder != uuid {
                return Err(DomainError::Conflict(format!(
                    "Position {} is already held by category {}",
                    position, holder
                )));
            }
        }

        let highlighted = categories.highlight(uuid, Highlight::new(position)).await?;
        info!(
            "Category highlighted: {} at position {}",
            highlighted.category.slug, position
        );
        Ok(highlighted)
    }

    /// Returns `false` when the category is unknown or was not highlighted.
    pub async fn remove_highlight(&self, uuid: Uuid) -> DomainResult<bool> {
        let removed = self.repos.categories().remove_highlight(uuid).await?;
        if removed {
            info!("Category highlight removed: {}", uuid);
        }
        Ok(removed)
    }
}
