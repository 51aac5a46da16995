//! Category use cases

use std::sync::Arc;

use crate::application::dto::{CategoryDto, HighlightedCategoryDto};
use crate::application::services::CategoryService;
use crate::domain::{Category, CategoryDetail, DomainResult};

use super::ResourceId;

pub struct CategoryUseCase {
    service: Arc<CategoryService>,
}

impl CategoryUseCase {
    pub fn new(service: Arc<CategoryService>) -> Self {
        Self { service }
    }

    /// All categories. `is_detailed` adds each category's product list.
    pub async fn find(&self, is_detailed: bool) -> DomainResult<Vec<CategoryDto>> {
        let detail = CategoryDetail::from(is_detailed);
        let categories = self.service.find_all_categories(detail).await?;
        Ok(to_dtos(categories, detail))
    }

    /// Like [`find`](Self::find), keeping only categories with at least
    /// `min_products` products.
    pub async fn find_with_min_products(
        &self,
        is_detailed: bool,
        min_products: u64,
    ) -> DomainResult<Vec<CategoryDto>> {
        let detail = CategoryDetail::from(is_detailed);
        let categories = self
            .service
            .find_categories_with_min_products(min_products, detail)
            .await?;
        Ok(to_dtos(categories, detail))
    }

    pub async fn find_highlighted_categories(&self) -> DomainResult<Vec<HighlightedCategoryDto>> {
        let highlighted = self.service.find_highlighted_categories().await?;
        Ok(highlighted
            .into_iter()
            .map(HighlightedCategoryDto::from_domain)
            .collect())
    }

    /// Look a category up by uuid or slug.
    pub async fn find_category_by_id(&self, id: &str) -> DomainResult<Option<CategoryDto>> {
        Ok(self.resolve(id).await?.map(CategoryDto::from_domain))
    }

    /// `None` when no category matches `id`.
    pub async fn highlight_category(
        &self,
        id: &str,
        position: i32,
    ) -> DomainResult<Option<HighlightedCategoryDto>> {
        let Some(category) = self.resolve(id).await? else {
            return Ok(None);
        };
        let highlighted = self
            .service
            .highlight_category(category.uuid, position)
            .await?;
        Ok(Some(HighlightedCategoryDto::from_domain(highlighted)))
    }

    pub async fn remove_highlight(&self, id: &str) -> DomainResult<bool> {
        match self.resolve(id).await? {
            Some(category) => self.service.remove_highlight(category.uuid).await,
            None => Ok(false),
        }
    }

    async fn resolve(&self, id: &str) -> DomainResult<Option<Category>> {
        match ResourceId::parse(id) {
            ResourceId::Uuid(uuid) => self.service.find_category(uuid).await,
            ResourceId::Slug(slug) => self.service.find_category_by_slug(&slug).await,
        }
    }
}

fn to_dtos(categories: Vec<Category>, detail: CategoryDetail) -> Vec<CategoryDto> {
    let to_dto = match detail {
        CategoryDetail::Full => CategoryDto::from_domain,
        CategoryDetail::Summary => CategoryDto::summary,
    };
    categories.into_iter().map(to_dto).collect()
}
