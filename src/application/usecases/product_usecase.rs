//! Product use cases

use std::sync::Arc;

use crate::application::dto::ProductDto;
use crate::application::services::ProductService;
use crate::domain::DomainResult;

use super::ResourceId;

pub struct ProductUseCase {
    service: Arc<ProductService>,
}

impl ProductUseCase {
    pub fn new(service: Arc<ProductService>) -> Self {
        Self { service }
    }

    pub async fn find(&self) -> DomainResult<Vec<ProductDto>> {
        let products = self.service.find_all_products().await?;
        Ok(products.into_iter().map(ProductDto::from_domain).collect())
    }

    /// Look a product up by uuid or slug.
    pub async fn find_by_id(&self, id: &str) -> DomainResult<Option<ProductDto>> {
        let product = match ResourceId::parse(id) {
            ResourceId::Uuid(uuid) => self.service.find_product(uuid).await?,
            ResourceId::Slug(slug) => self.service.find_product_by_slug(&slug).await?,
        };
        Ok(product.map(ProductDto::from_domain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::testing::{sample_import, seed, setup_db};
    use crate::infrastructure::database::SeaOrmRepositoryProvider;

    #[tokio::test]
    async fn maps_products_with_category_summaries() {
        let db = setup_db().await;
        seed(&db, sample_import(&["Sale"], 1, "Sale")).await;
        let repos = Arc::new(SeaOrmRepositoryProvider::new(db));
        let usecase = ProductUseCase::new(Arc::new(ProductService::new(repos)));

        let products = usecase.find().await.unwrap();
        assert_eq!(products[0].categories[0].slug, "sale");

        let by_slug = usecase.find_by_id("product-1").await.unwrap().unwrap();
        assert_eq!(by_slug.uuid, products[0].uuid);
        assert!(usecase.find_by_id("product-9").await.unwrap().is_none());
    }
}
