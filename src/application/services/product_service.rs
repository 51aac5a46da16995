//! Product business logic service

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{DomainResult, Product, RepositoryProvider};

pub struct ProductService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ProductService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Every product with its categories, ordered by name.
    pub async fn find_all_products(&self) -> DomainResult<Vec<Product>> {
        self.repos.products().find().await
    }

    pub async fn find_product(&self, uuid: Uuid) -> DomainResult<Option<Product>> {
        self.repos.products().find_by_uuid(uuid).await
    }

    pub async fn find_product_by_slug(&self, slug: &str) -> DomainResult<Option<Product>> {
        self.repos.products().find_by_slug(slug).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::testing::{sample_import, seed, setup_db};
    use crate::infrastructure::database::SeaOrmRepositoryProvider;

    #[tokio::test]
    async fn products_carry_their_categories() {
        let db = setup_db().await;
        seed(&db, sample_import(&["Sale"], 2, "Sale")).await;
        let service = ProductService::new(Arc::new(SeaOrmRepositoryProvider::new(db)));

        let products = service.find_all_products().await.unwrap();
        assert_eq!(products.len(), 2);
        assert!(products.iter().all(|p| p.categories.len() == 1));

        let one = service.find_product(products[0].uuid).await.unwrap();
        assert_eq!(one.as_ref().map(|p| p.uuid), Some(products[0].uuid));
        assert!(service.find_product(Uuid::new_v4()).await.unwrap().is_none());
    }
}
