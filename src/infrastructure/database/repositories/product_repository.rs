//! SeaORM implementation of ProductRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::relations::{id_batches, load_category_refs, ID_BATCH};
use super::{db_err, parse_uuid};
use crate::domain::product::{price_from_minor_units, Product, ProductRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::product;

pub struct SeaOrmProductRepository {
    db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn assemble(&self, rows: Vec<product::Model>) -> DomainResult<Vec<Product>> {
        let ids: Vec<i32> = rows.iter().map(|p| p.id).collect();
        let mut categories = load_category_refs(&self.db, &ids).await?;

        rows.into_iter()
            .map(|row| {
                let refs = categories.remove(&row.id).unwrap_or_default();
                model_to_domain(row).map(|mut p| {
                    p.categories = refs;
                    p
                })
            })
            .collect()
    }

    async fn find_one(&self, row: Option<product::Model>) -> DomainResult<Option<Product>> {
        match row {
            Some(row) => Ok(self.assemble(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }
}

fn model_to_domain(p: product::Model) -> DomainResult<Product> {
    Ok(Product {
        uuid: parse_uuid("products", p.id, &p.uuid)?,
        name: p.name,
        slug: p.slug,
        description: p.description,
        price: price_from_minor_units(p.price_cents),
        color: p.color,
        categories: Vec::new(),
    })
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn find(&self) -> DomainResult<Vec<Product>> {
        let rows = product::Entity::find()
            .order_by_asc(product::Column::Name)
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        self.assemble(rows).await
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> DomainResult<Option<Product>> {
        let row = product::Entity::find()
            .filter(product::Column::Uuid.eq(uuid.to_string()))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if row.is_none() {
            debug!("Product '{}' not found in database", uuid);
        }
        self.find_one(row).await
    }

    async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<Product>> {
        // Product slugs are not unique; the oldest row wins.
        let row = product::Entity::find()
            .filter(product::Column::Slug.eq(slug))
            .order_by_asc(product::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        self.find_one(row).await
    }

    async fn find_by_ids(&self, uuids: &[Uuid]) -> DomainResult<Vec<Product>> {
        if uuids.is_empty() {
            return Ok(Vec::new());
        }

        let mut rows = Vec::new();
        for batch in id_batches(uuids, ID_BATCH) {
            let found = product::Entity::find()
                .filter(product::Column::Uuid.is_in(batch.iter().map(Uuid::to_string)))
                .all(&self.db)
                .await
                .map_err(db_err)?;
            rows.extend(found);
        }
        self.assemble(rows).await
    }
}
