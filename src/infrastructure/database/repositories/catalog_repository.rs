//! SeaORM implementation of CatalogWriter

use std::collections::HashMap;

use async_trait::async_trait;
use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, DatabaseTransaction, EntityTrait,
    Set, TransactionTrait,
};
use uuid::Uuid;

use super::db_err;
use crate::domain::catalog::{CatalogImport, CatalogWriter, SeedReport};
use crate::domain::product::price_to_minor_units;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{
    category, category_product, highlighted_category, product,
};

pub struct SeaOrmCatalogWriter {
    db: DatabaseConnection,
}

impl SeaOrmCatalogWriter {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Delete every catalog row, children first.
async fn clear(txn: &DatabaseTransaction) -> DomainResult<()> {
    let highlights = highlighted_category::Entity::delete_many()
        .exec(txn)
        .await
        .map_err(db_err)?;
    let links = category_product::Entity::delete_many()
        .exec(txn)
        .await
        .map_err(db_err)?;
    let products = product::Entity::delete_many()
        .exec(txn)
        .await
        .map_err(db_err)?;
    let categories = category::Entity::delete_many()
        .exec(txn)
        .await
        .map_err(db_err)?;
    debug!(
        "Cleared catalog: {} categories, {} products, {} links, {} highlights",
        categories.rows_affected,
        products.rows_affected,
        links.rows_affected,
        highlights.rows_affected
    );
    Ok(())
}

async fn write(txn: &DatabaseTransaction, import: CatalogImport) -> DomainResult<SeedReport> {
    let mut report = SeedReport::default();
    let mut category_ids: HashMap<Uuid, i32> = HashMap::new();

    for c in import.categories {
        let row = category::ActiveModel {
            id: NotSet,
            uuid: Set(c.uuid.to_string()),
            name: Set(c.name),
            slug: Set(c.slug),
            description: Set(c.description),
        }
        .insert(txn)
        .await
        .map_err(db_err)?;
        category_ids.insert(c.uuid, row.id);
        report.categories += 1;
    }

    for p in import.products {
        let price_cents = price_to_minor_units(p.price).ok_or_else(|| {
            DomainError::Validation(format!("Price of '{}' is out of range", p.name))
        })?;
        let row = product::ActiveModel {
            id: NotSet,
            uuid: Set(p.uuid.to_string()),
            name: Set(p.name),
            slug: Set(p.slug),
            description: Set(p.description),
            price_cents: Set(price_cents),
            color: Set(p.color),
        }
        .insert(txn)
        .await
        .map_err(db_err)?;
        report.products += 1;

        let mut links = Vec::with_capacity(p.category_uuids.len());
        for uuid in &p.category_uuids {
            let category_id = category_ids
                .get(uuid)
                .copied()
                .ok_or_else(|| DomainError::not_found("Category", "uuid", uuid))?;
            links.push(category_product::ActiveModel {
                category_id: Set(category_id),
                product_id: Set(row.id),
            });
        }
        if !links.is_empty() {
            report.links += links.len();
            category_product::Entity::insert_many(links)
                .exec_without_returning(txn)
                .await
                .map_err(db_err)?;
        }
    }

    for (uuid, highlight) in import.highlights {
        let category_id = category_ids
            .get(&uuid)
            .copied()
            .ok_or_else(|| DomainError::not_found("Category", "uuid", uuid))?;
        highlighted_category::Entity::insert(highlighted_category::ActiveModel {
            category_id: Set(category_id),
            position: Set(highlight.position),
        })
        .exec_without_returning(txn)
        .await
        .map_err(db_err)?;
        report.highlights += 1;
    }

    Ok(report)
}

#[async_trait]
impl CatalogWriter for SeaOrmCatalogWriter {
    async fn replace_catalog(&self, import: CatalogImport) -> DomainResult<SeedReport> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let written = match clear(&txn).await {
            Ok(()) => write(&txn, import).await,
            Err(e) => Err(e),
        };
        let report = match written {
            Ok(report) => report,
            Err(e) => {
                txn.rollback().await.map_err(db_err)?;
                return Err(e);
            }
        };

        txn.commit().await.map_err(db_err)?;
        info!(
            "Catalog replaced: {} categories, {} products, {} links, {} highlights",
            report.categories, report.products, report.links, report.highlights
        );
        Ok(report)
    }
}
