//! SeaORM implementation of CategoryRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, SqlErr,
};
use uuid::Uuid;

use super::relations::{count_products, id_batches, load_product_refs, ID_BATCH};
use super::{db_err, parse_uuid};
use crate::domain::category::{
    Category, CategoryDetail, CategoryRepository, Highlight, HighlightedCategory,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{category, highlighted_category};

pub struct SeaOrmCategoryRepository {
    db: DatabaseConnection,
}

impl SeaOrmCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Turn category rows into domain values, loading the product side as
    /// requested. Row order is preserved.
    async fn assemble(
        &self,
        rows: Vec<category::Model>,
        detail: CategoryDetail,
    ) -> DomainResult<Vec<Category>> {
        let ids: Vec<i32> = rows.iter().map(|c| c.id).collect();

        match detail {
            CategoryDetail::Full => {
                let mut products = load_product_refs(&self.db, &ids).await?;
                rows.into_iter()
                    .map(|row| {
                        let refs = products.remove(&row.id).unwrap_or_default();
                        model_to_domain(row).map(|c| c.with_products(refs))
                    })
                    .collect()
            }
            CategoryDetail::Summary => {
                let counts = count_products(&self.db, &ids).await?;
                rows.into_iter()
                    .map(|row| {
                        let count = counts.get(&row.id).copied().unwrap_or(0);
                        model_to_domain(row).map(|mut c| {
                            c.product_count = count;
                            c
                        })
                    })
                    .collect()
            }
        }
    }

    async fn find_one(&self, row: Option<category::Model>) -> DomainResult<Option<Category>> {
        match row {
            Some(row) => Ok(self
                .assemble(vec![row], CategoryDetail::Full)
                .await?
                .pop()),
            None => Ok(None),
        }
    }

    async fn find_row_by_uuid(&self, uuid: Uuid) -> DomainResult<Option<category::Model>> {
        category::Entity::find()
            .filter(category::Column::Uuid.eq(uuid.to_string()))
            .one(&self.db)
            .await
            .map_err(db_err)
    }
}

// ── Conversion helpers ──────────────────────────────────────────

/// A write that collides with the unique position index means another
/// category took the position first.
fn highlight_err(e: DbErr, position: i32) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::Conflict(format!(
            "Position {} is already held by another category",
            position
        )),
        _ => db_err(e),
    }
}

fn model_to_domain(c: category::Model) -> DomainResult<Category> {
    Ok(Category {
        uuid: parse_uuid("categories", c.id, &c.uuid)?,
        name: c.name,
        slug: c.slug,
        description: c.description,
        products: Vec::new(),
        product_count: 0,
    })
}

// ── CategoryRepository impl ─────────────────────────────────────

#[async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn find(&self) -> DomainResult<Vec<Category>> {
        let rows = category::Entity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        self.assemble(rows, CategoryDetail::Full).await
    }

    async fn find_summaries(&self) -> DomainResult<Vec<Category>> {
        let rows = category::Entity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        self.assemble(rows, CategoryDetail::Summary).await
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> DomainResult<Option<Category>> {
        let row = self.find_row_by_uuid(uuid).await?;
        if row.is_none() {
            debug!("Category '{}' not found in database", uuid);
        }
        self.find_one(row).await
    }

    async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<Category>> {
        let row = category::Entity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        self.find_one(row).await
    }

    async fn find_by_ids(&self, uuids: &[Uuid]) -> DomainResult<Vec<Category>> {
        if uuids.is_empty() {
            return Ok(Vec::new());
        }

        let mut rows = Vec::new();
        for batch in id_batches(uuids, ID_BATCH) {
            let found = category::Entity::find()
                .filter(category::Column::Uuid.is_in(batch.iter().map(Uuid::to_string)))
                .all(&self.db)
                .await
                .map_err(db_err)?;
            rows.extend(found);
        }
        self.assemble(rows, CategoryDetail::Full).await
    }

    async fn find_with_min_products(
        &self,
        min_products: u64,
        detail: CategoryDetail,
    ) -> DomainResult<Vec<Category>> {
        let rows = category::Entity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        let ids: Vec<i32> = rows.iter().map(|c| c.id).collect();
        let counts = count_products(&self.db, &ids).await?;

        let rows = rows
            .into_iter()
            .filter(|row| counts.get(&row.id).copied().unwrap_or(0) >= min_products)
            .collect();
        self.assemble(rows, detail).await
    }

    async fn find_highlighted(&self) -> DomainResult<Vec<HighlightedCategory>> {
        let marks = highlighted_category::Entity::find()
            .order_by_asc(highlighted_category::Column::Position)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        if marks.is_empty() {
            return Ok(Vec::new());
        }

        let marked: Vec<i32> = marks.iter().map(|m| m.category_id).collect();
        let mut rows = Vec::new();
        for batch in id_batches(&marked, ID_BATCH) {
            let found = category::Entity::find()
                .filter(category::Column::Id.is_in(batch))
                .all(&self.db)
                .await
                .map_err(db_err)?;
            rows.extend(found);
        }
        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let categories = self.assemble(rows, CategoryDetail::Full).await?;
        let mut by_id: std::collections::HashMap<i32, Category> =
            ids.into_iter().zip(categories).collect();

        Ok(marks
            .into_iter()
            .filter_map(|m| {
                by_id
                    .remove(&m.category_id)
                    .map(|c| HighlightedCategory::new(c, Highlight::new(m.position)))
            })
            .collect())
    }

    async fn find_highlight_at(&self, position: i32) -> DomainResult<Option<Uuid>> {
        let mark = highlighted_category::Entity::find()
            .filter(highlighted_category::Column::Position.eq(position))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        let Some(mark) = mark else {
            return Ok(None);
        };

        let row = category::Entity::find_by_id(mark.category_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        row.map(|r| parse_uuid("categories", r.id, &r.uuid))
            .transpose()
    }

    async fn highlight(
        &self,
        uuid: Uuid,
        highlight: Highlight,
    ) -> DomainResult<HighlightedCategory> {
        let row = self
            .find_row_by_uuid(uuid)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", "uuid", uuid))?;
        let category_id = row.id;

        let existing = highlighted_category::Entity::find_by_id(category_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        match existing {
            Some(mark) => {
                debug!(
                    "Moving highlighted category {} from {} to {}",
                    uuid, mark.position, highlight.position
                );
                let mut active: highlighted_category::ActiveModel = mark.into();
                active.position = Set(highlight.position);
                active
                    .update(&self.db)
                    .await
                    .map_err(|e| highlight_err(e, highlight.position))?;
            }
            None => {
                debug!("Highlighting category {} at {}", uuid, highlight.position);
                let mark = highlighted_category::ActiveModel {
                    category_id: Set(category_id),
                    position: Set(highlight.position),
                };
                highlighted_category::Entity::insert(mark)
                    .exec_without_returning(&self.db)
                    .await
                    .map_err(|e| highlight_err(e, highlight.position))?;
            }
        }

        let category = self
            .find_one(Some(row))
            .await?
            .ok_or_else(|| DomainError::not_found("Category", "uuid", uuid))?;
        Ok(HighlightedCategory::new(category, highlight))
    }

    async fn remove_highlight(&self, uuid: Uuid) -> DomainResult<bool> {
        let Some(row) = self.find_row_by_uuid(uuid).await? else {
            return Ok(false);
        };

        let result = highlighted_category::Entity::delete_by_id(row.id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::testing::{sample_import, seed, setup_db};

    async fn repo_with_catalog() -> SeaOrmCategoryRepository {
        let db = setup_db().await;
        seed(&db, sample_import(&["Winter", "Sale"], 10, "Sale")).await;
        SeaOrmCategoryRepository::new(db)
    }

    #[tokio::test]
    async fn find_orders_by_name_and_loads_products() {
        let repo = repo_with_catalog().await;

        let categories = repo.find().await.unwrap();
        let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Sale", "Winter"]);
        assert_eq!(categories[0].products.len(), 10);
        assert_eq!(categories[0].product_count, 10);
        assert_eq!(categories[0].products[0].name, "Product 1");
        assert!(categories[1].products.is_empty());
    }

    #[tokio::test]
    async fn summaries_carry_counts_without_products() {
        let repo = repo_with_catalog().await;

        let categories = repo.find_summaries().await.unwrap();
        assert_eq!(categories[0].product_count, 10);
        assert!(categories[0].products.is_empty());
    }

    #[tokio::test]
    async fn unknown_uuid_is_none() {
        let repo = repo_with_catalog().await;
        assert!(repo.find_by_uuid(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_by_slug_and_uuid_agree() {
        let repo = repo_with_catalog().await;

        let by_slug = repo.find_by_slug("sale").await.unwrap().unwrap();
        let by_uuid = repo.find_by_uuid(by_slug.uuid).await.unwrap().unwrap();
        assert_eq!(by_slug, by_uuid);
    }

    #[tokio::test]
    async fn find_by_ids_with_no_ids_is_empty() {
        let repo = repo_with_catalog().await;

        assert!(repo.find_by_ids(&[]).await.unwrap().is_empty());
        assert!(repo.find_by_ids(&[Uuid::new_v4()]).await.unwrap().is_empty());

        let all = repo.find().await.unwrap();
        let ids: Vec<Uuid> = all.iter().map(|c| c.uuid).collect();
        assert_eq!(repo.find_by_ids(&ids).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn min_products_filters_empty_categories() {
        let repo = repo_with_catalog().await;

        let found = repo
            .find_with_min_products(1, CategoryDetail::Full)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Sale");
        assert_eq!(found[0].products.len(), 10);

        let summaries = repo
            .find_with_min_products(0, CategoryDetail::Summary)
            .await
            .unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].product_count, 10);
        assert!(summaries[0].products.is_empty());

        assert!(repo
            .find_with_min_products(11, CategoryDetail::Summary)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn highlighted_are_ordered_by_position() {
        let repo = repo_with_catalog().await;
        let sale = repo.find_by_slug("sale").await.unwrap().unwrap();
        let winter = repo.find_by_slug("winter").await.unwrap().unwrap();

        repo.highlight(sale.uuid, Highlight::new(2)).await.unwrap();
        repo.highlight(winter.uuid, Highlight::new(1)).await.unwrap();

        let highlighted = repo.find_highlighted().await.unwrap();
        let order: Vec<_> = highlighted
            .iter()
            .map(|h| (h.category.name.as_str(), h.position()))
            .collect();
        assert_eq!(order, [("Winter", 1), ("Sale", 2)]);
        assert_eq!(highlighted[1].category.products.len(), 10);
        assert_eq!(repo.find_highlight_at(1).await.unwrap(), Some(winter.uuid));
    }

    #[tokio::test]
    async fn highlight_again_moves_position() {
        let repo = repo_with_catalog().await;
        let sale = repo.find_by_slug("sale").await.unwrap().unwrap();

        repo.highlight(sale.uuid, Highlight::new(1)).await.unwrap();
        let moved = repo.highlight(sale.uuid, Highlight::new(5)).await.unwrap();

        assert_eq!(moved.position(), 5);
        assert_eq!(repo.find_highlighted().await.unwrap().len(), 1);
        assert_eq!(repo.find_highlight_at(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn remove_highlight_keeps_category() {
        let repo = repo_with_catalog().await;
        let sale = repo.find_by_slug("sale").await.unwrap().unwrap();
        repo.highlight(sale.uuid, Highlight::new(1)).await.unwrap();

        assert!(repo.remove_highlight(sale.uuid).await.unwrap());
        assert!(!repo.remove_highlight(sale.uuid).await.unwrap());

        assert!(repo.find_highlighted().await.unwrap().is_empty());
        assert_eq!(repo.find().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn taken_position_is_a_conflict() {
        let repo = repo_with_catalog().await;
        let sale = repo.find_by_slug("sale").await.unwrap().unwrap();
        let winter = repo.find_by_slug("winter").await.unwrap().unwrap();
        repo.highlight(winter.uuid, Highlight::new(1)).await.unwrap();

        let err = repo
            .highlight(sale.uuid, Highlight::new(1))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        repo.highlight(sale.uuid, Highlight::new(2)).await.unwrap();
        let err = repo
            .highlight(sale.uuid, Highlight::new(1))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let highlighted = repo.find_highlighted().await.unwrap();
        let order: Vec<_> = highlighted
            .iter()
            .map(|h| (h.category.name.as_str(), h.position()))
            .collect();
        assert_eq!(order, [("Winter", 1), ("Sale", 2)]);
    }

    #[tokio::test]
    async fn highlight_unknown_category_is_not_found() {
        let repo = repo_with_catalog().await;

        let err = repo
            .highlight(Uuid::new_v4(), Highlight::new(1))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
