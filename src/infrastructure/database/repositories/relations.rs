//! Loading the immediate side of the category/product relation
//!
//! Link rows are read together with the related row, one query per batch of
//! parent ids, and grouped in memory. Both directions are ordered by the row
//! id of the related side, which is the order rows were inserted in.

use std::collections::{BTreeSet, HashMap};

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use super::{db_err, parse_uuid};
use crate::domain::{CategoryRef, DomainResult, ProductRef};
use crate::infrastructure::database::entities::{category, category_product, product};

/// Upper bound of ids bound into a single `IN (...)` list. SQLite refuses
/// statements with more than 32766 variables.
pub const ID_BATCH: usize = 500;

/// Deduplicated ids split into batches of at most `size`.
pub fn id_batches<T: Ord + Clone>(ids: &[T], size: usize) -> Vec<Vec<T>> {
    let unique: Vec<T> = ids
        .iter()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    unique.chunks(size.max(1)).map(<[T]>::to_vec).collect()
}

/// Number of linked products per category id.
pub async fn count_products<C: ConnectionTrait>(
    db: &C,
    category_ids: &[i32],
) -> DomainResult<HashMap<i32, u64>> {
    let mut counts = HashMap::new();

    for batch in id_batches(category_ids, ID_BATCH) {
        let links = category_product::Entity::find()
            .filter(category_product::Column::CategoryId.is_in(batch))
            .all(db)
            .await
            .map_err(db_err)?;

        for link in links {
            *counts.entry(link.category_id).or_insert(0) += 1;
        }
    }
    Ok(counts)
}

/// Product references per category id.
pub async fn load_product_refs<C: ConnectionTrait>(
    db: &C,
    category_ids: &[i32],
) -> DomainResult<HashMap<i32, Vec<ProductRef>>> {
    load_product_refs_batched(db, category_ids, ID_BATCH).await
}

pub(crate) async fn load_product_refs_batched<C: ConnectionTrait>(
    db: &C,
    category_ids: &[i32],
    batch_size: usize,
) -> DomainResult<HashMap<i32, Vec<ProductRef>>> {
    let mut grouped: HashMap<i32, Vec<ProductRef>> = HashMap::new();

    for batch in id_batches(category_ids, batch_size) {
        let rows = category_product::Entity::find()
            .filter(category_product::Column::CategoryId.is_in(batch))
            .order_by_asc(category_product::Column::ProductId)
            .find_also_related(product::Entity)
            .all(db)
            .await
            .map_err(db_err)?;

        for (link, p) in rows {
            let Some(p) = p else {
                continue;
            };
            grouped.entry(link.category_id).or_default().push(ProductRef {
                uuid: parse_uuid("products", p.id, &p.uuid)?,
                name: p.name,
                slug: p.slug,
                description: p.description,
            });
        }
    }
    Ok(grouped)
}

/// Category references per product id.
pub async fn load_category_refs<C: ConnectionTrait>(
    db: &C,
    product_ids: &[i32],
) -> DomainResult<HashMap<i32, Vec<CategoryRef>>> {
    load_category_refs_batched(db, product_ids, ID_BATCH).await
}

pub(crate) async fn load_category_refs_batched<C: ConnectionTrait>(
    db: &C,
    product_ids: &[i32],
    batch_size: usize,
) -> DomainResult<HashMap<i32, Vec<CategoryRef>>> {
    let mut grouped: HashMap<i32, Vec<CategoryRef>> = HashMap::new();

    for batch in id_batches(product_ids, batch_size) {
        let rows = category_product::Entity::find()
            .filter(category_product::Column::ProductId.is_in(batch))
            .order_by_asc(category_product::Column::CategoryId)
            .find_also_related(category::Entity)
            .all(db)
            .await
            .map_err(db_err)?;

        for (link, c) in rows {
            let Some(c) = c else {
                continue;
            };
            grouped.entry(link.product_id).or_default().push(CategoryRef {
                uuid: parse_uuid("categories", c.id, &c.uuid)?,
                name: c.name,
                slug: c.slug,
            });
        }
    }
    Ok(grouped)
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::domain::{CategoryRepository, ProductRepository};
    use crate::infrastructure::database::repositories::{
        SeaOrmCategoryRepository, SeaOrmProductRepository,
    };
    use crate::infrastructure::database::testing::{sample_import, seed, setup_db};

    #[test]
    fn batches_are_deduplicated_and_bounded() {
        let batches = id_batches(&[5, 1, 5, 3, 2, 1, 4], 2);
        assert_eq!(batches, vec![vec![1, 2], vec![3, 4], vec![5]]);
        assert!(id_batches::<i32>(&[], 10).is_empty());
        assert_eq!(id_batches(&[7, 7], 0), vec![vec![7]]);
    }

    #[tokio::test]
    async fn small_batches_give_the_same_grouping() {
        let db = setup_db().await;
        seed(&db, sample_import(&["Sale", "Winter", "Summer"], 7, "Winter")).await;

        let category_ids: Vec<i32> = category::Entity::find()
            .all(&db)
            .await
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        let product_ids: Vec<i32> = product::Entity::find()
            .all(&db)
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();

        let whole = load_product_refs(&db, &category_ids).await.unwrap();
        let batched = load_product_refs_batched(&db, &category_ids, 1).await.unwrap();
        assert_eq!(whole, batched);
        assert_eq!(whole.values().map(Vec::len).sum::<usize>(), 7);

        let whole = load_category_refs(&db, &product_ids).await.unwrap();
        let batched = load_category_refs_batched(&db, &product_ids, 3).await.unwrap();
        assert_eq!(whole, batched);
        assert_eq!(batched.len(), 7);
        assert!(batched.values().all(|refs| refs.len() == 1 && refs[0].name == "Winter"));
    }

    #[tokio::test]
    async fn repositories_load_past_sqlite_bind_limit() {
        let db = setup_db().await;
        seed(&db, sample_import(&["Sale", "Winter"], 33_000, "Sale")).await;
        let categories = SeaOrmCategoryRepository::new(db.clone());
        let products = SeaOrmProductRepository::new(db);

        let all = categories.find().await.unwrap();
        assert_eq!(all[0].name, "Sale");
        assert_eq!(all[0].products.len(), 33_000);
        assert_eq!(all[0].products[0].name, "Product 1");
        assert!(all[1].products.is_empty());

        let all = products.find().await.unwrap();
        assert_eq!(all.len(), 33_000);
        assert!(all.iter().all(|p| p.categories.len() == 1));

        let ids: Vec<Uuid> = all.iter().map(|p| p.uuid).collect();
        assert_eq!(products.find_by_ids(&ids).await.unwrap().len(), 33_000);
    }
}
