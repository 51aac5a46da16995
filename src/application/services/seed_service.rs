//! Catalog seeding
//!
//! Reads a JSON catalog description, resolves product categories by name
//! and replaces the stored catalog in a single write.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use log::info;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{
    CatalogImport, DomainError, DomainResult, Highlight, InfraError, NewCategory, NewProduct,
    RepositoryProvider, SeedReport,
};
use crate::shared::slugify;

/// Seed file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SeedData {
    #[validate(nested)]
    pub categories: Vec<SeedCategory>,
    #[serde(default)]
    #[validate(nested)]
    pub products: Vec<SeedProduct>,
    #[serde(default)]
    #[validate(nested)]
    pub highlighted: Vec<SeedHighlight>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SeedCategory {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SeedProduct {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    #[validate(length(max = 64))]
    pub color: Option<String>,
    /// Category names, each matching an entry of `SeedData::categories`
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SeedHighlight {
    /// Category name
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(range(min = 0))]
    pub position: i32,
}

pub struct SeedService {
    repos: Arc<dyn RepositoryProvider>,
}

impl SeedService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Read and parse a JSON seed file.
    pub async fn load_seed_file(path: impl AsRef<Path>) -> DomainResult<SeedData> {
        let raw = tokio::fs::read_to_string(path.as_ref())
            .await
            .map_err(InfraError::from)?;
        let data = serde_json::from_str(&raw).map_err(InfraError::from)?;
        Ok(data)
    }

    /// Replace the stored catalog with `data`.
    ///
    /// Nothing is written unless the whole file validates.
    pub async fn seed(&self, data: SeedData) -> DomainResult<SeedReport> {
        let import = build_import(data)?;
        info!(
            "Seeding catalog: {} categories, {} products",
            import.categories.len(),
            import.products.len()
        );
        self.repos.catalog().replace_catalog(import).await
    }
}

/// Validate `data` and resolve every name reference to a fresh uuid.
fn build_import(data: SeedData) -> DomainResult<CatalogImport> {
    data.validate()
        .map_err(|e| DomainError::Validation(e.to_string()))?;

    let mut by_name: HashMap<String, Uuid> = HashMap::new();
    let mut slugs: HashSet<String> = HashSet::new();
    let mut categories = Vec::with_capacity(data.categories.len());

    for c in data.categories {
        let slug = slugify(&c.name);
        if slug.is_empty() {
            return Err(DomainError::Validation(format!(
                "Category name '{}' has no usable characters",
                c.name
            )));
        }
        if by_name.contains_key(&c.name) {
            return Err(DomainError::Validation(format!(
                "Duplicate category name '{}'",
                c.name
            )));
        }
        if !slugs.insert(slug.clone()) {
            return Err(DomainError::Validation(format!(
                "Category '{}' collides with another category on slug '{}'",
                c.name, slug
            )));
        }

        let uuid = Uuid::new_v4();
        by_name.insert(c.name.clone(), uuid);
        categories.push(NewCategory {
            uuid,
            name: c.name,
            slug,
            description: c.description,
        });
    }

    let resolve = |name: &str, owner: &str| {
        by_name.get(name).copied().ok_or_else(|| {
            DomainError::Validation(format!("{} references unknown category '{}'", owner, name))
        })
    };

    let mut products = Vec::with_capacity(data.products.len());
    for p in data.products {
        if p.price.is_sign_negative() {
            return Err(DomainError::Validation(format!(
                "Product '{}' has a negative price",
                p.name
            )));
        }

        let mut category_uuids = Vec::with_capacity(p.categories.len());
        for name in &p.categories {
            let uuid = resolve(name, &format!("Product '{}'", p.name))?;
            if !category_uuids.contains(&uuid) {
                category_uuids.push(uuid);
            }
        }

        products.push(NewProduct {
            uuid: Uuid::new_v4(),
            slug: slugify(&p.name),
            name: p.name,
            description: p.description,
            price: p.price,
            color: p.color,
            category_uuids,
        });
    }

    let mut positions = HashSet::new();
    let mut highlighted = HashSet::new();
    let mut highlights = Vec::with_capacity(data.highlighted.len());
    for h in data.highlighted {
        if !positions.insert(h.position) {
            return Err(DomainError::Validation(format!(
                "Duplicate highlight position {}",
                h.position
            )));
        }
        let uuid = resolve(&h.category, "Highlight")?;
        if !highlighted.insert(uuid) {
            return Err(DomainError::Validation(format!(
                "Category '{}' is highlighted twice",
                h.category
            )));
        }
        highlights.push((uuid, Highlight::new(h.position)));
    }

    Ok(CatalogImport {
        categories,
        products,
        highlights,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::application::services::CategoryService;
    use crate::domain::CategoryDetail;
    use crate::infrastructure::database::testing::setup_db;
    use crate::infrastructure::database::SeaOrmRepositoryProvider;

    fn sale_and_winter() -> SeedData {
        let category = |name: &str| SeedCategory {
            name: name.to_string(),
            description: None,
        };
        SeedData {
            categories: vec![category("Sale"), category("Winter")],
            products: (1..=10)
                .map(|n| SeedProduct {
                    name: format!("Product {}", n),
                    description: None,
                    price: Decimal::new(1999, 2),
                    color: None,
                    categories: vec!["Sale".to_string()],
                })
                .collect(),
            highlighted: Vec::new(),
        }
    }

    async fn services() -> (SeedService, CategoryService, Arc<SeaOrmRepositoryProvider>) {
        let repos = Arc::new(SeaOrmRepositoryProvider::new(setup_db().await));
        (
            SeedService::new(repos.clone()),
            CategoryService::new(repos.clone()),
            repos,
        )
    }

    #[tokio::test]
    async fn seeds_sale_and_winter_catalog() {
        let (seeder, categories, repos) = services().await;

        let report = seeder.seed(sale_and_winter()).await.unwrap();
        assert_eq!(report.categories, 2);
        assert_eq!(report.products, 10);

        let all = categories
            .find_all_categories(CategoryDetail::Full)
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
        let sale = all.iter().find(|c| c.name == "Sale").unwrap();
        assert_eq!(sale.products.len(), 10);

        let products = repos.products().find().await.unwrap();
        assert_eq!(products.len(), 10);
        for p in products {
            assert_eq!(p.categories.len(), 1);
            assert_eq!(p.categories[0].name, "Sale");
        }
    }

    #[tokio::test]
    async fn seeding_twice_replaces_catalog() {
        let (seeder, categories, _) = services().await;

        seeder.seed(sale_and_winter()).await.unwrap();
        seeder.seed(sale_and_winter()).await.unwrap();

        let all = categories
            .find_all_categories(CategoryDetail::Summary)
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].product_count, 10);
    }

    #[tokio::test]
    async fn highlights_are_seeded() {
        let (seeder, categories, _) = services().await;
        let mut data = sale_and_winter();
        data.highlighted = vec![
            SeedHighlight {
                category: "Winter".into(),
                position: 2,
            },
            SeedHighlight {
                category: "Sale".into(),
                position: 1,
            },
        ];

        seeder.seed(data).await.unwrap();

        let names: Vec<_> = categories
            .find_highlighted_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|h| h.category.name)
            .collect();
        assert_eq!(names, ["Sale", "Winter"]);
    }

    #[test]
    fn unknown_category_reference_is_rejected() {
        let mut data = sale_and_winter();
        data.products[3].categories.push("Summer".into());

        let err = build_import(data).unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref m) if m.contains("Summer")));
    }

    #[test]
    fn duplicate_names_and_positions_are_rejected() {
        let mut data = sale_and_winter();
        data.categories.push(SeedCategory {
            name: "Sale".into(),
            description: None,
        });
        assert!(matches!(
            build_import(data),
            Err(DomainError::Validation(_))
        ));

        let mut data = sale_and_winter();
        data.highlighted = vec![
            SeedHighlight {
                category: "Sale".into(),
                position: 1,
            },
            SeedHighlight {
                category: "Winter".into(),
                position: 1,
            },
        ];
        assert!(matches!(
            build_import(data),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn empty_name_fails_validation() {
        let mut data = sale_and_winter();
        data.products[0].name.clear();
        assert!(matches!(
            build_import(data),
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn loads_seed_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "categories": [{{ "name": "Sale", "description": "Seasonal sale" }}],
                "products": [
                    {{ "name": "Wool Scarf", "price": 19.99, "color": "red", "categories": ["Sale"] }}
                ],
                "highlighted": [{{ "category": "Sale", "position": 0 }}]
            }}"#
        )
        .unwrap();

        let data = SeedService::load_seed_file(file.path()).await.unwrap();
        assert_eq!(data.categories[0].name, "Sale");
        assert_eq!(data.products[0].price, Decimal::new(1999, 2));
        assert_eq!(data.highlighted[0].position, 0);
    }

    #[tokio::test]
    async fn malformed_seed_file_is_infrastructure_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = SeedService::load_seed_file(file.path()).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Infrastructure(InfraError::Serialization(_))
        ));
    }
}
