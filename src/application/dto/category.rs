//! Category DTOs

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Category, HighlightedCategory, ProductRef};

/// Category API representation
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CategoryDto {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Present only for detailed listings and single-category lookups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<ProductSummaryDto>>,
    pub product_count: u64,
}

impl CategoryDto {
    /// Full representation, including linked products.
    pub fn from_domain(category: Category) -> Self {
        let products = category
            .products
            .into_iter()
            .map(ProductSummaryDto::from_domain)
            .collect();
        Self {
            uuid: category.uuid,
            name: category.name,
            slug: category.slug,
            description: category.description,
            products: Some(products),
            product_count: category.product_count,
        }
    }

    /// Listing representation: counts only.
    pub fn summary(category: Category) -> Self {
        Self {
            uuid: category.uuid,
            name: category.name,
            slug: category.slug,
            description: category.description,
            products: None,
            product_count: category.product_count,
        }
    }
}

/// Product as listed inside a category
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductSummaryDto {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProductSummaryDto {
    pub fn from_domain(product: ProductRef) -> Self {
        Self {
            uuid: product.uuid,
            name: product.name,
            slug: product.slug,
            description: product.description,
        }
    }
}

/// Highlighted category: every category field plus its display rank
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HighlightedCategoryDto {
    #[serde(flatten)]
    pub category: CategoryDto,
    pub position: i32,
}

impl HighlightedCategoryDto {
    pub fn from_domain(highlighted: HighlightedCategory) -> Self {
        let position = highlighted.position();
        Self {
            category: CategoryDto::from_domain(highlighted.category),
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale() -> Category {
        Category::new("Sale", None).with_products(vec![ProductRef {
            uuid: Uuid::new_v4(),
            name: "Scarf".into(),
            slug: "scarf".into(),
            description: None,
        }])
    }

    #[test]
    fn summary_omits_products_but_keeps_count() {
        let dto = CategoryDto::summary(sale());
        let json = serde_json::to_value(&dto).unwrap();

        assert!(json.get("products").is_none());
        assert_eq!(json["product_count"], 1);
        assert!(json.get("description").is_none());
    }

    #[test]
    fn highlighted_flattens_category_fields() {
        let dto = HighlightedCategoryDto::from_domain(HighlightedCategory::new(
            sale(),
            crate::domain::Highlight::new(3),
        ));
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["name"], "Sale");
        assert_eq!(json["position"], 3);
        assert_eq!(json["products"][0]["slug"], "scarf");
    }
}
