//! Product DTOs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{CategoryRef, Product};

/// Product API representation
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductDto {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 19.99)]
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub categories: Vec<CategorySummaryDto>,
}

impl ProductDto {
    pub fn from_domain(product: Product) -> Self {
        Self {
            uuid: product.uuid,
            name: product.name,
            slug: product.slug,
            description: product.description,
            price: product.price,
            color: product.color,
            categories: product
                .categories
                .into_iter()
                .map(CategorySummaryDto::from_domain)
                .collect(),
        }
    }
}

/// Category as listed on a product
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CategorySummaryDto {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
}

impl CategorySummaryDto {
    pub fn from_domain(category: CategoryRef) -> Self {
        Self {
            uuid: category.uuid,
            name: category.name,
            slug: category.slug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_is_serialized_as_number() {
        let product = Product::new("Wool Scarf", Decimal::new(1999, 2));
        let json = serde_json::to_value(ProductDto::from_domain(product)).unwrap();

        assert_eq!(json["price"], serde_json::json!(19.99));
        assert_eq!(json["slug"], "wool-scarf");
        assert!(json.get("color").is_none());
    }
}
