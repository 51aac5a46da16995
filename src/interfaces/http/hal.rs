//! HAL representations
//!
//! Each transformer wraps a DTO with a `_links` object and an `_embedded`
//! slot. The highlighted-category transformer runs the plain category
//! transformer first and only appends `position`, so both shapes share
//! one link layout.

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::dto::{CategoryDto, HighlightedCategoryDto, ProductDto};

/// Turns a DTO into its hypermedia representation.
pub trait Transformer<T> {
    type Output: Serialize;

    fn transform(&self, dto: &T) -> Self::Output;

    fn transform_all(&self, dtos: &[T]) -> Vec<Self::Output> {
        dtos.iter().map(|dto| self.transform(dto)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Link {
    pub href: String,
}

/// `{base_url}/{uuid}`
pub fn create_self_link(base_url: &str, uuid: Uuid) -> Link {
    Link {
        href: format!("{}/{}", base_url.trim_end_matches('/'), uuid),
    }
}

/// Related resources embedded in a representation. Currently always empty.
pub type Embedded = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SelfLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HalCategory {
    #[serde(flatten)]
    pub category: CategoryDto,
    #[serde(rename = "_links")]
    pub links: SelfLinks,
    #[serde(rename = "_embedded")]
    #[schema(value_type = Object)]
    pub embedded: Embedded,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HalHighlightedCategory {
    #[serde(flatten)]
    pub base: HalCategory,
    pub position: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProductLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
    pub categories: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HalProduct {
    #[serde(flatten)]
    pub product: ProductDto,
    #[serde(rename = "_links")]
    pub links: ProductLinks,
    #[serde(rename = "_embedded")]
    #[schema(value_type = Object)]
    pub embedded: Embedded,
}

#[derive(Debug, Clone)]
pub struct CategoryTransformer {
    base_url: String,
}

impl CategoryTransformer {
    /// `base_url` is the collection URL, e.g. `http://host/categories`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Transformer<CategoryDto> for CategoryTransformer {
    type Output = HalCategory;

    fn transform(&self, dto: &CategoryDto) -> HalCategory {
        HalCategory {
            links: SelfLinks {
                self_link: create_self_link(&self.base_url, dto.uuid),
            },
            category: dto.clone(),
            embedded: Embedded::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HighlightedCategoryTransformer {
    base: CategoryTransformer,
}

impl HighlightedCategoryTransformer {
    pub fn new(base: CategoryTransformer) -> Self {
        Self { base }
    }
}

impl Transformer<HighlightedCategoryDto> for HighlightedCategoryTransformer {
    type Output = HalHighlightedCategory;

    fn transform(&self, dto: &HighlightedCategoryDto) -> HalHighlightedCategory {
        HalHighlightedCategory {
            base: self.base.transform(&dto.category),
            position: dto.position,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProductTransformer {
    base_url: String,
    category_base_url: String,
}

impl ProductTransformer {
    pub fn new(base_url: impl Into<String>, category_base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            category_base_url: category_base_url.into(),
        }
    }
}

impl Transformer<ProductDto> for ProductTransformer {
    type Output = HalProduct;

    fn transform(&self, dto: &ProductDto) -> HalProduct {
        let categories = dto
            .categories
            .iter()
            .map(|c| create_self_link(&self.category_base_url, c.uuid))
            .collect();
        HalProduct {
            links: ProductLinks {
                self_link: create_self_link(&self.base_url, dto.uuid),
                categories,
            },
            product: dto.clone(),
            embedded: Embedded::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::{json, Value};

    use super::*;
    use crate::application::dto::CategorySummaryDto;

    const BASE: &str = "http://localhost:3000/categories";

    fn category() -> CategoryDto {
        CategoryDto {
            uuid: Uuid::new_v4(),
            name: "Winter".into(),
            slug: "winter".into(),
            description: Some("Cold weather".into()),
            products: Some(Vec::new()),
            product_count: 0,
        }
    }

    #[test]
    fn category_gets_self_link_and_empty_embedded() {
        let dto = category();
        let json = serde_json::to_value(CategoryTransformer::new(BASE).transform(&dto)).unwrap();

        assert_eq!(
            json["_links"]["self"]["href"],
            format!("{}/{}", BASE, dto.uuid)
        );
        assert_eq!(json["_embedded"], json!({}));
        assert_eq!(json["name"], "Winter");
        assert_eq!(json["products"], json!([]));
    }

    #[test]
    fn highlighted_extends_base_representation() {
        let base = CategoryTransformer::new(BASE);
        let highlighted = HighlightedCategoryTransformer::new(base.clone());
        let dto = HighlightedCategoryDto {
            category: category(),
            position: 2,
        };

        let plain = serde_json::to_value(base.transform(&dto.category)).unwrap();
        let mut layered = serde_json::to_value(highlighted.transform(&dto)).unwrap();

        assert_eq!(layered["position"], 2);
        let Value::Object(fields) = &mut layered else {
            panic!("expected object");
        };
        fields.remove("position");
        assert_eq!(layered, plain);
    }

    #[test]
    fn transformation_is_idempotent() {
        let transformer = HighlightedCategoryTransformer::new(CategoryTransformer::new(BASE));
        let dto = HighlightedCategoryDto {
            category: category(),
            position: 0,
        };

        assert_eq!(transformer.transform(&dto), transformer.transform(&dto));
    }

    #[test]
    fn product_links_point_at_categories() {
        let category = CategorySummaryDto {
            uuid: Uuid::new_v4(),
            name: "Sale".into(),
            slug: "sale".into(),
        };
        let dto = ProductDto {
            uuid: Uuid::new_v4(),
            name: "Scarf".into(),
            slug: "scarf".into(),
            description: None,
            price: Decimal::new(500, 2),
            color: None,
            categories: vec![category.clone()],
        };

        let hal = ProductTransformer::new("http://x/products/", BASE).transform(&dto);
        assert_eq!(hal.links.self_link.href, format!("http://x/products/{}", dto.uuid));
        assert_eq!(hal.links.categories, vec![create_self_link(BASE, category.uuid)]);
    }
}
