//! Category domain entity

use uuid::Uuid;

use crate::shared::slug::slugify;

/// How much of a category's product relation a listing carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryDetail {
    /// Category fields plus the number of linked products.
    #[default]
    Summary,
    /// Category fields plus every linked product reference.
    Full,
}

impl From<bool> for CategoryDetail {
    fn from(is_detailed: bool) -> Self {
        if is_detailed {
            Self::Full
        } else {
            Self::Summary
        }
    }
}

/// A product as seen from one of its categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRef {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

/// Catalog category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub uuid: Uuid,
    pub name: String,
    /// Always `slugify(name)`, fixed at creation.
    pub slug: String,
    pub description: Option<String>,
    /// Linked products in insertion order. Empty when loaded as a summary.
    pub products: Vec<ProductRef>,
    /// Number of linked products, set even when `products` was not loaded.
    pub product_count: u64,
}

impl Category {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        let name = name.into();
        Self {
            uuid: Uuid::new_v4(),
            slug: slugify(&name),
            name,
            description,
            products: Vec::new(),
            product_count: 0,
        }
    }

    /// Attach the full product relation, keeping the count in step.
    pub fn with_products(mut self, products: Vec<ProductRef>) -> Self {
        self.product_count = products.len() as u64;
        self.products = products;
        self
    }
}

/// Display rank attached to a highlighted category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Highlight {
    pub position: i32,
}

impl Highlight {
    pub fn new(position: i32) -> Self {
        Self { position }
    }
}

/// A category selected for promotional display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedCategory {
    pub category: Category,
    pub highlight: Highlight,
}

impl HighlightedCategory {
    pub fn new(category: Category, highlight: Highlight) -> Self {
        Self {
            category,
            highlight,
        }
    }

    pub fn position(&self) -> i32 {
        self.highlight.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str) -> ProductRef {
        ProductRef {
            uuid: Uuid::new_v4(),
            name: name.to_string(),
            slug: slugify(name),
            description: None,
        }
    }

    #[test]
    fn new_category_derives_slug_from_name() {
        let c = Category::new("Silk Dresses", None);
        assert_eq!(c.slug, "silk-dresses");
        assert_eq!(c.product_count, 0);
        assert!(c.products.is_empty());
    }

    #[test]
    fn with_products_sets_count() {
        let c = Category::new("Sale", None).with_products(vec![product("Hat"), product("Scarf")]);
        assert_eq!(c.product_count, 2);
        assert_eq!(c.products[1].name, "Scarf");
    }

    #[test]
    fn detail_from_flag() {
        assert_eq!(CategoryDetail::from(true), CategoryDetail::Full);
        assert_eq!(CategoryDetail::from(false), CategoryDetail::Summary);
    }

    #[test]
    fn highlighted_category_exposes_position() {
        let h = HighlightedCategory::new(Category::new("Winter", None), Highlight::new(3));
        assert_eq!(h.position(), 3);
        assert_eq!(h.category.name, "Winter");
    }
}
