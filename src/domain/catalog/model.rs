//! Bulk catalog import values

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::category::Highlight;

/// Category row to be inserted by an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

/// Product row to be inserted by an import, with its resolved categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub color: Option<String>,
    /// Uuids of categories present in the same import.
    pub category_uuids: Vec<Uuid>,
}

/// A full catalog that replaces whatever is currently stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogImport {
    pub categories: Vec<NewCategory>,
    pub products: Vec<NewProduct>,
    pub highlights: Vec<(Uuid, Highlight)>,
}

/// Row counts written by an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: usize,
    pub products: usize,
    pub links: usize,
    pub highlights: usize,
}
