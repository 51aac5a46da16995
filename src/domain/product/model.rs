//! Product domain entity

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::shared::slug::slugify;

/// Prices are stored in the smallest currency unit (cents).
pub const PRICE_SCALE: u32 = 2;

/// A category as seen from one of its products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRef {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
}

/// Catalog product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub color: Option<String>,
    pub categories: Vec<CategoryRef>,
}

impl Product {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        let name = name.into();
        Self {
            uuid: Uuid::new_v4(),
            slug: slugify(&name),
            name,
            description: None,
            price,
            color: None,
            categories: Vec::new(),
        }
    }
}

/// Convert a stored amount in cents back to a price.
pub fn price_from_minor_units(cents: i64) -> Decimal {
    Decimal::new(cents, PRICE_SCALE)
}

/// Convert a price to cents, rounding half away from zero.
///
/// Returns `None` when the amount does not fit in an `i64`.
pub fn price_to_minor_units(price: Decimal) -> Option<i64> {
    price
        .round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero)
        .checked_mul(Decimal::ONE_HUNDRED)?
        .to_i64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn minor_units_conversion() {
        let price = Decimal::from_str("19.99").unwrap();
        assert_eq!(price_to_minor_units(price), Some(1999));
        assert_eq!(price_from_minor_units(1999), price);
    }

    #[test]
    fn minor_units_rounds_extra_precision() {
        let price = Decimal::from_str("10.005").unwrap();
        assert_eq!(price_to_minor_units(price), Some(1001));
    }

    #[test]
    fn new_product_derives_slug() {
        let p = Product::new("Wool Scarf (Red)", Decimal::ONE);
        assert_eq!(p.slug, "wool-scarf-red");
        assert!(p.categories.is_empty());
    }
}
