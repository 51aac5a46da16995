//! Category request types

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Query parameters for `GET /categories`
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListCategoriesQuery {
    /// Include each category's product list
    #[serde(default, alias = "isDetailed")]
    pub detailed: bool,
    /// Only categories with at least this many products
    #[serde(default, alias = "minProducts")]
    pub min_products: Option<u64>,
}

/// Body of `PUT /categories/{id}/highlight`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct HighlightRequest {
    /// Display rank, unique among highlighted categories
    #[validate(range(min = 0))]
    #[schema(example = 1)]
    pub position: i32,
}
