//! Product API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::application::ProductUseCase;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::error::{ApiError, ApiResult};
use crate::interfaces::http::hal::{HalProduct, ProductTransformer, Transformer};

#[derive(Clone)]
pub struct ProductState {
    pub usecase: Arc<ProductUseCase>,
    pub transformer: ProductTransformer,
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    responses(
        (status = 200, description = "All products with category links", body = Vec<HalProduct>, content_type = "application/hal+json"),
        (status = 500, description = "Storage failure", body = ApiResponse<String>)
    )
)]
pub async fn list_products(State(state): State<ProductState>) -> ApiResult<Json<Vec<HalProduct>>> {
    let products = state.usecase.find().await?;
    Ok(Json(state.transformer.transform_all(&products)))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product uuid or slug")),
    responses(
        (status = 200, description = "Product", body = HalProduct, content_type = "application/hal+json"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_product(
    State(state): State<ProductState>,
    Path(id): Path<String>,
) -> ApiResult<Json<HalProduct>> {
    let product = state
        .usecase
        .find_by_id(&id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(state.transformer.transform(&product)))
}
