//! Category API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{HighlightRequest, ListCategoriesQuery};
use crate::application::CategoryUseCase;
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};
use crate::interfaces::http::error::{ApiError, ApiResult};
use crate::interfaces::http::hal::{
    CategoryTransformer, HalCategory, HalHighlightedCategory, HighlightedCategoryTransformer,
    Transformer,
};

/// Category handler state
#[derive(Clone)]
pub struct CategoryState {
    pub usecase: Arc<CategoryUseCase>,
    pub transformer: CategoryTransformer,
    pub highlighted_transformer: HighlightedCategoryTransformer,
}

#[utoipa::path(
    get,
    path = "/categories",
    tag = "Categories",
    params(ListCategoriesQuery),
    responses(
        (status = 200, description = "All categories ordered by name", body = Vec<HalCategory>, content_type = "application/hal+json"),
        (status = 500, description = "Storage failure", body = ApiResponse<String>)
    )
)]
pub async fn list_categories(
    State(state): State<CategoryState>,
    Query(query): Query<ListCategoriesQuery>,
) -> ApiResult<Json<Vec<HalCategory>>> {
    let categories = match query.min_products {
        Some(min) => {
            state
                .usecase
                .find_with_min_products(query.detailed, min)
                .await?
        }
        None => state.usecase.find(query.detailed).await?,
    };
    Ok(Json(state.transformer.transform_all(&categories)))
}

#[utoipa::path(
    get,
    path = "/categories/highlighted",
    tag = "Categories",
    responses(
        (status = 200, description = "Highlighted categories by ascending position", body = Vec<HalHighlightedCategory>, content_type = "application/hal+json"),
        (status = 500, description = "Storage failure", body = ApiResponse<String>)
    )
)]
pub async fn list_highlighted_categories(
    State(state): State<CategoryState>,
) -> ApiResult<Json<Vec<HalHighlightedCategory>>> {
    let highlighted = state.usecase.find_highlighted_categories().await?;
    Ok(Json(state.highlighted_transformer.transform_all(&highlighted)))
}

#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "Categories",
    params(("id" = String, Path, description = "Category uuid or slug")),
    responses(
        (status = 200, description = "Category with its products", body = HalCategory, content_type = "application/hal+json"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_category(
    State(state): State<CategoryState>,
    Path(id): Path<String>,
) -> ApiResult<Json<HalCategory>> {
    let category = state
        .usecase
        .find_category_by_id(&id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(state.transformer.transform(&category)))
}

#[utoipa::path(
    put,
    path = "/categories/{id}/highlight",
    tag = "Categories",
    params(("id" = String, Path, description = "Category uuid or slug")),
    request_body = HighlightRequest,
    responses(
        (status = 200, description = "Category highlighted", body = HalHighlightedCategory),
        (status = 404, description = "Not found"),
        (status = 409, description = "Position held by another category", body = ApiResponse<String>),
        (status = 422, description = "Validation error", body = ApiResponse<String>)
    )
)]
pub async fn highlight_category(
    State(state): State<CategoryState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<HighlightRequest>,
) -> ApiResult<Json<HalHighlightedCategory>> {
    let highlighted = state
        .usecase
        .highlight_category(&id, body.position)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(state.highlighted_transformer.transform(&highlighted)))
}

#[utoipa::path(
    delete,
    path = "/categories/{id}/highlight",
    tag = "Categories",
    params(("id" = String, Path, description = "Category uuid or slug")),
    responses(
        (status = 204, description = "Highlight removed"),
        (status = 404, description = "Category unknown or not highlighted")
    )
)]
pub async fn remove_highlight(
    State(state): State<CategoryState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if state.usecase.remove_highlight(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
