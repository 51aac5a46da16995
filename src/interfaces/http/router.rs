//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::FromRef, middleware, routing::get, Router};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::dto::{
    CategoryDto, CategorySummaryDto, HighlightedCategoryDto, ProductDto, ProductSummaryDto,
};
use crate::application::{CategoryUseCase, ProductUseCase};
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::hal::{
    CategoryTransformer, HalCategory, HalHighlightedCategory, HalProduct,
    HighlightedCategoryTransformer, Link, ProductLinks, ProductTransformer, SelfLinks,
};
use crate::interfaces::http::middleware::hal_content_type;
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{categories, health, products};

/// Everything the routes need. Handlers extract their own slice via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub db: DatabaseConnection,
    pub categories: Arc<CategoryUseCase>,
    pub products: Arc<ProductUseCase>,
    /// Externally visible base URL, used for `_links`
    pub public_url: String,
    pub started_at: Arc<Instant>,
}

impl ApiState {
    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.public_url.trim_end_matches('/'), collection)
    }
}

impl FromRef<ApiState> for categories::CategoryState {
    fn from_ref(s: &ApiState) -> Self {
        let transformer = CategoryTransformer::new(s.collection_url("categories"));
        categories::CategoryState {
            usecase: Arc::clone(&s.categories),
            highlighted_transformer: HighlightedCategoryTransformer::new(transformer.clone()),
            transformer,
        }
    }
}

impl FromRef<ApiState> for products::ProductState {
    fn from_ref(s: &ApiState) -> Self {
        products::ProductState {
            usecase: Arc::clone(&s.products),
            transformer: ProductTransformer::new(
                s.collection_url("products"),
                s.collection_url("categories"),
            ),
        }
    }
}

impl FromRef<ApiState> for health::HealthState {
    fn from_ref(s: &ApiState) -> Self {
        health::HealthState {
            db: s.db.clone(),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        categories::list_categories,
        categories::list_highlighted_categories,
        categories::get_category,
        categories::highlight_category,
        categories::remove_highlight,
        products::list_products,
        products::get_product,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            health::ComponentHealth,
            CategoryDto,
            HighlightedCategoryDto,
            ProductSummaryDto,
            ProductDto,
            CategorySummaryDto,
            Link,
            SelfLinks,
            ProductLinks,
            HalCategory,
            HalHighlightedCategory,
            HalProduct,
            categories::HighlightRequest,
        )
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Categories", description = "Catalog categories and the highlighted set"),
        (name = "Products", description = "Catalog products"),
    ),
    info(
        title = "Storefront Catalog API",
        version = "1.0.0",
        description = "Categories and products served as HAL resources",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let category_routes = Router::new()
        .route("/", get(categories::list_categories))
        .route("/highlighted", get(categories::list_highlighted_categories))
        .route("/{id}", get(categories::get_category))
        .route(
            "/{id}/highlight",
            axum::routing::put(categories::highlight_category)
                .delete(categories::remove_highlight),
        );

    let product_routes = Router::new()
        .route("/", get(products::list_products))
        .route("/{id}", get(products::get_product));

    let catalog_routes = Router::new()
        .nest("/categories", category_routes)
        .nest("/products", product_routes)
        .layer(middleware::from_fn(hal_content_type));

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health::health_check))
        .merge(catalog_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
