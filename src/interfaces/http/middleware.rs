//! Response middleware for the catalog routes

use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request},
    middleware::Next,
    response::Response,
};

/// Media type of every successful catalog read.
pub const HAL_JSON: &str = "application/hal+json";

/// Mark successful GET responses as `application/hal+json`.
///
/// Error responses keep their own content type, and a 404 carries none.
pub async fn hal_content_type(request: Request<Body>, next: Next) -> Response {
    let is_get = request.method() == Method::GET;
    let mut response = next.run(request).await;

    if is_get && response.status().is_success() {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(HAL_JSON));
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route(
                "/ok",
                get(|| async { Json(serde_json::json!({"ok": true})) })
                    .post(|| async { Json(serde_json::json!({"ok": true})) }),
            )
            .route("/missing", get(|| async { StatusCode::NOT_FOUND }))
            .layer(axum::middleware::from_fn(hal_content_type))
    }

    async fn content_type(method: Method, uri: &str) -> Option<String> {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        resp.headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn get_is_hal() {
        assert_eq!(content_type(Method::GET, "/ok").await.as_deref(), Some(HAL_JSON));
    }

    #[tokio::test]
    async fn other_methods_and_errors_are_untouched() {
        assert_eq!(
            content_type(Method::POST, "/ok").await.as_deref(),
            Some("application/json")
        );
        assert_eq!(content_type(Method::GET, "/missing").await, None);
    }
}
