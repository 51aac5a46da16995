//! Mapping domain failures onto HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use super::common::ApiResponse;
use crate::domain::DomainError;

/// Handler error.
///
/// A missing resource answers `404` with an empty body. Infrastructure
/// failures are logged and answered with a generic `500`.
#[derive(Debug)]
pub enum ApiError {
    NotFound,
    Domain(DomainError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self::Domain(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let e = match self {
            Self::NotFound => return StatusCode::NOT_FOUND.into_response(),
            Self::Domain(e) => e,
        };

        let (status, message) = match e {
            DomainError::NotFound { .. } => return StatusCode::NOT_FOUND.into_response(),
            DomainError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            DomainError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            DomainError::Infrastructure(e) => {
                error!("Request failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}
