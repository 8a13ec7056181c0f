//! API error type and HTTP status mapping.
//!
//! ## Status Mapping
//! ```text
//! ValidationError        → 400 Bad Request
//! DbError::NotFound      → 404 Not Found
//! DbError::BookingConflict → 409 Conflict (retryable)
//! other DbError          → 500 Internal Server Error (detail logged,
//!                          not leaked to the caller)
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use stayline_core::ValidationError;
use stayline_db::DbError;

/// Errors surfaced to HTTP callers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),

    /// No such entity (distinct from bad input shape).
    #[error("{0}")]
    NotFound(String),

    /// A concurrent booking won the unit; retry with fresh availability.
    #[error("{0}")]
    Conflict(String),

    /// Data-store failure.
    #[error("Internal server error")]
    Internal,
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            DbError::BookingConflict { .. } => ApiError::Conflict(err.to_string()),
            other => {
                error!(?other, "Data access error");
                ApiError::Internal
            }
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::NotFound(_) => "not_found",
            ApiError::Conflict(_) => "conflict",
            ApiError::Internal => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.kind(),
            "message": self.to_string(),
        }));

        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_400() {
        let err: ApiError = ValidationError::StayWindowOrder.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.kind(), "validation_error");
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err: ApiError = DbError::not_found("Room", "Deluxe/CP").into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_maps_to_409() {
        let err: ApiError = DbError::booking_conflict("unit-1").into();
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_other_db_errors_map_to_500_without_detail() {
        let err: ApiError = DbError::QueryFailed("secret detail".to_string()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.to_string().contains("secret"));
    }
}
