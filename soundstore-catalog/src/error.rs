//! Error types for the catalog
//!
//! The service is the only producer of `NotFound`/`BadRequest`/`Conflict`;
//! `Validation` comes from request checks in the HTTP layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Catalog error type
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Referenced sound or tag does not exist (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Inconsistent request, e.g. path/payload id mismatch (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Malformed input rejected before reaching the service (422)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Uniqueness conflict, e.g. duplicate tag label (409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Store failure (500)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl CatalogError {
    pub fn status(&self) -> StatusCode {
        match self {
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CatalogError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CatalogError::Conflict(_) => StatusCode::CONFLICT,
            CatalogError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            CatalogError::NotFound(_) => "NOT_FOUND",
            CatalogError::BadRequest(_) => "BAD_REQUEST",
            CatalogError::Validation(_) => "VALIDATION_ERROR",
            CatalogError::Conflict(_) => "CONFLICT",
            CatalogError::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            CatalogError::NotFound(msg)
            | CatalogError::BadRequest(msg)
            | CatalogError::Validation(msg)
            | CatalogError::Conflict(msg) => msg.clone(),
            CatalogError::Database(err) => {
                // Details stay in the log
                error!("Database error: {}", err);
                "Internal database error".to_string()
            }
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            CatalogError::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CatalogError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CatalogError::Validation("x".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            CatalogError::Conflict("x".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            CatalogError::Database(sqlx::Error::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_into_response_uses_status() {
        let response = CatalogError::NotFound("Sound abc".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
