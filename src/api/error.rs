//! Unified API error handling
//!
//! This module provides a consistent error response format across all API endpoints.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use uuid::Uuid;

use crate::db::DbError;
use crate::service::meal::MealServiceError;
use crate::service::report::ReportError;
use crate::service::resolver::ResolveError;

/// Standard error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

/// Unified API error type
///
/// All API endpoints should return `Result<T, ApiError>` for consistent error handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Meal not found (404)
    #[error("Meal not found: {0}")]
    MealNotFound(String),

    /// Resolution produced no record (404)
    #[error("Nutrition resolution failed: {0}")]
    ResolutionFailed(String),

    /// Bad request / validation error (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    #[allow(dead_code)] // Reserved for failures with no more specific variant
    Internal(String),

    /// Database error (500)
    #[error("Database error: {0}")]
    Database(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MealNotFound(_) | ApiError::ResolutionFailed(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = match self {
            ApiError::MealNotFound(_) => "meal_not_found",
            ApiError::ResolutionFailed(_) => "resolution_failed",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Internal(_) => "internal_error",
            ApiError::Database(_) => "database_error",
        };

        tracing::error!(
            error_type = error_type,
            status = status.as_u16(),
            message = %self,
            "API error"
        );

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            request_id: Uuid::new_v4().to_string(),
        })
    }
}

// ============================================================================
// From conversions for service errors
// ============================================================================

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        match err {
            // The labeler producing nothing usable and exhausting every candidate
            // are surfaced identically to the caller.
            ResolveError::NoCandidates | ResolveError::Exhausted(_) => {
                ApiError::ResolutionFailed(err.to_string())
            }
            ResolveError::Db(e) => ApiError::Database(e.to_string()),
        }
    }
}

impl From<MealServiceError> for ApiError {
    fn from(err: MealServiceError) -> Self {
        match err {
            MealServiceError::DbError(DbError::NotFound(id)) => ApiError::MealNotFound(id),
            MealServiceError::DbError(e) => ApiError::Database(e.to_string()),
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::DbError(e) => ApiError::Database(e.to_string()),
        }
    }
}
