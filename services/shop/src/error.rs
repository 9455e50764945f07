//! Custom error types for the shop service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the shop service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Unauthorized access
    #[error("Unauthorized")]
    Unauthorized,

    /// Authenticated but not allowed
    #[error("Forbidden")]
    Forbidden,

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unique or foreign-key constraint violation
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Check constraint violation
    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,
}

// Postgres SQLSTATE codes for constraint violations.
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";

impl ApiError {
    /// Classify a storage error into a request-level failure.
    ///
    /// Constraint violations surface as client errors; everything else is a
    /// 500. The enclosing transaction is rolled back by the caller either way.
    pub fn from_sqlx(err: &sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("row not found".to_string()),
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) => {
                    ApiError::Conflict(format!("duplicate value: {}", db_err.message()))
                }
                Some(FOREIGN_KEY_VIOLATION) => {
                    ApiError::Conflict(format!("referenced row constraint: {}", db_err.message()))
                }
                Some(CHECK_VIOLATION) => {
                    ApiError::Unprocessable(format!("check constraint: {}", db_err.message()))
                }
                _ => ApiError::InternalServerError,
            },
            _ => ApiError::InternalServerError,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        // Repository errors carry the underlying sqlx error; anything else
        // is an internal failure.
        if let Some(sqlx_err) = err.downcast_ref::<sqlx::Error>() {
            let classified = ApiError::from_sqlx(sqlx_err);
            if matches!(classified, ApiError::InternalServerError) {
                tracing::error!("Storage error: {}", err);
            }
            classified
        } else {
            tracing::error!("Unhandled error: {}", err);
            ApiError::InternalServerError
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Type alias for handler results
pub type ApiResult<T> = Result<T, ApiError>;
