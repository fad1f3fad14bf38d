//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in SOBRIPOS                               │
//! │                                                                         │
//! │  Handler: Result<T, ApiError>                                          │
//! │         │                                                               │
//! │         ├── CoreError::NotFound ──────────► 404, empty body            │
//! │         │                                                               │
//! │         ├── CoreError::IdMismatch ────────► 400 {code, message}        │
//! │         ├── ValidationError ──────────────► 400 {code, message}        │
//! │         ├── JSON / UUID rejection ────────► 400 {code, message}        │
//! │         │                                                               │
//! │         └── DbError (anything) ───────────► 500 generic body           │
//! │                                              cause goes to the log     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use sobripos_core::{CoreError, ValidationError};
use sobripos_db::DbError;

/// Body of a 400 or 500 response.
///
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "name is required"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Malformed request: id mismatch, bad JSON, bad UUID (400)
    BadRequest,

    /// Field rules failed (400)
    ValidationError,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::BadRequest | ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::NotFound, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
///
/// The message is kept for the log only; clients see a generic body.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        ApiError::new(ErrorCode::DatabaseError, err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { .. } => ApiError::not_found(err.to_string()),
            CoreError::IdMismatch { .. } => ApiError::bad_request(err.to_string()),
            CoreError::Validation(inner) => inner.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::new(ErrorCode::ValidationError, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status();

        match self.code {
            ErrorCode::NotFound => status.into_response(),
            ErrorCode::BadRequest | ErrorCode::ValidationError => {
                (status, Json(self)).into_response()
            }
            ErrorCode::DatabaseError | ErrorCode::Internal => {
                error!(code = ?self.code, cause = %self.message, "Request failed");
                let body = ApiError::new(self.code, "An internal error occurred");
                (status, Json(body)).into_response()
            }
        }
    }
}

/// Handler result.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_status_mapping() {
        let not_found: ApiError = CoreError::not_found("product", Uuid::nil()).into();
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let mismatch: ApiError = CoreError::IdMismatch {
            path: Uuid::nil(),
            body: Uuid::new_v4(),
        }
        .into();
        assert_eq!(mismatch.code, ErrorCode::BadRequest);

        let invalid: ApiError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert_eq!(invalid.code.status(), StatusCode::BAD_REQUEST);

        let db: ApiError = DbError::PoolExhausted.into();
        assert_eq!(
            db.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_value(ApiError::bad_request("nope")).unwrap();
        assert_eq!(json["code"], "BAD_REQUEST");
        assert_eq!(json["message"], "nope");
    }
}
