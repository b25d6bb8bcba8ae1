//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.
//! Every body has `error` (machine-readable) and `message` (human-readable).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;
use crate::models::{FieldErrors, ValidationError};

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// One or more fields failed validation (400)
    Validation(FieldErrors),

    /// Body could not be parsed (400)
    BadRequest { message: String },

    /// Body exceeds the request size limit (413)
    PayloadTooLarge { message: String },

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Body content type is neither JSON nor form data (415)
    UnsupportedMediaType { content_type: Option<String> },

    /// Database unreachable (503)
    Unavailable,

    /// Database error (500, logged)
    Database(DbError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Validation(fields) => json!({
                "error": "validation_error",
                "message": fields.to_string(),
                "fields": fields,
            }),
            Self::BadRequest { message } => json!({
                "error": "bad_request",
                "message": message
            }),
            Self::PayloadTooLarge { message } => json!({
                "error": "payload_too_large",
                "message": message
            }),
            Self::NotFound { resource, id } => json!({
                "error": "not_found",
                "message": format!("{} '{}' not found", resource, id)
            }),
            Self::UnsupportedMediaType { content_type } => {
                let message = match content_type {
                    Some(ct) => format!("unsupported content type '{}'", ct),
                    None => "missing content type".to_string(),
                };
                json!({
                    "error": "unsupported_media_type",
                    "message": message
                })
            }
            Self::Unavailable => json!({
                "error": "service_unavailable",
                "message": "database unavailable"
            }),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                json!({
                    "error": "internal_error",
                    "message": "an internal error occurred"
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<FieldErrors> for ApiError {
    fn from(e: FieldErrors) -> Self {
        Self::Validation(e)
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e.into())
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::Sqlx(sqlx::Error::PoolTimedOut) => {
                tracing::warn!("database pool timed out");
                Self::Unavailable
            }
            _ => Self::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_lists_fields() {
        let mut fields = FieldErrors::new();
        fields.push(ValidationError::Empty { field: "name" });
        fields.push(ValidationError::TooLong {
            field: "price",
            max: 100,
        });

        let response = ApiError::from(fields).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["fields"]["name"][0], "name cannot be blank");
        assert!(body["fields"]["price"].is_array());
    }

    #[tokio::test]
    async fn db_not_found_is_404() {
        let err = ApiError::from(DbError::NotFound {
            resource: "wine",
            id: "7".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], "wine '7' not found");
    }

    #[tokio::test]
    async fn database_error_is_opaque() {
        let err = ApiError::from(DbError::Sqlx(sqlx::Error::RowNotFound));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["message"], "an internal error occurred");
    }

    #[tokio::test]
    async fn pool_timeout_is_503() {
        let err = ApiError::from(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn payload_too_large_is_413() {
        let err = ApiError::PayloadTooLarge {
            message: "length limit exceeded".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body_json(response).await["error"], "payload_too_large");
    }

    #[test]
    fn unsupported_media_type_is_415() {
        let err = ApiError::UnsupportedMediaType {
            content_type: Some("text/plain".into()),
        };
        assert_eq!(err.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
