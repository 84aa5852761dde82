//! HTTP Error Mapping
//!
//! Domain failures become JSON responses; validation failures keep the
//! `{errors: {...}}` shape the quick-add panels render inline.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::domain::{DomainError, ValidationErrors};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Domain(DomainError::Validation(errors))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Domain(DomainError::Validation(errors)) => {
                (StatusCode::BAD_REQUEST, json!({ "errors": errors }))
            }
            ApiError::Domain(DomainError::NotFound(what)) => {
                (StatusCode::NOT_FOUND, json!({ "error": format!("{} not found", what) }))
            }
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, json!({ "error": msg }))
            }
            ApiError::Multipart(e) => (e.status(), json!({ "error": e.body_text() })),
            ApiError::Domain(DomainError::Conflict(msg)) => {
                (StatusCode::CONFLICT, json!({ "error": msg }))
            }
            ApiError::Domain(DomainError::Internal(msg)) => {
                tracing::error!(error = %msg, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "Internal server error" }))
            }
            ApiError::Io(e) => {
                tracing::error!(error = %e, "io error");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "Internal server error" }))
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let mut errors = ValidationErrors::new();
        errors.required("name");
        assert_eq!(ApiError::from(errors).into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(DomainError::NotFound("task 4".into())).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(DomainError::Internal("boom".into())).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
