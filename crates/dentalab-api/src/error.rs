//! HTTP error mapping

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dentalab_core::DomainError;
use thiserror::Error;

use crate::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// A malformed id cannot name a row, so it reads as not found.
impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError::Domain(DomainError::NotFound)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            ApiError::Domain(DomainError::NotFound) => {
                tracing::warn!("Not found");
                (StatusCode::NOT_FOUND, "NOT_FOUND", "resource not found".to_string(), None)
            }
            ApiError::Domain(DomainError::InvalidInput(errors)) => {
                tracing::warn!("Validation failed: {}", errors);
                (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    "validation failed".to_string(),
                    Some(errors.into_iter().collect()),
                )
            }
            ApiError::Domain(DomainError::DuplicateEmail(_)) => {
                tracing::warn!("Duplicate email");
                (StatusCode::CONFLICT, "DUPLICATE_EMAIL", "email already exists".to_string(), None)
            }
            ApiError::Domain(err @ DomainError::InvalidStatusTransition { .. }) => {
                tracing::warn!("{}", err);
                (StatusCode::BAD_REQUEST, "INVALID_STATUS_TRANSITION", err.to_string(), None)
            }
            ApiError::Domain(err @ DomainError::UnknownStatus(_)) => {
                tracing::warn!("{}", err);
                (StatusCode::BAD_REQUEST, "UNKNOWN_STATUS", err.to_string(), None)
            }
            ApiError::Domain(DomainError::Unauthorized) => {
                tracing::warn!("Unauthorized");
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "unauthorized".to_string(), None)
            }
            ApiError::Domain(DomainError::Forbidden) => {
                tracing::warn!("Forbidden");
                (StatusCode::FORBIDDEN, "FORBIDDEN", "forbidden".to_string(), None)
            }
            ApiError::Domain(DomainError::Internal(msg)) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "internal server error".to_string(),
                    None,
                )
            }
            ApiError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg, None)
            }
            ApiError::Forbidden(msg) => {
                tracing::warn!("Forbidden: {}", msg);
                (StatusCode::FORBIDDEN, "FORBIDDEN", msg, None)
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None)
            }
        };

        let body = Json(ApiResponse::<()>::error_with_details(code, &message, details));
        (status, body).into_response()
    }
}
