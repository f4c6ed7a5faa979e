//! Error Mapper
//!
//! Every handler failure ends up here as an [`ApiError`]. The mapping is:
//!
//! | Failure | Status | Body |
//! |---|---|---|
//! | malformed identifier | 400 | `{"error": "malformatted id"}` |
//! | field validation / duplicate name or number / unreadable body | 400 | `{"error": <message>}` |
//! | entity absent | 404 | empty |
//! | anything else from the store | 500 | generic `{"error": ...}` |
//!
//! Each failure is logged with its message before the response is chosen.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use phonebook_common::{ErrorBody, FieldError};
use thiserror::Error;

use crate::store::StoreError;

/// Body text for a malformed identifier.
pub const MALFORMATTED_ID: &str = "malformatted id";

/// Result type alias for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Terminal failure of a request
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("malformatted id: {0}")]
    MalformedId(String),

    #[error("{0}")]
    Validation(String),

    #[error("resource not found")]
    NotFound,

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Cast { value, .. } => ApiError::MalformedId(value),
            duplicate @ StoreError::Duplicate { .. } => ApiError::Validation(duplicate.to_string()),
            other => ApiError::Store(other),
        }
    }
}

impl From<FieldError> for ApiError {
    fn from(err: FieldError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedId(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            ApiError::MalformedId(ref value) => {
                tracing::warn!(id = %value, "Rejected malformatted id");
                (status, Json(ErrorBody::new(MALFORMATTED_ID))).into_response()
            },
            ApiError::Validation(message) => {
                tracing::warn!(error = %message, "Validation failed");
                (status, Json(ErrorBody::new(message))).into_response()
            },
            ApiError::NotFound => {
                tracing::debug!("Entry not found");
                status.into_response()
            },
            ApiError::Store(ref err) => {
                tracing::error!(error = %err, "Store operation failed");
                (status, Json(ErrorBody::new("internal server error"))).into_response()
            },
        }
    }
}
