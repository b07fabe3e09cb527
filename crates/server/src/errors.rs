use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use service::errors::ServiceError;

/// Error surface of the todo API. Every variant renders as
/// `{"error": msg}` with the matching status code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    MissingField(String),
    #[error("{0}")]
    InvalidField(String),
    #[error("{0}")]
    InvalidFilter(String),
    #[error("{0}")]
    InvalidFormat(String),
    #[error("Todo not found")]
    NotFound,
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingField(_)
            | ApiError::InvalidField(_)
            | ApiError::InvalidFilter(_)
            | ApiError::InvalidFormat(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = self.to_string();
        if status.is_server_error() {
            error!(error = %msg, "request failed");
        }
        (status, Json(serde_json::json!({"error": msg}))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::InvalidFilter(msg) => ApiError::InvalidFilter(msg),
            ServiceError::NotFound(_) => ApiError::NotFound,
            ServiceError::Db(msg) | ServiceError::Model(models::errors::ModelError::Db(msg)) => {
                ApiError::Internal(msg)
            }
        }
    }
}

/// Classify body rejections from the typed `Json` extractors. The payload
/// schemas deny unknown fields, so serde's message tells the three 400
/// cases apart.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let detail = rejection.body_text();
        if detail.contains("unknown field") {
            ApiError::InvalidField(detail)
        } else if detail.contains("missing field") {
            ApiError::MissingField(detail)
        } else {
            ApiError::InvalidFormat(detail)
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
