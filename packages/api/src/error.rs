use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use taskbot_core::ValidationErrors;
use taskbot_storage::StorageError;
use thiserror::Error;
use tracing::{error, info};

/// Error type returned by every handler
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("JSON parse error - {0}")]
    MalformedBody(String),

    #[error("Unsupported media type")]
    UnsupportedMediaType,

    #[error("Resource not found")]
    NotFound,

    #[error("Invalid page")]
    InvalidPage,

    #[error("Storage error: {0}")]
    Storage(StorageError),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(_) => AppError::NotFound,
            other => AppError::Storage(other),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => AppError::UnsupportedMediaType,
            other => AppError::MalformedBody(other.body_text()),
        }
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            AppError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::NotFound | AppError::InvalidPage => StatusCode::NOT_FOUND,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing `detail` message; storage details never leave the server
    fn detail(&self) -> String {
        match self {
            AppError::Validation(errors) => errors.to_string(),
            AppError::MalformedBody(_) => self.to_string(),
            AppError::UnsupportedMediaType => {
                "Unsupported media type in request. Expected application/json.".to_string()
            }
            AppError::NotFound => "Not found.".to_string(),
            AppError::InvalidPage => "Invalid page.".to_string(),
            AppError::Storage(_) => "A server error occurred.".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::Storage(err) => error!(error = %err, "Storage system error"),
            _ => info!(status = %status, error = %self, "API error response"),
        }

        let body = match &self {
            AppError::Validation(errors) => json!(errors),
            _ => json!({ "detail": self.detail() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, AppError>;
