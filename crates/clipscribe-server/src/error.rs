use axum::{
    Json,
    response::{IntoResponse, Response},
};
use clipscribe_core::{ErrorKind, HttpError};
use clipscribe_pipeline::PipelineError;
use clipscribe_storage::UploadError;
use serde::Serialize;
use thiserror::Error;

pub(crate) type Result<T> = std::result::Result<T, ApiError>;

/// Errors surfaced by the HTTP API
#[derive(Debug, Error)]
pub(crate) enum ApiError {
    /// Missing or malformed request field, including bodies the extractors reject
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("failed to save audio: {0}")]
    SaveAudio(#[source] std::io::Error),

    #[error("failed to update recordings log: {0}")]
    RecordingLog(#[source] std::io::Error),
}

impl ApiError {
    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

impl From<axum::extract::rejection::JsonRejection> for ApiError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<axum::extract::multipart::MultipartRejection> for ApiError {
    fn from(rejection: axum::extract::multipart::MultipartRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<axum::extract::multipart::MultipartError> for ApiError {
    fn from(error: axum::extract::multipart::MultipartError) -> Self {
        Self::BadRequest(error.body_text())
    }
}

impl HttpError for ApiError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::BadRequest(_) => ErrorKind::Validation,
            Self::Upload(e) => e.kind(),
            Self::Pipeline(e) => e.kind(),
            Self::SaveAudio(_) | Self::RecordingLog(_) => ErrorKind::Resource,
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Upload(e) => e.client_message(),
            Self::Pipeline(e) => e.client_message(),
            _ => self.to_string(),
        }
    }
}

/// Failure body: `{"success": false, "error": "..."}`
#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = self.client_message();

        if status.is_server_error() {
            tracing::error!(kind = self.kind().as_str(), "request failed: {error}");
        } else {
            tracing::debug!(kind = self.kind().as_str(), "request rejected: {error}");
        }

        (status, Json(ErrorResponse { success: false, error })).into_response()
    }
}
