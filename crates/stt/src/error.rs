use clipscribe_core::{ErrorKind, HttpError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SttError>;

/// Transcription failures, normalised from HTTP and file I/O errors
#[derive(Debug, Error)]
pub enum SttError {
    /// API rejected the request (400)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Missing or invalid API key (401)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// API returned any other error status
    #[error("Provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Network or connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Audio could not be fetched from its URL
    #[error("Audio download failed with status {status}")]
    DownloadFailed { status: u16 },

    /// Local audio copy could not be written or read
    #[error("Local audio file error: {0}")]
    Io(#[from] std::io::Error),

    /// Response body could not be read; details stay in the logs
    #[error("Internal server error")]
    InternalError,
}

impl SttError {
    /// Classify a non-success API response
    pub(crate) fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => Self::AuthenticationFailed(message),
            400 => Self::InvalidRequest(message),
            _ => Self::ProviderApiError { status, message },
        }
    }
}

impl HttpError for SttError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRequest(_)
            | Self::AuthenticationFailed(_)
            | Self::ProviderApiError { .. }
            | Self::ConnectionError(_)
            | Self::DownloadFailed { .. }
            | Self::InternalError => ErrorKind::Transport,
            Self::Io(_) => ErrorKind::Resource,
        }
    }
}
