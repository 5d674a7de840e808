use clipscribe_core::{ErrorKind, HttpError};
use clipscribe_storage::UploadError;
use stt::SttError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Transcription pipeline failures
///
/// Stage failures carry the inner error and prefix its message with the
/// stage that produced it.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("filename not provided")]
    MissingFilename,

    #[error("storage credentials not provided")]
    MissingCredentials,

    #[error("transcription API key not provided")]
    MissingApiKey,

    /// Filename contains a path separator or is `.`/`..`
    #[error("invalid filename '{0}'")]
    InvalidFilename(String),

    #[error("audio file '{0}' not found")]
    AudioNotFound(String),

    /// Direct upload without a named audio part
    #[error("no valid audio file was provided")]
    MissingAudio,

    #[error("file must be an audio file, got '{0}'")]
    NotAudio(String),

    /// No usable default API key in configuration
    #[error("transcription API key is not configured")]
    ApiKeyNotConfigured,

    #[error("upload failed: {0}")]
    Upload(#[source] UploadError),

    #[error("transcription failed: {0}")]
    Transcription(#[source] SttError),

    #[error("failed to read audio file: {0}")]
    ReadAudio(#[source] std::io::Error),

    #[error("failed to write transcript: {0}")]
    WriteTranscript(#[source] std::io::Error),
}

impl HttpError for PipelineError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingFilename
            | Self::MissingCredentials
            | Self::MissingApiKey
            | Self::InvalidFilename(_)
            | Self::MissingAudio
            | Self::NotAudio(_) => ErrorKind::Validation,
            Self::AudioNotFound(_) => ErrorKind::NotFound,
            Self::ApiKeyNotConfigured => ErrorKind::Configuration,
            Self::Upload(e) => e.kind(),
            Self::Transcription(e) => e.kind(),
            Self::ReadAudio(_) | Self::WriteTranscript(_) => ErrorKind::Resource,
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Transcription(e) => format!("transcription failed: {}", e.client_message()),
            _ => self.to_string(),
        }
    }
}
