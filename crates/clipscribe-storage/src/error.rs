use clipscribe_core::{ErrorKind, HttpError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, UploadError>;

/// Upload failures, from request validation to the provider call
#[derive(Debug, Error)]
pub enum UploadError {
    /// No file part, or a file part without a name
    #[error("no valid audio file was provided")]
    MissingFile,

    #[error("storage provider not specified")]
    MissingProvider,

    #[error("credentials not provided")]
    MissingCredentials,

    /// Credentials are not a JSON object
    #[error("credentials are not valid JSON: {0}")]
    InvalidCredentials(String),

    /// Declared content type is not `audio/*`
    #[error("file must be an audio file, got '{0}'")]
    NotAudio(String),

    #[error("unsupported storage provider '{0}'")]
    UnsupportedProvider(String),

    /// Provider-specific credential field absent or not a string
    #[error("missing credential field '{0}'")]
    MissingCredential(&'static str),

    /// Provider reported an error or its client could not be built
    #[error("{provider} upload failed: {message}")]
    Provider { provider: String, message: String },

    /// Credential material could not be staged on disk
    #[error("failed to stage credentials: {0}")]
    Io(#[from] std::io::Error),

    /// Storage configuration is unusable
    #[error("storage configuration error: {0}")]
    Config(String),
}

impl UploadError {
    pub(crate) fn provider(provider: &str, error: impl std::fmt::Display) -> Self {
        Self::Provider {
            provider: provider.to_owned(),
            message: error.to_string(),
        }
    }
}

impl HttpError for UploadError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingFile
            | Self::MissingProvider
            | Self::MissingCredentials
            | Self::InvalidCredentials(_)
            | Self::NotAudio(_)
            | Self::UnsupportedProvider(_)
            | Self::MissingCredential(_) => ErrorKind::Validation,
            Self::Provider { .. } => ErrorKind::Transport,
            Self::Io(_) => ErrorKind::Resource,
            Self::Config(_) => ErrorKind::Configuration,
        }
    }
}
