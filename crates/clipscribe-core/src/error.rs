use http::StatusCode;

/// Failure classes shared by every layer
///
/// Each domain error maps onto exactly one kind, and the kind alone decides
/// the HTTP status the boundary reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed request fields
    Validation,
    /// Referenced source file does not exist
    NotFound,
    /// Required secret or setting absent or left as a placeholder
    Configuration,
    /// Object-store or transcription network failure
    Transport,
    /// Local file I/O failure
    Resource,
}

impl ErrorKind {
    /// HTTP status code reported for this kind
    pub const fn status_code(self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Configuration | Self::Transport | Self::Resource => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable name (e.g. `validation_error`)
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation_error",
            Self::NotFound => "not_found_error",
            Self::Configuration => "configuration_error",
            Self::Transport => "transport_error",
            Self::Resource => "resource_error",
        }
    }
}

/// Trait for domain errors that can be converted to HTTP responses
///
/// Implemented by each feature crate's error type. The server layer
/// converts these into actual HTTP responses, keeping domain errors
/// decoupled from axum.
pub trait HttpError: std::error::Error {
    /// Failure class of this error
    fn kind(&self) -> ErrorKind;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String {
        self.to_string()
    }

    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        self.kind().status_code()
    }
}
