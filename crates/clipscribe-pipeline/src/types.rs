use secrecy::SecretString;
use serde::Serialize;

/// Inputs of the upload-then-transcribe flow, as received from a client
#[derive(Debug, Default)]
pub struct UploadAndTranscribe {
    /// Recording in the uploads directory
    pub filename: Option<String>,
    /// Object-store credentials; a JSON object or JSON text
    pub credentials: Option<serde_json::Value>,
    /// Transcription API key supplied with the request
    pub api_key: Option<SecretString>,
    /// Registered storage provider, `aws-s3` when absent
    pub provider: Option<String>,
}

/// Result of the upload-then-transcribe flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadTranscription {
    pub transcript: String,
    /// Name of the transcript file in the uploads directory
    pub transcript_file: String,
    /// Public URL of the uploaded recording
    pub audio_url: String,
}

/// Result of the direct-transcribe flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectTranscription {
    pub transcript: String,
    pub transcript_file: String,
}
