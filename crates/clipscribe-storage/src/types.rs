use bytes::Bytes;

/// Audio payload with the metadata declared by the client
#[derive(Debug, Clone)]
pub struct AudioFile {
    /// Raw audio data
    pub bytes: Bytes,
    /// Original filename
    pub filename: String,
    /// Declared content type (e.g. `audio/wav`)
    pub content_type: String,
}

/// Upload request as received from a client, before validation
#[derive(Debug, Default)]
pub struct UploadRequest {
    pub audio: Option<AudioFile>,
    /// Registered provider name (e.g. `aws-s3`)
    pub provider: Option<String>,
    /// Credentials as JSON text
    pub credentials: Option<String>,
}

/// Object written by a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Public URL of the object
    pub url: String,
    /// Key inside the bucket (`audio/{filename}`)
    pub storage_key: String,
}

/// Result of a coordinated upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub url: String,
    pub storage_key: String,
    /// Generated `{timestamp}_{original}` name the object was stored under
    pub filename: String,
}
