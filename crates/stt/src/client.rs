pub(crate) mod whisper;

use async_trait::async_trait;
use bytes::Bytes;
use secrecy::SecretString;

use crate::types::Transcript;

/// Trait for speech-to-text API clients
///
/// Both entry points stage the audio in a local temp file before submitting
/// it, and remove that file before returning on every path.
#[async_trait]
pub trait TranscriptionClient: Send + Sync {
    /// Download audio from `url` and transcribe it
    async fn transcribe_from_url(&self, url: &str, api_key: &SecretString) -> crate::error::Result<Transcript>;

    /// Transcribe audio received in memory
    async fn transcribe_from_stream(
        &self,
        audio: Bytes,
        filename: &str,
        api_key: &SecretString,
    ) -> crate::error::Result<Transcript>;

    /// Get the client name
    fn name(&self) -> &str;
}
