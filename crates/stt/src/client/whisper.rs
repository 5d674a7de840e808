use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use clipscribe_core::{TempResource, audio};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::{error::SttError, http_client::http_client, types::Transcript};

use super::TranscriptionClient;

const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// Filename used when a download URL has no usable last segment
const FALLBACK_FILENAME: &str = "audio.wav";

/// `OpenAI` Whisper transcription client
pub struct WhisperClient {
    client: Client,
    base_url: String,
    model: String,
    scratch_dir: PathBuf,
    name: String,
}

impl WhisperClient {
    pub fn new(name: String, base_url: Option<String>, model: String, scratch_dir: PathBuf) -> Self {
        let client = http_client();
        let base_url = base_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_OPENAI_API_URL.to_string());

        Self {
            client,
            base_url,
            model,
            scratch_dir,
            name,
        }
    }

    async fn download(&self, url: Url) -> crate::error::Result<Bytes> {
        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::error!("Audio download request failed: {e}");
            SttError::ConnectionError(format!("Failed to download audio: {e}"))
        })?;

        let status = response.status();

        if !status.is_success() {
            tracing::error!("Audio download failed ({status})");
            return Err(SttError::DownloadFailed { status: status.as_u16() });
        }

        response.bytes().await.map_err(|e| {
            tracing::error!("Audio download interrupted: {e}");
            SttError::ConnectionError(format!("Failed to read downloaded audio: {e}"))
        })
    }

    /// Stage `audio` in a temp file, submit that file and remove it again
    async fn stage_and_submit(
        &self,
        audio: &[u8],
        filename: &str,
        api_key: &SecretString,
    ) -> crate::error::Result<Transcript> {
        let staged = TempResource::acquire(&self.scratch_dir, audio, &audio::suffix_for(filename)).await?;

        let result = self.submit_staged(&staged, filename, api_key).await;

        if let Err(e) = staged.release() {
            tracing::warn!("failed to remove staged audio: {e}");
        }

        result
    }

    async fn submit_staged(
        &self,
        staged: &TempResource,
        filename: &str,
        api_key: &SecretString,
    ) -> crate::error::Result<Transcript> {
        let audio = tokio::fs::read(staged.path()).await?;
        let url = format!("{}/audio/transcriptions", self.base_url);

        tracing::debug!(
            "Whisper transcription request: {} bytes, model={}",
            audio.len(),
            self.model,
        );

        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(audio)
                    .file_name(filename.to_owned())
                    .mime_str(audio::content_type_for(filename))
                    .map_err(|e| SttError::InvalidRequest(format!("Invalid content type: {e}")))?,
            )
            .text("model", self.model.clone())
            .text("response_format", "text");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key.expose_secret()))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Whisper request failed: {e}");
                SttError::ConnectionError(format!("Failed to send request to Whisper: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!("Whisper API error ({status}): {error_text}");

            return Err(SttError::from_status(status.as_u16(), error_text));
        }

        let text = response.text().await.map_err(|e| {
            tracing::error!("Failed to read Whisper response: {e}");
            SttError::InternalError
        })?;

        tracing::debug!("Whisper transcription complete");

        Ok(Transcript::new(text))
    }
}

/// Last path segment of `url`, used as the staged file's name
fn filename_from_url(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .unwrap_or(FALLBACK_FILENAME)
        .to_owned()
}

#[async_trait]
impl TranscriptionClient for WhisperClient {
    async fn transcribe_from_url(&self, url: &str, api_key: &SecretString) -> crate::error::Result<Transcript> {
        let url = Url::parse(url).map_err(|e| SttError::InvalidRequest(format!("Invalid audio URL '{url}': {e}")))?;
        let filename = filename_from_url(&url);

        tracing::debug!("Downloading audio for transcription: {url}");

        let audio = self.download(url).await?;

        self.stage_and_submit(&audio, &filename, api_key).await
    }

    async fn transcribe_from_stream(
        &self,
        audio: Bytes,
        filename: &str,
        api_key: &SecretString,
    ) -> crate::error::Result<Transcript> {
        self.stage_and_submit(&audio, filename, api_key).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
