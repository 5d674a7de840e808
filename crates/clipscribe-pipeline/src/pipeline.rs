use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use clipscribe_core::{Clock, SystemClock, audio, clock::compact_timestamp};
use clipscribe_storage::{AudioFile, Credentials, UploadCoordinator};
use secrecy::{ExposeSecret, SecretString};
use stt::TranscriptionClient;

use crate::{
    error::{PipelineError, Result},
    types::{DirectTranscription, UploadAndTranscribe, UploadTranscription},
};

/// Provider used when an upload-then-transcribe request names none
pub const DEFAULT_PROVIDER: &str = "aws-s3";

/// Value shipped in sample environment files; never a real key
const API_KEY_PLACEHOLDER: &str = "your-openai-api-key-here";

const TRANSCRIPT_SUFFIX: &str = "_transcript.txt";

/// Orchestrates upload, transcription and transcript persistence
pub struct TranscriptionPipeline {
    coordinator: Arc<UploadCoordinator>,
    client: Arc<dyn TranscriptionClient>,
    uploads_dir: PathBuf,
    api_key: Option<SecretString>,
    clock: Arc<dyn Clock>,
}

impl TranscriptionPipeline {
    pub fn new(
        coordinator: Arc<UploadCoordinator>,
        client: Arc<dyn TranscriptionClient>,
        uploads_dir: PathBuf,
    ) -> Self {
        Self {
            coordinator,
            client,
            uploads_dir,
            api_key: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Default API key for direct transcription
    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<SecretString>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Replace the clock used for transcript names
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    pub fn coordinator(&self) -> &UploadCoordinator {
        &self.coordinator
    }

    /// Upload a saved recording, transcribe it from its public URL and store
    /// the transcript next to the recording
    pub async fn upload_and_transcribe(&self, request: UploadAndTranscribe) -> Result<UploadTranscription> {
        let filename = request
            .filename
            .filter(|name| !name.trim().is_empty())
            .ok_or(PipelineError::MissingFilename)?;

        let credentials = request
            .credentials
            .filter(|value| !is_blank(value))
            .ok_or(PipelineError::MissingCredentials)?;

        let api_key = request
            .api_key
            .filter(|key| !key.expose_secret().trim().is_empty())
            .ok_or(PipelineError::MissingApiKey)?;

        if !audio::is_bare_filename(&filename) {
            return Err(PipelineError::InvalidFilename(filename));
        }

        let credentials = match credentials {
            serde_json::Value::String(raw) => Credentials::parse(&raw),
            value => Credentials::from_value(value),
        }
        .map_err(PipelineError::Upload)?;

        let provider = request
            .provider
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PROVIDER.to_owned());

        let bytes = tokio::fs::read(self.uploads_dir.join(&filename))
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => PipelineError::AudioNotFound(filename.clone()),
                _ => PipelineError::ReadAudio(e),
            })?;

        let audio = AudioFile {
            bytes: bytes.into(),
            content_type: audio::content_type_for(&filename).to_owned(),
            filename,
        };

        let outcome = self
            .coordinator
            .upload_with(&provider, audio, &credentials)
            .await
            .map_err(|e| {
                tracing::error!("Upload stage failed: {e}");
                PipelineError::Upload(e)
            })?;

        tracing::debug!("Uploaded recording to {}", outcome.url);

        let transcript = self
            .client
            .transcribe_from_url(&outcome.url, &api_key)
            .await
            .map_err(|e| {
                tracing::error!("Transcription stage failed: {e}");
                PipelineError::Transcription(e)
            })?;

        let transcript_file = audio::replace_extension(&outcome.filename, TRANSCRIPT_SUFFIX);
        self.persist(&transcript_file, &transcript.text).await?;

        Ok(UploadTranscription {
            transcript: transcript.text,
            transcript_file,
            audio_url: outcome.url,
        })
    }

    /// Transcribe audio received in the request using the configured key
    ///
    /// Every check completes before the audio is staged on disk.
    pub async fn transcribe_direct(&self, audio: Option<AudioFile>) -> Result<DirectTranscription> {
        let audio = audio
            .filter(|audio| !audio.filename.trim().is_empty())
            .ok_or(PipelineError::MissingAudio)?;

        if !audio::is_audio(&audio.content_type) {
            return Err(PipelineError::NotAudio(audio.content_type));
        }

        let api_key = self.configured_api_key()?;

        let transcript = self
            .client
            .transcribe_from_stream(audio.bytes, &audio.filename, api_key)
            .await
            .map_err(|e| {
                tracing::error!("Direct transcription failed: {e}");
                PipelineError::Transcription(e)
            })?;

        let transcript_file = format!("transcript_{}.txt", compact_timestamp(&self.clock.now()));
        self.persist(&transcript_file, &transcript.text).await?;

        Ok(DirectTranscription {
            transcript: transcript.text,
            transcript_file,
        })
    }

    fn configured_api_key(&self) -> Result<&SecretString> {
        self.api_key
            .as_ref()
            .filter(|key| {
                let key = key.expose_secret().trim();
                !key.is_empty() && key != API_KEY_PLACEHOLDER
            })
            .ok_or(PipelineError::ApiKeyNotConfigured)
    }

    async fn persist(&self, name: &str, text: &str) -> Result<()> {
        let path = self.uploads_dir.join(name);

        tokio::fs::write(&path, text).await.map_err(|e| {
            tracing::error!("Failed to write transcript {}: {e}", path.display());
            PipelineError::WriteTranscript(e)
        })?;

        tracing::debug!("Transcript written to {}", path.display());
        Ok(())
    }
}

fn is_blank(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::String(s) => s.trim().is_empty(),
        serde_json::Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
