use std::sync::Arc;

use clipscribe_config::StorageProviderType;
use clipscribe_core::{Clock, SystemClock, audio, clock::compact_timestamp, temp::scratch_dir};

use crate::{
    credentials::Credentials,
    error::UploadError,
    provider::{ObjectStoreProvider, gcs::GcsProvider, s3::S3Provider},
    registry::ProviderRegistry,
    types::{AudioFile, UploadOutcome, UploadRequest},
};

/// Validates upload requests and dispatches them to a registered provider
pub struct UploadCoordinator {
    registry: ProviderRegistry,
    clock: Arc<dyn Clock>,
}

impl UploadCoordinator {
    pub fn new(registry: ProviderRegistry, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Validate a raw client request and upload it
    ///
    /// Checks run in a fixed order and the first failure wins: audio file,
    /// provider name, credentials presence, credentials JSON, content type,
    /// provider registration. None of them touch the network.
    pub async fn upload(&self, request: UploadRequest) -> crate::error::Result<UploadOutcome> {
        let audio = valid_audio(request.audio)?;

        let provider = request
            .provider
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(UploadError::MissingProvider)?;

        let raw_credentials = request
            .credentials
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .ok_or(UploadError::MissingCredentials)?;

        let credentials = Credentials::parse(raw_credentials)?;

        self.upload_with(provider, audio, &credentials).await
    }

    /// Upload with credentials that are already structured
    ///
    /// Used when credentials arrive as a JSON object rather than text. Runs
    /// the remaining checks in the same order as [`Self::upload`].
    pub async fn upload_with(
        &self,
        provider_name: &str,
        audio: AudioFile,
        credentials: &Credentials,
    ) -> crate::error::Result<UploadOutcome> {
        let audio = valid_audio(Some(audio))?;

        if provider_name.trim().is_empty() {
            return Err(UploadError::MissingProvider);
        }

        if !audio::is_audio(&audio.content_type) {
            return Err(UploadError::NotAudio(audio.content_type));
        }

        let provider = self
            .registry
            .get(provider_name)
            .ok_or_else(|| UploadError::UnsupportedProvider(provider_name.to_owned()))?;

        let filename = self.storage_filename(&audio.filename);

        tracing::debug!(provider = provider_name, %filename, "dispatching upload");

        let stored = provider
            .upload(audio.bytes, &filename, &audio.content_type, credentials)
            .await?;

        Ok(UploadOutcome {
            url: stored.url,
            storage_key: stored.storage_key,
            filename,
        })
    }

    /// `{YYYYMMDD_HHMMSS}_{original}`, with path separators flattened
    fn storage_filename(&self, original: &str) -> String {
        let flattened = original.trim().replace(['/', '\\'], "_");
        format!("{}_{flattened}", compact_timestamp(&self.clock.now()))
    }
}

fn valid_audio(audio: Option<AudioFile>) -> crate::error::Result<AudioFile> {
    audio
        .filter(|audio| !audio.filename.trim().is_empty())
        .ok_or(UploadError::MissingFile)
}

/// Builder for constructing the upload coordinator from configuration
pub struct CoordinatorBuilder<'a> {
    config: &'a clipscribe_config::Config,
    clock: Arc<dyn Clock>,
}

impl<'a> CoordinatorBuilder<'a> {
    pub fn new(config: &'a clipscribe_config::Config) -> Self {
        Self {
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for storage filenames
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn build(self) -> crate::error::Result<UploadCoordinator> {
        let storage = &self.config.storage;

        if let Some(dir) = storage.scratch_dir.as_deref().filter(|dir| !dir.is_dir()) {
            return Err(UploadError::Config(format!(
                "scratch_dir {} is not a directory",
                dir.display()
            )));
        }

        let scratch = scratch_dir(storage.scratch_dir.as_deref());
        let mut registry = ProviderRegistry::new();

        for (name, provider_config) in &storage.providers {
            tracing::debug!("Initializing storage provider: {name}");

            let provider: Arc<dyn ObjectStoreProvider> = match provider_config.provider_type {
                StorageProviderType::S3 => Arc::new(S3Provider::new(name.clone(), provider_config.endpoint.clone())),
                StorageProviderType::Gcs => Arc::new(GcsProvider::new(name.clone(), scratch.clone())),
            };

            registry.register(provider);
        }

        if registry.is_empty() {
            tracing::debug!("No storage providers configured");
        } else {
            tracing::debug!("Upload coordinator initialized with {} provider(s)", registry.len());
        }

        Ok(UploadCoordinator::new(registry, self.clock))
    }
}
