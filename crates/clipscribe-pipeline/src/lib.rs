//! Upload-then-transcribe and direct-transcribe flows

#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]

mod error;
mod pipeline;
mod types;

use std::sync::Arc;

pub use error::{PipelineError, Result};
pub use pipeline::{DEFAULT_PROVIDER, TranscriptionPipeline};
pub use types::{DirectTranscription, UploadAndTranscribe, UploadTranscription};

/// Build the transcription pipeline from configuration
///
/// Creates the uploads directory if it does not exist yet.
///
/// # Errors
///
/// Returns an error if the uploads directory cannot be created or a
/// collaborator fails to initialize
pub fn build_pipeline(config: &clipscribe_config::Config) -> anyhow::Result<Arc<TranscriptionPipeline>> {
    let uploads_dir = config.storage.uploads_dir.clone();

    std::fs::create_dir_all(&uploads_dir).map_err(|e| {
        anyhow::anyhow!(
            "Failed to create uploads directory {}: {e}",
            uploads_dir.display()
        )
    })?;

    let coordinator = clipscribe_storage::build_coordinator(config)?;
    let client = stt::build_client(config)?;

    tracing::debug!("Transcription pipeline writing to {}", uploads_dir.display());

    Ok(Arc::new(
        TranscriptionPipeline::new(coordinator, client, uploads_dir).with_api_key(config.transcription.api_key.clone()),
    ))
}
