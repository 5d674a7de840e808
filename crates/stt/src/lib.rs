//! Speech-to-text client used by the transcription pipeline

#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod client;
mod error;
mod http_client;
mod types;

use std::sync::Arc;

use clipscribe_core::temp::scratch_dir;

pub use client::{TranscriptionClient, whisper::WhisperClient};
pub use error::{Result, SttError};
pub use types::Transcript;

/// Build the transcription client from configuration
///
/// # Errors
///
/// Returns an error if the configured scratch directory is unusable
pub fn build_client(config: &clipscribe_config::Config) -> anyhow::Result<Arc<WhisperClient>> {
    let transcription = &config.transcription;
    let scratch = scratch_dir(config.storage.scratch_dir.as_deref());

    if !scratch.is_dir() {
        anyhow::bail!(
            "Failed to initialize transcription client: scratch_dir {} is not a directory",
            scratch.display()
        );
    }

    tracing::debug!("Transcription client initialized with model {}", transcription.model);

    Ok(Arc::new(WhisperClient::new(
        "whisper".to_owned(),
        transcription.base_url.clone(),
        transcription.model.clone(),
        scratch,
    )))
}
