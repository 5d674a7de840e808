#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod coordinator;
mod credentials;
mod error;
mod provider;
mod registry;
mod types;

use std::sync::Arc;

pub use coordinator::{CoordinatorBuilder, UploadCoordinator};
pub use credentials::Credentials;
pub use error::{Result, UploadError};
pub use provider::{ObjectStoreProvider, gcs::GcsProvider, s3::S3Provider, storage_key};
pub use registry::ProviderRegistry;
pub use types::{AudioFile, StoredObject, UploadOutcome, UploadRequest};

/// Build the upload coordinator from configuration
///
/// # Errors
///
/// Returns an error if a configured provider cannot be initialized
pub fn build_coordinator(config: &clipscribe_config::Config) -> anyhow::Result<Arc<UploadCoordinator>> {
    let coordinator = Arc::new(
        CoordinatorBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize storage providers: {e}"))?,
    );
    Ok(coordinator)
}
