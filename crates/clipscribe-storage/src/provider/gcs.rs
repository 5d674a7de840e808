use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use clipscribe_core::TempResource;
use object_store::gcp::GoogleCloudStorageBuilder;
use secrecy::ExposeSecret;

use crate::{credentials::Credentials, error::UploadError, types::StoredObject};

use super::{ObjectStoreProvider, put_object, storage_key};

const STORAGE_HOST: &str = "https://storage.googleapis.com";

/// Google Cloud Storage provider
///
/// Expects `credentials` (service-account key JSON) and `bucket`. The client
/// builder only reads keys from a path, so the key is staged in a temp file
/// for the duration of the upload.
pub struct GcsProvider {
    name: String,
    scratch_dir: PathBuf,
}

impl GcsProvider {
    pub fn new(name: String, scratch_dir: PathBuf) -> Self {
        Self { name, scratch_dir }
    }

    async fn put(
        &self,
        key_file: &Path,
        bucket: &str,
        key: &str,
        audio: Bytes,
        content_type: &str,
    ) -> crate::error::Result<()> {
        let store = GoogleCloudStorageBuilder::new()
            .with_service_account_path(key_file.to_string_lossy())
            .with_bucket_name(bucket)
            .build()
            .map_err(|e| {
                tracing::error!("GCS client construction failed: {e}");
                UploadError::provider(&self.name, e)
            })?;

        put_object(&store, key, audio, content_type).await.map_err(|e| {
            tracing::error!("GCS upload failed: {e}");
            UploadError::provider(&self.name, e)
        })
    }
}

#[async_trait]
impl ObjectStoreProvider for GcsProvider {
    async fn upload(
        &self,
        audio: Bytes,
        filename: &str,
        content_type: &str,
        credentials: &Credentials,
    ) -> crate::error::Result<StoredObject> {
        let service_account = credentials.require_blob("credentials")?;
        let bucket = credentials.require("bucket")?;

        let key = storage_key(filename);

        tracing::debug!(
            "GCS upload request: {} bytes, bucket={bucket}, key={key}",
            audio.len()
        );

        let key_file = TempResource::acquire(&self.scratch_dir, service_account.expose_secret().as_bytes(), ".json").await?;

        let result = self.put(&key_file, bucket, &key, audio, content_type).await;

        if let Err(e) = key_file.release() {
            tracing::warn!("failed to remove staged GCS credentials: {e}");
        }

        result?;

        tracing::debug!("GCS upload complete");

        Ok(StoredObject {
            url: format!("{STORAGE_HOST}/{bucket}/{key}"),
            storage_key: key,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test]
    async fn missing_fields_fail_without_staging_credentials() {
        let scratch = tempfile::tempdir().unwrap();
        let provider = GcsProvider::new("google-cloud".to_owned(), scratch.path().to_path_buf());

        for (raw, field) in [(r#"{"bucket":"b"}"#, "credentials"), (r#"{"credentials":"{}"}"#, "bucket")] {
            let credentials = Credentials::parse(raw).unwrap();
            let err = provider
                .upload(Bytes::from_static(b"RIFF"), "clip.wav", "audio/wav", &credentials)
                .await
                .unwrap_err();

            assert!(matches!(err, UploadError::MissingCredential(f) if f == field));
        }

        assert_eq!(entries(scratch.path()), 0);
    }

    #[tokio::test]
    async fn unusable_key_is_a_provider_error_and_key_file_is_removed() {
        let scratch = tempfile::tempdir().unwrap();
        let provider = GcsProvider::new("google-cloud".to_owned(), scratch.path().to_path_buf());
        let credentials = Credentials::parse(r#"{"credentials":"not a key","bucket":"recordings"}"#).unwrap();

        let err = provider
            .upload(Bytes::from_static(b"RIFF"), "clip.wav", "audio/wav", &credentials)
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::Provider { ref provider, .. } if provider == "google-cloud"));
        assert!(err.to_string().starts_with("google-cloud upload failed: "));
        assert_eq!(entries(scratch.path()), 0);
    }
}
