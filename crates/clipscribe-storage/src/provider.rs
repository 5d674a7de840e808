pub mod gcs;
pub mod s3;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload, path::Path as ObjectPath};

use crate::{credentials::Credentials, types::StoredObject};

/// Trait for object-store provider implementations
///
/// Implementations convert every client or transport error into
/// [`crate::UploadError`]; nothing provider-specific escapes `upload`.
#[async_trait]
pub trait ObjectStoreProvider: Send + Sync {
    /// Store `audio` under [`storage_key`]`(filename)` and return its URL
    async fn upload(
        &self,
        audio: Bytes,
        filename: &str,
        content_type: &str,
        credentials: &Credentials,
    ) -> crate::error::Result<StoredObject>;

    /// Get the provider name
    fn name(&self) -> &str;
}

/// Key an uploaded recording is stored under
pub fn storage_key(filename: &str) -> String {
    format!("audio/{filename}")
}

/// Write one object with its content type
pub(crate) async fn put_object(
    store: &dyn ObjectStore,
    key: &str,
    audio: Bytes,
    content_type: &str,
) -> object_store::Result<()> {
    let mut attributes = Attributes::new();
    attributes.insert(Attribute::ContentType, content_type.to_owned().into());

    let options = PutOptions {
        attributes,
        ..PutOptions::default()
    };

    store
        .put_opts(&ObjectPath::from(key), PutPayload::from(audio), options)
        .await?;

    Ok(())
}
