use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use secrecy::ExposeSecret;
use url::Url;

use crate::{credentials::Credentials, error::UploadError, types::StoredObject};

use super::{ObjectStoreProvider, put_object, storage_key};

/// Amazon S3 provider
///
/// Expects `accessKey`, `secretKey`, `region` and `bucket` credentials.
pub struct S3Provider {
    name: String,
    /// S3-compatible endpoint; path-style addressing when set
    endpoint: Option<Url>,
}

impl S3Provider {
    pub fn new(name: String, endpoint: Option<Url>) -> Self {
        Self { name, endpoint }
    }

    /// Public URL of `key` in `bucket`
    fn object_url(&self, bucket: &str, region: &str, key: &str) -> String {
        match &self.endpoint {
            Some(endpoint) => format!("{}/{bucket}/{key}", endpoint.as_str().trim_end_matches('/')),
            None => format!("https://{bucket}.s3.{region}.amazonaws.com/{key}"),
        }
    }
}

#[async_trait]
impl ObjectStoreProvider for S3Provider {
    async fn upload(
        &self,
        audio: Bytes,
        filename: &str,
        content_type: &str,
        credentials: &Credentials,
    ) -> crate::error::Result<StoredObject> {
        let access_key = credentials.require("accessKey")?;
        let secret_key = credentials.require_secret("secretKey")?;
        let region = credentials.require("region")?;
        let bucket = credentials.require("bucket")?;

        let key = storage_key(filename);

        let mut builder = AmazonS3Builder::new()
            .with_access_key_id(access_key)
            .with_secret_access_key(secret_key.expose_secret())
            .with_region(region)
            .with_bucket_name(bucket);

        if let Some(endpoint) = &self.endpoint {
            builder = builder
                .with_endpoint(endpoint.as_str().trim_end_matches('/'))
                .with_allow_http(endpoint.scheme() == "http")
                .with_virtual_hosted_style_request(false);
        }

        let store = builder.build().map_err(|e| {
            tracing::error!("S3 client construction failed: {e}");
            UploadError::provider(&self.name, e)
        })?;

        tracing::debug!(
            "S3 upload request: {} bytes, bucket={bucket}, key={key}",
            audio.len()
        );

        put_object(&store, &key, audio, content_type).await.map_err(|e| {
            tracing::error!("S3 upload failed: {e}");
            UploadError::provider(&self.name, e)
        })?;

        tracing::debug!("S3 upload complete");

        Ok(StoredObject {
            url: self.object_url(bucket, region, &key),
            storage_key: key,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
