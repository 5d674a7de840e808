use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Deserialize;
use url::Url;

/// Local directories and object-store providers
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Directory holding saved recordings, transcripts and the recording log
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: PathBuf,
    /// Directory for temporary files, the OS temp dir when unset
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,
    /// Object-store providers keyed by the name clients select them with
    #[serde(default = "default_providers")]
    pub providers: IndexMap<String, StorageProviderConfig>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            uploads_dir: default_uploads_dir(),
            scratch_dir: None,
            providers: default_providers(),
        }
    }
}

/// Configuration for a single object-store provider
///
/// Credentials are not configured here; clients send them per request.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageProviderConfig {
    /// Provider type
    #[serde(rename = "type")]
    pub provider_type: StorageProviderType,
    /// Endpoint override for S3-compatible servers
    #[serde(default)]
    pub endpoint: Option<Url>,
}

/// Supported object-store providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageProviderType {
    /// Amazon S3
    S3,
    /// Google Cloud Storage
    Gcs,
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_providers() -> IndexMap<String, StorageProviderConfig> {
    IndexMap::from([
        (
            "aws-s3".to_owned(),
            StorageProviderConfig {
                provider_type: StorageProviderType::S3,
                endpoint: None,
            },
        ),
        (
            "google-cloud".to_owned(),
            StorageProviderConfig {
                provider_type: StorageProviderType::Gcs,
                endpoint: None,
            },
        ),
    ])
}
