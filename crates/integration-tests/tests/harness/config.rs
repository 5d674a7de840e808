//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;
use std::path::Path;

use clipscribe_config::{
    Config, HealthConfig, ServerConfig, StorageConfig, StorageProviderConfig, StorageProviderType,
    TranscriptionConfig,
};
use secrecy::SecretString;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder writing into `uploads_dir` and staging temp
    /// files in `scratch_dir`
    pub fn new(uploads_dir: &Path, scratch_dir: &Path) -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                storage: StorageConfig {
                    uploads_dir: uploads_dir.to_path_buf(),
                    scratch_dir: Some(scratch_dir.to_path_buf()),
                    ..StorageConfig::default()
                },
                transcription: TranscriptionConfig::default(),
                telemetry: Default::default(),
            },
        }
    }

    /// Point the `aws-s3` provider at a mock S3 endpoint
    pub fn with_s3_endpoint(mut self, endpoint: &str) -> Self {
        self.config.storage.providers.insert(
            "aws-s3".to_owned(),
            StorageProviderConfig {
                provider_type: StorageProviderType::S3,
                endpoint: Some(endpoint.parse().expect("valid URL")),
            },
        );
        self
    }

    /// Send transcription requests to a mock API
    pub fn with_transcription_url(mut self, base_url: &str) -> Self {
        self.config.transcription.base_url = Some(base_url.to_owned());
        self
    }

    /// Configure the default transcription API key
    pub fn with_api_key(mut self, key: &str) -> Self {
        self.config.transcription.api_key = Some(SecretString::from(key));
        self
    }

    /// Limit request bodies
    pub fn with_max_upload_bytes(mut self, limit: usize) -> Self {
        self.config.server.max_upload_bytes = limit;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
