use std::net::SocketAddr;

use serde::Deserialize;

use crate::health::HealthConfig;

/// Default request body limit (16 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 << 20;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub listen_address: Option<SocketAddr>,
    /// Largest accepted request body, multipart uploads included
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    #[serde(default)]
    pub health: HealthConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            health: HealthConfig::default(),
        }
    }
}

const fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}
