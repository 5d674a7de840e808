#![allow(clippy::must_use_candidate)]

mod env;
pub mod health;
mod loader;
pub mod server;
pub mod storage;
pub mod telemetry;
pub mod transcription;

use serde::Deserialize;

pub use health::*;
pub use server::*;
pub use storage::*;
pub use telemetry::*;
pub use transcription::*;

/// Top-level clipscribe configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Local directories and object-store providers
    #[serde(default)]
    pub storage: StorageConfig,
    /// Speech-to-text API configuration
    #[serde(default)]
    pub transcription: TranscriptionConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
