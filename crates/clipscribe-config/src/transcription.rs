use secrecy::SecretString;
use serde::Deserialize;

/// Speech-to-text API configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranscriptionConfig {
    /// Default API key used by direct transcription
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<String>,
    /// Transcription model identifier
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: default_model(),
        }
    }
}

fn default_model() -> String {
    "whisper-1".to_string()
}
