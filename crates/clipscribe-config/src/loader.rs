use std::path::Path;

use crate::{Config, StorageProviderType};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if no storage provider is configured or a section
    /// holds an unusable value
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_server_config()?;
        self.validate_storage_config()?;
        self.validate_transcription_config()?;
        Ok(())
    }

    fn validate_server_config(&self) -> anyhow::Result<()> {
        if self.server.max_upload_bytes == 0 {
            anyhow::bail!("server.max_upload_bytes must be greater than 0");
        }

        if !self.server.health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }

        Ok(())
    }

    fn validate_storage_config(&self) -> anyhow::Result<()> {
        if self.storage.providers.is_empty() {
            anyhow::bail!("at least one storage provider must be configured");
        }

        for (name, provider) in &self.storage.providers {
            if name.trim().is_empty() {
                anyhow::bail!("storage provider names must not be blank");
            }

            if provider.endpoint.is_some() && provider.provider_type != StorageProviderType::S3 {
                anyhow::bail!("storage provider '{name}': endpoint overrides are only supported for s3");
            }
        }

        Ok(())
    }

    fn validate_transcription_config(&self) -> anyhow::Result<()> {
        if self.transcription.model.trim().is_empty() {
            anyhow::bail!("transcription.model must not be empty");
        }

        if let Some(ref base_url) = self.transcription.base_url {
            url::Url::parse(base_url)
                .map_err(|e| anyhow::anyhow!("invalid transcription.base_url '{base_url}': {e}"))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use secrecy::ExposeSecret;

    use crate::{Config, LogFormat, StorageProviderType};

    const FULL: &str = r#"
[server]
listen_address = "127.0.0.1:5000"
max_upload_bytes = 1048576

[server.health]
path = "/healthz"

[storage]
uploads_dir = "/var/lib/clipscribe"
scratch_dir = "/var/tmp"

[storage.providers.minio]
type = "s3"
endpoint = "http://localhost:9000"

[storage.providers.google-cloud]
type = "gcs"

[transcription]
api_key = "{{ env.CLIPSCRIBE_LOADER_KEY | default("") }}"
model = "whisper-1"

[telemetry]
log_filter = "clipscribe=debug"
log_format = "json"
"#;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();

        assert_eq!(config.server.listen_address, None);
        assert_eq!(config.server.max_upload_bytes, 16 * 1024 * 1024);
        assert!(config.server.health.enabled);
        assert_eq!(config.server.health.path, "/health");
        assert_eq!(config.storage.uploads_dir, PathBuf::from("uploads"));
        assert!(config.storage.scratch_dir.is_none());
        assert_eq!(
            config.storage.providers.keys().collect::<Vec<_>>(),
            ["aws-s3", "google-cloud"]
        );
        assert!(config.transcription.api_key.is_none());
        assert_eq!(config.transcription.model, "whisper-1");
        assert_eq!(config.telemetry.log_format, LogFormat::Text);
    }

    #[test]
    fn full_file() {
        temp_env::with_var("CLIPSCRIBE_LOADER_KEY", Some("sk-from-env"), || {
            let config = Config::parse(FULL).unwrap();

            assert_eq!(config.server.listen_address, Some("127.0.0.1:5000".parse().unwrap()));
            assert_eq!(config.server.max_upload_bytes, 1_048_576);
            assert_eq!(config.server.health.path, "/healthz");
            assert_eq!(config.storage.scratch_dir, Some(PathBuf::from("/var/tmp")));

            let minio = &config.storage.providers["minio"];
            assert_eq!(minio.provider_type, StorageProviderType::S3);
            assert_eq!(minio.endpoint.as_ref().map(url::Url::as_str), Some("http://localhost:9000/"));
            assert_eq!(config.storage.providers.len(), 2);

            let key = config.transcription.api_key.as_ref().unwrap();
            assert_eq!(key.expose_secret(), "sk-from-env");
            assert_eq!(config.telemetry.log_format, LogFormat::Json);
        });
    }

    #[test]
    fn unset_key_falls_back_to_empty_default() {
        temp_env::with_var_unset("CLIPSCRIBE_LOADER_KEY", || {
            let config = Config::parse(FULL).unwrap();
            let key = config.transcription.api_key.as_ref().unwrap();
            assert_eq!(key.expose_secret(), "");
        });
    }

    #[test]
    fn sample_config_parses() {
        temp_env::with_var_unset("OPENAI_API_KEY", || {
            let config = Config::parse(include_str!("../../../clipscribe.toml")).unwrap();

            assert_eq!(config.server.listen_address, Some("0.0.0.0:5000".parse().unwrap()));
            assert_eq!(
                config.storage.providers.keys().collect::<Vec<_>>(),
                ["aws-s3", "google-cloud"]
            );
        });
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clipscribe.toml");
        std::fs::write(&path, "[transcription]\nmodel = \"whisper-large\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.transcription.model, "whisper-large");
    }

    #[test]
    fn load_missing_file() {
        let err = Config::load(std::path::Path::new("/nonexistent/clipscribe.toml")).unwrap_err();
        assert!(err.to_string().starts_with("failed to read config file /nonexistent/clipscribe.toml"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = Config::parse("[storage]\nbucket = \"audio\"\n").unwrap_err();
        assert!(err.to_string().contains("unknown field `bucket`"));
    }

    #[test]
    fn unknown_provider_type_is_rejected() {
        let err = Config::parse("[storage.providers.azure]\ntype = \"azure\"\n").unwrap_err();
        assert!(err.to_string().contains("unknown variant `azure`"));
    }

    #[test]
    fn empty_provider_table_is_rejected() {
        let err = Config::parse("[storage.providers]\n").unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"at least one storage provider must be configured");
    }

    #[test]
    fn endpoint_only_for_s3() {
        let raw = "[storage.providers.gcs]\ntype = \"gcs\"\nendpoint = \"http://localhost:4443\"\n";
        let err = Config::parse(raw).unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"storage provider 'gcs': endpoint overrides are only supported for s3");
    }

    #[test]
    fn blank_model_is_rejected() {
        let err = Config::parse("[transcription]\nmodel = \" \"\n").unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"transcription.model must not be empty");
    }

    #[test]
    fn zero_body_limit_is_rejected() {
        let err = Config::parse("[server]\nmax_upload_bytes = 0\n").unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"server.max_upload_bytes must be greater than 0");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = Config::parse("[transcription]\nbase_url = \"not a url\"\n").unwrap_err();
        assert!(err.to_string().starts_with("invalid transcription.base_url 'not a url'"));
    }
}
