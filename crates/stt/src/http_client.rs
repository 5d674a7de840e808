use std::{sync::OnceLock, time::Duration};

use reqwest::Client;

const USER_AGENT: &str = concat!("clipscribe/", env!("CARGO_PKG_VERSION"));

/// Shared client for audio downloads and transcription calls
///
/// Transcribing a long recording can take a while, hence the generous
/// request timeout.
pub fn http_client() -> Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();

    CLIENT
        .get_or_init(|| {
            Client::builder()
                .user_agent(USER_AGENT)
                .timeout(Duration::from_secs(120))
                .connect_timeout(Duration::from_secs(10))
                .pool_idle_timeout(Some(Duration::from_secs(30)))
                .tcp_keepalive(Some(Duration::from_secs(60)))
                .build()
                .expect("Failed to build default HTTP client")
        })
        .clone()
}
