//! Mock transcription API for integration tests
//!
//! Implements `POST /v1/audio/transcriptions` with `response_format=text`

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use axum::{Router, routing};
use tokio_util::sync::CancellationToken;

/// Key the mock accepts
pub const VALID_KEY: &str = "sk-test";

/// Transcript returned for every accepted request
pub const TRANSCRIPT: &str = "hello world\n";

/// Mock transcription backend that returns a fixed transcript
pub struct MockOpenAi {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

#[derive(Default)]
struct MockState {
    request_count: AtomicU32,
}

impl MockOpenAi {
    /// Start the mock server, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        let state = Arc::new(MockState::default());

        let app = Router::new()
            .route("/v1/audio/transcriptions", routing::post(handle_transcription))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the transcription client
    ///
    /// Includes `/v1` since the client appends `/audio/transcriptions`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Number of transcription requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }
}

impl Drop for MockOpenAi {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_transcription(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> (StatusCode, String) {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {VALID_KEY}"));

    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            "Incorrect API key provided".to_owned(),
        );
    }

    let mut has_audio = false;
    let mut format = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().map(str::to_owned);

        match name.as_deref() {
            Some("file") => has_audio = field.bytes().await.is_ok_and(|b| !b.is_empty()),
            Some("response_format") => format = field.text().await.ok(),
            _ => {}
        }
    }

    if !has_audio || format.as_deref() != Some("text") {
        return (StatusCode::BAD_REQUEST, "expected an audio file and response_format=text".to_owned());
    }

    (StatusCode::OK, TRANSCRIPT.to_owned())
}
