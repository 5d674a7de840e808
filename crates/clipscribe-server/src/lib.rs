//! HTTP layer for clipscribe
//!
//! Recording bookkeeping, cloud upload and transcription endpoints on top of
//! the transcription pipeline, plus static serving of the uploads directory.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod api;
mod error;
mod form;
mod health;
pub mod recordings;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit};
use clipscribe_config::Config;
use clipscribe_core::{Clock, SystemClock};
use clipscribe_pipeline::TranscriptionPipeline;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub use recordings::{RecordingInfo, RecordingLog};

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the pipeline or one of its collaborators fails to
    /// initialize
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let pipeline = clipscribe_pipeline::build_pipeline(config)?;

        Ok(Self::with_pipeline(config, pipeline, Arc::new(SystemClock)))
    }

    /// Build the server around an existing pipeline
    pub fn with_pipeline(config: &Config, pipeline: Arc<TranscriptionPipeline>, clock: Arc<dyn Clock>) -> Self {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 5000)));

        let uploads_dir = pipeline.uploads_dir().to_path_buf();

        let mut app = Router::new();

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        // API routes
        app = app.merge(api::api_router(state::AppState::new(pipeline, clock)));

        // Saved recordings and transcripts
        app = app.nest_service("/uploads", ServeDir::new(uploads_dir));

        // Apply middleware layers (innermost first)
        app = app.layer(DefaultBodyLimit::max(config.server.max_upload_bytes));
        app = app.layer(TraceLayer::new_for_http());

        Self {
            router: app,
            listen_address,
        }
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
