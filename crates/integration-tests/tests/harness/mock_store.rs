//! Mock S3-compatible object store for integration tests
//!
//! Accepts path-style `PUT /{bucket}/{key}` and serves the stored bytes back
//! on `GET`. The bucket named `forbidden` rejects every write.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Router, routing};
use tokio_util::sync::CancellationToken;

/// Bucket that answers every write with `403 AccessDenied`
pub const FORBIDDEN_BUCKET: &str = "forbidden";

/// Object written to the mock store
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

type Objects = Arc<Mutex<HashMap<String, StoredObject>>>;

/// Mock S3 endpoint
pub struct MockStore {
    addr: SocketAddr,
    shutdown: CancellationToken,
    objects: Objects,
}

impl MockStore {
    /// Start the mock server, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        let objects = Objects::default();

        let app = Router::new()
            .route("/{bucket}/{*key}", routing::put(handle_put).get(handle_get))
            .with_state(Arc::clone(&objects));

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

        Ok(Self {
            addr,
            shutdown,
            objects,
        })
    }

    /// Endpoint to configure the S3 provider with
    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Object stored under `bucket/key`, if any
    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(&format!("{bucket}/{key}")).cloned()
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

impl Drop for MockStore {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_put(
    State(objects): State<Objects>,
    Path((bucket, key)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if bucket == FORBIDDEN_BUCKET {
        let error = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
            <Error><Code>AccessDenied</Code><Message>Access Denied</Message></Error>";
        return (StatusCode::FORBIDDEN, [(header::CONTENT_TYPE, "application/xml")], error).into_response();
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    objects.lock().unwrap().insert(
        format!("{bucket}/{key}"),
        StoredObject {
            bytes: body,
            content_type,
        },
    );

    (StatusCode::OK, [(header::ETAG, "\"mock-etag\"")]).into_response()
}

async fn handle_get(State(objects): State<Objects>, Path((bucket, key)): Path<(String, String)>) -> Response {
    let object = objects.lock().unwrap().get(&format!("{bucket}/{key}")).cloned();

    match object {
        Some(object) => {
            let content_type = object
                .content_type
                .unwrap_or_else(|| "application/octet-stream".to_owned());
            ([(header::CONTENT_TYPE, content_type)], object.bytes).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
