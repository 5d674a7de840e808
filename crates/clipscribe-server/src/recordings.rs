use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use clipscribe_core::Clock;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

const LOG_FILE: &str = "recordings.json";

/// Metadata of one recording session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingInfo {
    pub filename: String,
    /// Planned length in seconds
    pub duration: serde_json::Number,
    pub project_name: String,
    /// `YYYYMMDD_HHMMSS` the session started at
    pub start_time: String,
    /// Set when the recording is appended to the log
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Append-only JSON log of completed recordings
///
/// The whole array is rewritten on every append; appends and reads are
/// serialised so a reader never sees a half-written file.
pub struct RecordingLog {
    path: PathBuf,
    clock: Arc<dyn Clock>,
    lock: Mutex<()>,
}

impl RecordingLog {
    pub fn new(uploads_dir: &Path, clock: Arc<dyn Clock>) -> Self {
        Self {
            path: uploads_dir.join(LOG_FILE),
            clock,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stamp `info` with `created_at` and append it
    pub async fn append(&self, mut info: RecordingInfo) -> io::Result<RecordingInfo> {
        let _guard = self.lock.lock().await;

        info.created_at = Some(self.clock.now().strftime("%Y-%m-%dT%H:%M:%S%:z").to_string());

        let mut recordings = self.read().await;
        recordings.push(info.clone());

        let json = serde_json::to_vec_pretty(&recordings).map_err(io::Error::other)?;
        tokio::fs::write(&self.path, json).await?;

        tracing::debug!("Recording {} added to {}", info.filename, self.path.display());

        Ok(info)
    }

    /// All logged recordings, oldest first
    ///
    /// A missing log is empty. An unreadable or corrupt one is reported and
    /// treated as empty.
    pub async fn list(&self) -> Vec<RecordingInfo> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    async fn read(&self) -> Vec<RecordingInfo> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!("failed to read {}: {e}", self.path.display());
                return Vec::new();
            }
        };

        serde_json::from_slice(&raw).unwrap_or_else(|e| {
            tracing::warn!("ignoring corrupt recordings log {}: {e}", self.path.display());
            Vec::new()
        })
    }
}
