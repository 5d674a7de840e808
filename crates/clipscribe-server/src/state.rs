use std::sync::Arc;

use clipscribe_core::Clock;
use clipscribe_pipeline::TranscriptionPipeline;

use crate::recordings::RecordingLog;

/// Shared state of the API handlers
#[derive(Clone)]
pub(crate) struct AppState {
    pub pipeline: Arc<TranscriptionPipeline>,
    pub recordings: Arc<RecordingLog>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub(crate) fn new(pipeline: Arc<TranscriptionPipeline>, clock: Arc<dyn Clock>) -> Self {
        let recordings = Arc::new(RecordingLog::new(pipeline.uploads_dir(), Arc::clone(&clock)));

        Self {
            pipeline,
            recordings,
            clock,
        }
    }
}
