use axum::{
    Json, Router,
    extract::{
        Multipart, State,
        multipart::MultipartRejection,
        rejection::JsonRejection,
    },
    routing::{get, post},
};
use clipscribe_core::{audio, clock::compact_timestamp};
use clipscribe_pipeline::{DirectTranscription, UploadAndTranscribe, UploadTranscription};
use clipscribe_storage::UploadRequest;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiError, Result},
    form::Form,
    recordings::RecordingInfo,
    state::AppState,
};

const DEFAULT_DURATION_SECS: u32 = 60;
const DEFAULT_PROJECT_NAME: &str = "Untitled project";

/// Routes of the JSON API
pub(crate) fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/start-recording", post(start_recording))
        .route("/api/stop-recording", post(stop_recording))
        .route("/api/save-audio", post(save_audio))
        .route("/api/recordings", get(list_recordings))
        .route("/api/upload-to-cloud", post(upload_to_cloud))
        .route("/api/transcribe", post(transcribe))
        .route("/api/transcribe-direct", post(transcribe_direct))
        .with_state(state)
}

/// Success body: `{"success": true, "message": "...", ...}`
#[derive(Debug, Serialize)]
struct Success<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    #[serde(flatten)]
    body: T,
}

impl<T> Success<T> {
    fn new(message: &'static str, body: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: Some(message),
            body,
        })
    }

    fn bare(body: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: None,
            body,
        })
    }
}

#[derive(Debug, Deserialize)]
struct StartRecording {
    duration: Option<serde_json::Number>,
    project_name: Option<String>,
}

#[derive(Debug, Serialize)]
struct RecordingStarted {
    filename: String,
    duration: serde_json::Number,
    /// Session context the caller hands back to `stop-recording`
    recording: RecordingInfo,
}

async fn start_recording(
    State(state): State<AppState>,
    payload: std::result::Result<Json<StartRecording>, JsonRejection>,
) -> Result<Json<Success<RecordingStarted>>> {
    let Json(request) = payload?;

    let project_name = request.project_name.unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_owned());

    if project_name.trim().is_empty() {
        return Err(ApiError::bad_request("project name is required"));
    }

    let duration = request.duration.unwrap_or_else(|| DEFAULT_DURATION_SECS.into());

    if !duration.as_f64().is_some_and(|secs| secs > 0.0) {
        return Err(ApiError::bad_request("duration must be a positive number"));
    }

    let start_time = compact_timestamp(&state.clock.now());
    let filename = format!("{}_{start_time}.wav", project_name.replace(['/', '\\'], "_"));

    tracing::info!(%project_name, %duration, %filename, "recording started");

    let recording = RecordingInfo {
        filename: filename.clone(),
        duration: duration.clone(),
        project_name,
        start_time,
        created_at: None,
    };

    Ok(Success::new(
        "recording started",
        RecordingStarted {
            filename,
            duration,
            recording,
        },
    ))
}

#[derive(Debug, Serialize)]
struct RecordingStopped {
    filename: String,
}

async fn stop_recording(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RecordingInfo>, JsonRejection>,
) -> Result<Json<Success<RecordingStopped>>> {
    let Json(info) = payload?;

    if info.filename.trim().is_empty() {
        return Err(ApiError::bad_request("no active recording"));
    }

    let info = state.recordings.append(info).await.map_err(ApiError::RecordingLog)?;

    Ok(Success::new(
        "recording stopped and saved",
        RecordingStopped { filename: info.filename },
    ))
}

#[derive(Debug, Serialize)]
struct AudioSaved {
    filepath: String,
}

async fn save_audio(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<Success<AudioSaved>>> {
    let mut form = Form::read(multipart?).await?;

    let audio = form
        .take_file("audio")
        .ok_or_else(|| ApiError::bad_request("no audio file received"))?;

    let filename = form
        .take_text("filename")
        .ok_or_else(|| ApiError::bad_request("recording filename not provided"))?;

    if !audio::is_bare_filename(&filename) {
        return Err(ApiError::bad_request(format!("invalid filename '{filename}'")));
    }

    let path = state.pipeline.uploads_dir().join(&filename);

    tokio::fs::write(&path, &audio.bytes).await.map_err(ApiError::SaveAudio)?;

    tracing::debug!("Saved {} bytes of audio to {}", audio.bytes.len(), path.display());

    Ok(Success::new(
        "audio saved",
        AudioSaved {
            filepath: path.display().to_string(),
        },
    ))
}

#[derive(Debug, Serialize)]
struct Recordings {
    recordings: Vec<RecordingInfo>,
}

async fn list_recordings(State(state): State<AppState>) -> Json<Success<Recordings>> {
    Success::bare(Recordings {
        recordings: state.recordings.list().await,
    })
}

#[derive(Debug, Serialize)]
struct Uploaded {
    url: String,
    filename: String,
}

async fn upload_to_cloud(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<Success<Uploaded>>> {
    let mut form = Form::read(multipart?).await?;

    let request = UploadRequest {
        audio: form.take_file("file"),
        provider: form.take_text("provider"),
        credentials: form.take_text("credentials"),
    };

    let outcome = state.pipeline.coordinator().upload(request).await?;

    tracing::info!(url = %outcome.url, "file uploaded");

    Ok(Success::new(
        "file uploaded",
        Uploaded {
            url: outcome.url,
            filename: outcome.filename,
        },
    ))
}

#[derive(Debug, Deserialize)]
struct TranscribeRequest {
    filename: Option<String>,
    aws_credentials: Option<serde_json::Value>,
    openai_api_key: Option<String>,
    provider: Option<String>,
}

async fn transcribe(
    State(state): State<AppState>,
    payload: std::result::Result<Json<TranscribeRequest>, JsonRejection>,
) -> Result<Json<Success<UploadTranscription>>> {
    let Json(request) = payload?;

    let result = state
        .pipeline
        .upload_and_transcribe(UploadAndTranscribe {
            filename: request.filename,
            credentials: request.aws_credentials,
            api_key: request.openai_api_key.map(SecretString::from),
            provider: request.provider,
        })
        .await?;

    tracing::info!(transcript_file = %result.transcript_file, "transcription completed");

    Ok(Success::new("transcription completed", result))
}

async fn transcribe_direct(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<Success<DirectTranscription>>> {
    let mut form = Form::read(multipart?).await?;

    let result = state.pipeline.transcribe_direct(form.take_file("audio")).await?;

    tracing::info!(transcript_file = %result.transcript_file, "transcription completed");

    Ok(Success::new("transcription completed", result))
}
