//! REST surface of the meeting agent.
//!
//! Endpoints:
//!
//! - `GET    /api/health`        — Liveness and version
//! - `POST   /api/transcribe`    — Upload audio, get a transcript back
//! - `POST   /api/analyze`       — Analyze a transcript, get an SSE stream
//! - `GET    /api/meetings`      — List stored meetings
//! - `GET    /api/meetings/{id}` — Fetch one meeting with its artifacts
//! - `DELETE /api/meetings/{id}` — Delete a meeting

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::Json,
    response::sse::{Event as SseEvent, Sse},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReceiverStream;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use meetagent_agent::{AgentEvent, AgentRunner};
use meetagent_core::error::{StorageError, TranscriptionError};
use meetagent_providers::Transcriber;
use meetagent_storage::{Meeting, MeetingStore, MeetingSummary};

// ── State ─────────────────────────────────────────────────────────────────

/// Request body cap, sized for audio uploads. Groq's Whisper endpoint
/// accepts files up to 25 MB.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Shared state for the gateway API.
pub struct AppState {
    pub runner: Arc<AgentRunner>,
    pub store: Arc<MeetingStore>,
    pub transcriber: Arc<dyn Transcriber>,
}

pub type SharedState = Arc<AppState>;

// ── Router ────────────────────────────────────────────────────────────────

/// Build the gateway router with all API routes.
///
/// Layers applied:
/// - Permissive CORS (the web UI may be served from any origin)
/// - Request body size limit sized for audio uploads
/// - HTTP trace logging
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/transcribe", post(transcribe_handler))
        .route("/api/analyze", post(analyze_handler))
        .route("/api/meetings", get(list_meetings_handler))
        .route("/api/meetings/{id}", get(get_meeting_handler))
        .route(
            "/api/meetings/{id}",
            axum::routing::delete(delete_meeting_handler),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

// ── Request / Response types ──────────────────────────────────────────────

#[derive(Deserialize)]
struct AnalyzeRequest {
    transcript: String,
}

#[derive(Serialize, Deserialize)]
struct TranscribeResponse {
    transcript: String,
}

#[derive(Deserialize)]
struct ListMeetingsQuery {
    #[serde(default = "default_limit")]
    limit: i64,
    #[serde(default)]
    offset: i64,
    #[serde(default)]
    search: Option<String>,
}

fn default_limit() -> i64 {
    50
}

#[derive(Serialize, Deserialize)]
struct MeetingListResponse {
    meetings: Vec<MeetingSummary>,
    count: usize,
}

#[derive(Serialize, Deserialize)]
struct DeleteResponse {
    deleted: bool,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn not_found(message: impl Into<String>) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn storage_error(e: StorageError) -> ApiError {
    error!(error = %e, "Storage operation failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Internal storage error".into(),
        }),
    )
}

// ── Health ────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ── Transcription ─────────────────────────────────────────────────────────

/// `POST /api/transcribe` — Accept a multipart audio upload and return
/// the transcript text.
async fn transcribe_handler(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<Json<TranscribeResponse>, ApiError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("Malformed multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let filename = field.file_name().unwrap_or("audio.webm").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| bad_request(format!("Failed to read upload: {e}")))?;
            upload = Some((content_type, filename, data));
            break;
        }
    }

    let Some((content_type, filename, data)) = upload else {
        return Err(bad_request("Missing file field"));
    };

    // Browser recorders label audio inconsistently: MediaRecorder sends
    // video/webm and some clients send octet-stream.
    let looks_like_audio = content_type.starts_with("audio")
        || content_type == "video/webm"
        || content_type == "application/octet-stream";
    if !looks_like_audio {
        return Err(bad_request(
            TranscriptionError::UnsupportedFormat(content_type).to_string(),
        ));
    }

    if data.is_empty() {
        return Err(bad_request(TranscriptionError::EmptyAudio.to_string()));
    }

    info!(bytes = data.len(), filename = %filename, "Transcription requested");

    let transcript = state
        .transcriber
        .transcribe(&data, &filename)
        .await
        .map_err(|e| {
            error!(error = %e, "Transcription failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
        })?;

    Ok(Json(TranscribeResponse { transcript }))
}

// ── Analysis (SSE) ────────────────────────────────────────────────────────

/// `POST /api/analyze` — Run the agent on a transcript and stream its
/// progress events over SSE.
///
/// Each frame is named after the event kind (`thinking`, `tool_call`,
/// `tool_result`, `final`, `error`) with the event JSON as data. A run
/// that ends in `final` is saved to the meeting store before that frame
/// is forwarded, so a client that sees `final` can immediately fetch
/// the meeting.
async fn analyze_handler(
    State(state): State<SharedState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Sse<impl futures::Stream<Item = Result<SseEvent, Infallible>>>, ApiError> {
    if payload.transcript.trim().is_empty() {
        return Err(bad_request("Transcript is empty"));
    }

    info!(chars = payload.transcript.len(), "Analysis requested");

    let transcript = payload.transcript;
    let events = state.runner.run_stream(transcript.clone());
    let rx = persist_on_final(events, state.store.clone(), transcript);

    let stream = ReceiverStream::new(rx).map(|event| {
        let data = serde_json::to_string(&event).unwrap_or_default();
        Ok(SseEvent::default().event(event.event_type()).data(data))
    });

    Ok(Sse::new(stream))
}

/// Relay agent events, saving the run when it completes.
///
/// Tool artifacts are collected in stream order. A `final` event triggers
/// the save; `error` terminals and client disconnects persist nothing.
/// Dropping the returned receiver propagates to the agent run.
fn persist_on_final(
    mut events: mpsc::Receiver<AgentEvent>,
    store: Arc<MeetingStore>,
    transcript: String,
) -> mpsc::Receiver<AgentEvent> {
    let (tx, rx) = mpsc::channel(1);

    tokio::spawn(async move {
        let mut results: Vec<serde_json::Value> = Vec::new();

        while let Some(event) = events.recv().await {
            match &event {
                AgentEvent::ToolResult { result, .. } => results.push(result.clone()),
                AgentEvent::Final { content } => {
                    let title = derive_title(content);
                    match store
                        .save_meeting(&transcript, &results, content, &title)
                        .await
                    {
                        Ok(id) => info!(meeting_id = id, title = %title, "Meeting saved"),
                        Err(e) => error!(error = %e, "Failed to save meeting"),
                    }
                }
                _ => {}
            }

            if tx.send(event).await.is_err() {
                // Client went away; the closed channel cancels the run upstream.
                return;
            }
        }
    });

    rx
}

/// First eight words of the summary, or a placeholder for blank output.
fn derive_title(summary: &str) -> String {
    let words: Vec<&str> = summary.split_whitespace().take(8).collect();
    if words.is_empty() {
        "Untitled Meeting".into()
    } else {
        words.join(" ")
    }
}

// ── Meetings ──────────────────────────────────────────────────────────────

/// `GET /api/meetings` — List stored meetings, newest first.
async fn list_meetings_handler(
    State(state): State<SharedState>,
    Query(query): Query<ListMeetingsQuery>,
) -> Result<Json<MeetingListResponse>, ApiError> {
    let meetings = state
        .store
        .list_meetings(query.limit, query.offset, query.search.as_deref())
        .await
        .map_err(storage_error)?;

    let count = meetings.len();
    Ok(Json(MeetingListResponse { meetings, count }))
}

/// `GET /api/meetings/{id}` — Fetch a full meeting record.
async fn get_meeting_handler(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Meeting>, ApiError> {
    match state.store.get_meeting(id).await.map_err(storage_error)? {
        Some(meeting) => Ok(Json(meeting)),
        None => Err(not_found(format!("Meeting {id} not found"))),
    }
}

/// `DELETE /api/meetings/{id}` — Remove a meeting from the store.
async fn delete_meeting_handler(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if state.store.delete_meeting(id).await.map_err(storage_error)? {
        Ok(Json(DeleteResponse { deleted: true }))
    } else {
        Err(not_found(format!("Meeting {id} not found")))
    }
}
