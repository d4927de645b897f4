//! HTTP API gateway for the Meeting Agent.
//!
//! Exposes REST endpoints for audio transcription, transcript analysis
//! (streamed as SSE progress events), meeting history, and health checks.
//!
//! Built on Axum for high performance async HTTP.

pub mod api;

pub use api::{AppState, SharedState, build_router};

use std::sync::Arc;

use tracing::{info, warn};

use meetagent_agent::AgentRunner;
use meetagent_core::provider::Provider;
use meetagent_providers::{Transcriber, WhisperTranscriber};
use meetagent_storage::MeetingStore;

/// Start the gateway HTTP server.
///
/// Builds the store, provider, tool registry, and transcriber once and
/// shares them via `Arc` across all request handlers. A failing provider
/// health check is logged but does not block startup; analysis requests
/// will surface the error as a terminal event instead.
pub async fn start(config: meetagent_config::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let host = config.gateway.host.clone();
    let port = config.gateway.port;
    let addr = format!("{host}:{port}");

    let store = Arc::new(MeetingStore::open(&config.storage.db_path).await?);

    let provider: Arc<dyn Provider> = Arc::new(meetagent_providers::from_config(&config));
    let model = meetagent_providers::model_from_config(&config);
    match provider.health_check().await {
        Ok(true) => info!(provider = provider.name(), model = %model, "Provider is reachable"),
        Ok(false) => {
            warn!(provider = provider.name(), "Provider health check failed, continuing anyway")
        }
        Err(e) => {
            warn!(provider = provider.name(), error = %e, "Provider health check failed, continuing anyway")
        }
    }

    let tools = Arc::new(meetagent_tools::default_registry());
    for name in tools.names() {
        info!(tool = name, "Registered tool");
    }
    info!(count = tools.len(), "Tool registry ready");

    let runner = Arc::new(AgentRunner::new(provider, model, tools));

    let whisper = WhisperTranscriber::from_config(&config.transcription);
    if whisper.is_configured() {
        info!(model = %config.transcription.model, "Transcription ready");
    } else {
        warn!("No transcription API key set; audio uploads will fail");
    }
    let transcriber: Arc<dyn Transcriber> = Arc::new(whisper);

    let state = Arc::new(AppState {
        runner,
        store,
        transcriber,
    });
    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
