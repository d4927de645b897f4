//! Audio transcription via OpenAI-compatible Whisper endpoints.
//!
//! Default is Groq's hosted Whisper API; any `/audio/transcriptions`
//! endpoint that accepts multipart uploads will work.

use async_trait::async_trait;
use meetagent_config::TranscriptionConfig;
use meetagent_core::error::TranscriptionError;
use tracing::{debug, error};

/// Trait for speech-to-text backends.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe raw audio bytes into text.
    async fn transcribe(
        &self,
        audio: &[u8],
        filename: &str,
    ) -> std::result::Result<String, TranscriptionError>;
}

/// Whisper transcription over HTTP.
pub struct WhisperTranscriber {
    api_url: String,
    api_key: Option<String>,
    model: String,
    client: reqwest::Client,
}

impl WhisperTranscriber {
    /// Create a new transcriber for an OpenAI-compatible endpoint.
    pub fn new(
        api_url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_url: api_url.into(),
            api_key,
            model: model.into(),
            client,
        }
    }

    /// Build a transcriber from the app configuration.
    pub fn from_config(config: &TranscriptionConfig) -> Self {
        Self::new(&config.api_url, config.api_key.clone(), &config.model)
    }

    /// Check if the transcriber has an API key.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe(
        &self,
        audio: &[u8],
        filename: &str,
    ) -> std::result::Result<String, TranscriptionError> {
        let Some(api_key) = &self.api_key else {
            return Err(TranscriptionError::NotConfigured(
                "set GROQ_API_KEY or transcription.api_key".into(),
            ));
        };

        if audio.is_empty() {
            return Err(TranscriptionError::EmptyAudio);
        }

        debug!(bytes = audio.len(), model = %self.model, "Transcribing audio");

        let file_part = reqwest::multipart::Part::bytes(audio.to_vec())
            .file_name(filename.to_string())
            .mime_str("application/octet-stream")
            .map_err(|e| TranscriptionError::Backend(e.to_string()))?;

        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("model", self.model.clone());

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::Backend(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Transcription API error");
            return Err(TranscriptionError::Backend(format!(
                "transcription API returned {status}: {body}"
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranscriptionError::Backend(e.to_string()))?;

        let text = json["text"].as_str().unwrap_or_default().to_string();
        debug!(chars = text.len(), "Transcription complete");
        Ok(text)
    }
}
