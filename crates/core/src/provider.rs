//! Provider trait, the abstraction over LLM backends.
//!
//! A Provider knows how to send a conversation to an LLM and get a complete
//! response back, including any tool calls the model decided to make.
//!
//! Implementations: OpenAI-compatible endpoints (OpenRouter, OpenAI, Ollama).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::ProviderError;
use crate::message::Message;

/// Configuration for a provider request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// The model to use (e.g., "openai/gpt-4o-mini")
    pub model: String,

    /// The conversation messages
    pub messages: Vec<Message>,

    /// Available tools the model can call
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,

    /// Tool selection mode; the model decides which tools to call
    #[serde(default = "default_tool_choice")]
    pub tool_choice: String,
}

fn default_tool_choice() -> String {
    "auto".to_string()
}

impl ProviderRequest {
    /// Build a request with the default tool choice.
    pub fn new(model: impl Into<String>, messages: Vec<Message>, tools: Vec<ToolDefinition>) -> Self {
        Self {
            model: model.into(),
            messages,
            tools,
            tool_choice: default_tool_choice(),
        }
    }
}

/// A tool definition sent to the LLM so it knows what tools it can call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// The tool name
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON Schema describing the tool's parameters
    pub parameters: serde_json::Value,
}

/// A complete response from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// The generated message
    pub message: Message,

    /// Token usage statistics
    pub usage: Option<Usage>,

    /// Which model actually responded (may differ from requested)
    pub model: String,
}

/// Token usage information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The core Provider trait.
///
/// Every LLM backend implements this trait. The agent loop calls
/// `complete()` without knowing which provider is being used.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "openrouter").
    fn name(&self) -> &str;

    /// Send a request and get a complete response.
    async fn complete(&self, request: ProviderRequest) -> std::result::Result<ProviderResponse, ProviderError>;

    /// List available models for this provider.
    async fn list_models(&self) -> std::result::Result<Vec<String>, ProviderError> {
        Ok(Vec::new())
    }

    /// Health check: can we reach the provider?
    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_request_defaults() {
        let req = ProviderRequest::new("openai/gpt-4o-mini", vec![], vec![]);
        assert_eq!(req.tool_choice, "auto");
        assert!(req.tools.is_empty());
    }

    #[test]
    fn tool_choice_defaults_on_deserialize() {
        let req: ProviderRequest =
            serde_json::from_str(r#"{"model":"openai/gpt-4o-mini","messages":[]}"#).unwrap();
        assert_eq!(req.tool_choice, "auto");
    }

    #[test]
    fn tool_definition_serialization() {
        let tool = ToolDefinition {
            name: "create_report".into(),
            description: "Generate a structured meeting report".into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "title": { "type": "string", "description": "Meeting title" }
                },
                "required": ["title"]
            }),
        };
        let json = serde_json::to_string(&tool).unwrap();
        assert!(json.contains("create_report"));
        assert!(json.contains("Meeting title"));
    }
}
