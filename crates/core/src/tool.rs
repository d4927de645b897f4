//! Tool trait, the abstraction over agent capabilities.
//!
//! Tools are what let the agent turn a transcript into artifacts:
//! calendar invites, decision records, reports, action item lists.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;
use crate::error::ToolError;
use crate::message::MessageToolCall;
use crate::provider::ToolDefinition;

/// A request to execute a tool, with arguments parsed into JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique call ID (matches the LLM's tool_call.id)
    pub id: String,

    /// Name of the tool to execute
    pub name: String,

    /// Arguments as a JSON value
    pub arguments: serde_json::Value,
}

impl ToolCall {
    /// Build a call from the wire form.
    ///
    /// Malformed argument JSON degrades to an empty object instead of
    /// failing the call; the tool then fills in its own defaults.
    pub fn from_message(call: &MessageToolCall) -> Self {
        let arguments =
            serde_json::from_str(&call.arguments).unwrap_or_else(|_| serde_json::json!({}));
        Self {
            id: call.id.clone(),
            name: call.name.clone(),
            arguments,
        }
    }
}

/// The core Tool trait.
///
/// Each artifact generator (create_report, create_calendar_invite, ...)
/// implements this trait. Tools are registered in the ToolRegistry and made
/// available to the agent loop.
///
/// `execute` returns the artifact as a JSON value; that value is both shown
/// to the caller as a `tool_result` event and fed back to the LLM.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "create_report").
    fn name(&self) -> &str;

    /// A description of what this tool does (sent to the LLM).
    fn description(&self) -> &str;

    /// JSON Schema describing this tool's parameters.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments.
    async fn execute(&self, arguments: serde_json::Value) -> std::result::Result<serde_json::Value, ToolError>;

    /// Convert this tool into a ToolDefinition for sending to the LLM.
    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

/// A registry of available tools.
///
/// The agent loop uses this to:
/// 1. Get tool definitions to send to the LLM
/// 2. Look up and execute tools when the LLM requests them
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// Get all tool definitions (for sending to the LLM).
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.to_definition()).collect()
    }

    /// Execute a tool call, capturing failures as payloads.
    ///
    /// This never returns an error: an unknown tool or a failed execution
    /// produces an `{"error": ...}` object, which flows back to the LLM as
    /// the tool result so the loop keeps going.
    pub async fn dispatch(&self, call: &ToolCall) -> serde_json::Value {
        let Some(tool) = self.tools.get(&call.name) else {
            warn!(tool = %call.name, "Unknown tool requested");
            let err = ToolError::NotFound(call.name.clone());
            return serde_json::json!({ "error": err.to_string() });
        };

        match tool.execute(call.arguments.clone()).await {
            Ok(artifact) => artifact,
            Err(e) => {
                warn!(tool = %call.name, error = %e, "Tool execution failed");
                serde_json::json!({ "error": format!("Tool execution failed: {e}") })
            }
        }
    }

    /// List all registered tool names.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
