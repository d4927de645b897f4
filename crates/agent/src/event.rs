//! Progress events emitted during a transcript analysis run.
//!
//! These are the units the gateway forwards to clients over SSE:
//! - `thinking`    — the agent is about to consult the LLM
//! - `tool_call`   — the model requested a tool, arguments parsed
//! - `tool_result` — the tool produced an artifact (or error payload)
//! - `final`       — terminal: the closing summary
//! - `error`       — terminal: the run failed

use serde::{Deserialize, Serialize};

/// Events emitted by the analysis loop, in emission order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    /// The agent is about to consult the LLM.
    Thinking { content: String },

    /// The model asked for a tool, with its arguments parsed into JSON.
    ToolCall {
        tool: String,
        arguments: serde_json::Value,
    },

    /// A tool finished; `result` is the artifact or an error payload.
    ToolResult {
        tool: String,
        result: serde_json::Value,
    },

    /// The run completed with a closing summary.
    Final { content: String },

    /// The run failed; nothing follows this event.
    Error { content: String },
}

impl AgentEvent {
    /// SSE event name for this event type.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Thinking { .. } => "thinking",
            Self::ToolCall { .. } => "tool_call",
            Self::ToolResult { .. } => "tool_result",
            Self::Final { .. } => "final",
            Self::Error { .. } => "error",
        }
    }

    /// Whether this event ends the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Final { .. } | Self::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_serialization_thinking() {
        let event = AgentEvent::Thinking {
            content: "Analyzing transcript...".into(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"thinking""#));
        assert!(json.contains(r#""content":"Analyzing transcript...""#));
    }

    #[test]
    fn event_serialization_tool_call() {
        let event = AgentEvent::ToolCall {
            tool: "create_report".into(),
            arguments: serde_json::json!({"title": "Standup"}),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"tool_call""#));
        assert!(json.contains(r#""tool":"create_report""#));
        assert!(json.contains(r#""title":"Standup""#));
    }

    #[test]
    fn event_serialization_tool_result() {
        let event = AgentEvent::ToolResult {
            tool: "analyze_sentiment".into(),
            result: serde_json::json!({"type": "sentiment", "badge": "Productive"}),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"tool_result""#));
        assert!(json.contains(r#""badge":"Productive""#));
    }

    #[test]
    fn event_serialization_final() {
        let event = AgentEvent::Final {
            content: "Analysis complete.".into(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"final""#));
    }

    #[test]
    fn event_type_names() {
        assert_eq!(
            AgentEvent::Thinking { content: "x".into() }.event_type(),
            "thinking"
        );
        assert_eq!(
            AgentEvent::ToolCall {
                tool: "a".into(),
                arguments: serde_json::Value::Null
            }
            .event_type(),
            "tool_call"
        );
        assert_eq!(
            AgentEvent::ToolResult {
                tool: "a".into(),
                result: serde_json::Value::Null
            }
            .event_type(),
            "tool_result"
        );
        assert_eq!(
            AgentEvent::Final { content: "x".into() }.event_type(),
            "final"
        );
        assert_eq!(
            AgentEvent::Error { content: "x".into() }.event_type(),
            "error"
        );
    }

    #[test]
    fn only_final_and_error_are_terminal() {
        assert!(AgentEvent::Final { content: "x".into() }.is_terminal());
        assert!(AgentEvent::Error { content: "x".into() }.is_terminal());
        assert!(!AgentEvent::Thinking { content: "x".into() }.is_terminal());
        assert!(!AgentEvent::ToolCall {
            tool: "a".into(),
            arguments: serde_json::Value::Null
        }
        .is_terminal());
        assert!(!AgentEvent::ToolResult {
            tool: "a".into(),
            result: serde_json::Value::Null
        }
        .is_terminal());
    }

    #[test]
    fn event_deserialization() {
        let json = r#"{"type":"final","content":"done"}"#;
        let event: AgentEvent = serde_json::from_str(json).unwrap();
        match event {
            AgentEvent::Final { content } => assert_eq!(content, "done"),
            _ => panic!("Wrong variant"),
        }
    }
}
