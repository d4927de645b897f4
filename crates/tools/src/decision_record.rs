//! Decision record tool: captures a decision made during a meeting as
//! a lightweight ADR with context, decision, and consequences.

use async_trait::async_trait;
use chrono::Local;
use meetagent_core::error::ToolError;
use meetagent_core::tool::Tool;
use serde::Deserialize;

pub struct DecisionRecordTool;

#[derive(Debug, Deserialize)]
struct Args {
    #[serde(default)]
    title: String,
    #[serde(default)]
    context: String,
    #[serde(default)]
    decision: String,
    #[serde(default)]
    consequences: String,
    #[serde(default)]
    participants: Vec<String>,
    #[serde(default)]
    date: Option<String>,
}

#[async_trait]
impl Tool for DecisionRecordTool {
    fn name(&self) -> &str {
        "create_decision_record"
    }

    fn description(&self) -> &str {
        "Create a structured decision record (ADR) for a decision made during the meeting"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "title": {
                    "type": "string",
                    "description": "Title of the decision"
                },
                "context": {
                    "type": "string",
                    "description": "Background context that led to this decision"
                },
                "decision": {
                    "type": "string",
                    "description": "The decision that was made"
                },
                "consequences": {
                    "type": "string",
                    "description": "Expected consequences and impact of this decision"
                },
                "participants": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "People involved in making this decision"
                },
                "date": {
                    "type": "string",
                    "description": "Date of the decision in ISO 8601 format"
                }
            },
            "required": ["title", "context", "decision"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let args: Args = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let date = args
            .date
            .unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string());
        let markdown = render_markdown(
            &args.title,
            &args.context,
            &args.decision,
            &args.consequences,
            &args.participants,
            &date,
        );

        Ok(serde_json::json!({
            "type": "decision_record",
            "record": {
                "title": args.title,
                "context": args.context,
                "decision": args.decision,
                "consequences": args.consequences,
                "participants": args.participants,
                "date": date,
            },
            "markdown": markdown,
        }))
    }
}

// ── Markdown rendering ────────────────────────────────────────────────────

fn render_markdown(
    title: &str,
    context: &str,
    decision: &str,
    consequences: &str,
    participants: &[String],
    date: &str,
) -> String {
    let mut md = format!("# Decision: {title}\n\n**Date:** {date}\n");
    if !participants.is_empty() {
        md.push_str(&format!("**Participants:** {}\n", participants.join(", ")));
    }
    md.push_str(&format!(
        "\n## Context\n\n{context}\n\n## Decision\n\n{decision}\n\n## Consequences\n\n{consequences}\n\n---\n\n*Decision recorded by Meeting Agent.*\n"
    ));
    md
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn builds_record_and_markdown() {
        let tool = DecisionRecordTool;
        let artifact = tool
            .execute(serde_json::json!({
                "title": "Use JWT for authentication",
                "context": "Session storage does not scale across nodes",
                "decision": "Adopt stateless JWT tokens",
                "consequences": "Token revocation needs a denylist",
                "participants": ["Sarah", "John"],
                "date": "2026-02-20"
            }))
            .await
            .unwrap();

        assert_eq!(artifact["type"], "decision_record");
        assert_eq!(artifact["record"]["title"], "Use JWT for authentication");
        assert_eq!(artifact["record"]["date"], "2026-02-20");

        let md = artifact["markdown"].as_str().unwrap();
        assert!(md.starts_with("# Decision: Use JWT for authentication\n"));
        assert!(md.contains("**Date:** 2026-02-20"));
        assert!(md.contains("**Participants:** Sarah, John"));
        assert!(md.contains("## Context\n\nSession storage does not scale"));
        assert!(md.contains("## Decision\n\nAdopt stateless JWT tokens"));
        assert!(md.contains("## Consequences\n\nToken revocation needs a denylist"));
        assert!(md.ends_with("*Decision recorded by Meeting Agent.*\n"));
    }

    #[tokio::test]
    async fn date_defaults_to_today() {
        let tool = DecisionRecordTool;
        let artifact = tool
            .execute(serde_json::json!({
                "title": "T", "context": "C", "decision": "D"
            }))
            .await
            .unwrap();

        let today = Local::now().format("%Y-%m-%d").to_string();
        assert_eq!(artifact["record"]["date"], today);
    }

    #[tokio::test]
    async fn participants_line_omitted_when_empty() {
        let tool = DecisionRecordTool;
        let artifact = tool
            .execute(serde_json::json!({
                "title": "T", "context": "C", "decision": "D"
            }))
            .await
            .unwrap();

        let md = artifact["markdown"].as_str().unwrap();
        assert!(!md.contains("**Participants:**"));
        assert_eq!(artifact["record"]["participants"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn missing_fields_degrade_to_empty_strings() {
        let tool = DecisionRecordTool;
        let artifact = tool.execute(serde_json::json!({})).await.unwrap();

        assert_eq!(artifact["record"]["title"], "");
        assert_eq!(artifact["record"]["consequences"], "");
        assert!(artifact["markdown"].as_str().unwrap().contains("## Decision"));
    }

    #[test]
    fn tool_definition() {
        let tool = DecisionRecordTool;
        let def = tool.to_definition();
        assert_eq!(def.name, "create_decision_record");
        let required = def.parameters["required"].as_array().unwrap();
        assert_eq!(required.len(), 3);
    }
}
