//! Meeting report tool: turns a general discussion into a structured
//! markdown report with key points and action items.

use async_trait::async_trait;
use chrono::Local;
use meetagent_core::error::ToolError;
use meetagent_core::tool::Tool;
use serde::Deserialize;

pub struct ReportTool;

#[derive(Debug, Deserialize)]
struct Args {
    #[serde(default)]
    title: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    key_points: Vec<String>,
    #[serde(default)]
    action_items: Vec<String>,
    #[serde(default)]
    attendees: Vec<String>,
    #[serde(default)]
    date: Option<String>,
}

#[async_trait]
impl Tool for ReportTool {
    fn name(&self) -> &str {
        "create_report"
    }

    fn description(&self) -> &str {
        "Create a structured meeting report/summary"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "title": {
                    "type": "string",
                    "description": "Title of the meeting report"
                },
                "summary": {
                    "type": "string",
                    "description": "Executive summary of the meeting"
                },
                "key_points": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "List of key discussion points"
                },
                "action_items": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "List of action items with owners if known"
                },
                "attendees": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "List of meeting attendees"
                },
                "date": {
                    "type": "string",
                    "description": "Date of the meeting"
                }
            },
            "required": ["title", "summary", "key_points", "action_items"]
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
            &args.summary,
            &args.key_points,
            &args.action_items,
            &args.attendees,
            &date,
        );

        Ok(serde_json::json!({
            "type": "report",
            "report": {
                "title": args.title,
                "summary": args.summary,
                "key_points": args.key_points,
                "action_items": args.action_items,
                "attendees": args.attendees,
                "date": date,
            },
            "markdown": markdown,
        }))
    }
}

// ── Markdown rendering ────────────────────────────────────────────────────

fn render_markdown(
    title: &str,
    summary: &str,
    key_points: &[String],
    action_items: &[String],
    attendees: &[String],
    date: &str,
) -> String {
    let mut md = format!("# Meeting Report: {title}\n\n**Date:** {date}\n");
    if !attendees.is_empty() {
        md.push_str(&format!("**Attendees:** {}\n", attendees.join(", ")));
    }

    md.push_str(&format!("\n## Summary\n\n{summary}\n\n## Key Points\n\n"));
    for point in key_points {
        md.push_str(&format!("- {point}\n"));
    }

    md.push_str("\n## Action Items\n\n");
    for item in action_items {
        md.push_str(&format!("- [ ] {item}\n"));
    }

    md.push_str("\n---\n\n*Report generated by Meeting Agent.*\n");
    md
}

// ── Tests ─────────────────────────────────────────────────────────────────
