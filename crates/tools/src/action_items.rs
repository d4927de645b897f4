//! Action items tool: normalizes extracted tasks into a markdown
//! table and a downloadable CSV.

use async_trait::async_trait;
use chrono::Local;
use meetagent_core::error::ToolError;
use meetagent_core::tool::Tool;
use serde::{Deserialize, Serialize};

pub struct ActionItemsTool;

#[derive(Debug, Deserialize)]
struct Args {
    #[serde(default)]
    items: Vec<ActionItem>,
    #[serde(default)]
    meeting_title: Option<String>,
    #[serde(default)]
    date: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
struct ActionItem {
    #[serde(default)]
    task: String,
    #[serde(default = "default_assignee")]
    assignee: String,
    #[serde(default = "default_deadline")]
    deadline: String,
    #[serde(default = "default_priority")]
    priority: String,
}

fn default_assignee() -> String {
    "Unassigned".to_string()
}

fn default_deadline() -> String {
    "TBD".to_string()
}

fn default_priority() -> String {
    "medium".to_string()
}

#[async_trait]
impl Tool for ActionItemsTool {
    fn name(&self) -> &str {
        "create_action_items"
    }

    fn description(&self) -> &str {
        "Create a structured list of action items from the meeting with assignees, deadlines, and priorities"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "items": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "task": {
                                "type": "string",
                                "description": "Description of the action item"
                            },
                            "assignee": {
                                "type": "string",
                                "description": "Person responsible for the task"
                            },
                            "deadline": {
                                "type": "string",
                                "description": "When the task is due, or TBD"
                            },
                            "priority": {
                                "type": "string",
                                "description": "Priority: high, medium, or low"
                            }
                        }
                    },
                    "description": "List of action items mentioned in the meeting"
                },
                "meeting_title": {
                    "type": "string",
                    "description": "Title of the meeting"
                },
                "date": {
                    "type": "string",
                    "description": "Date of the meeting in ISO 8601 format"
                }
            },
            "required": ["items"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let args: Args = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let date = args
            .date
            .unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string());
        let title = args.meeting_title.unwrap_or_else(|| "Meeting".to_string());

        let markdown = render_markdown(&args.items, &title, &date);
        let csv = render_csv(&args.items);

        Ok(serde_json::json!({
            "type": "action_items",
            "items": args.items,
            "markdown": markdown,
            "csv": csv,
            "metadata": {
                "meeting_title": title,
                "date": date,
                "total_items": args.items.len(),
            },
        }))
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────

fn priority_emoji(priority: &str) -> &'static str {
    match priority {
        "high" => "\u{1F534}",
        "medium" => "\u{1F7E1}",
        "low" => "\u{1F7E2}",
        _ => "\u{26AA}",
    }
}

/// Python-style capitalize: first char uppercased, the rest lowered.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

fn render_markdown(items: &[ActionItem], title: &str, date: &str) -> String {
    let rows: Vec<String> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            format!(
                "| {} | {} {} | {} | {} | {} |",
                i + 1,
                priority_emoji(&item.priority),
                capitalize(&item.priority),
                item.task,
                item.assignee,
                item.deadline
            )
        })
        .collect();

    format!(
        "# Action Items: {title}\n\n**Date:** {date}\n**Total Items:** {count}\n\n\
         | # | Priority | Task | Assignee | Deadline |\n\
         |---|----------|------|----------|----------|\n\
         {rows}\n\n---\n\n*Action items extracted by Meeting Agent.*\n",
        title = title,
        date = date,
        count = items.len(),
        rows = rows.join("\n")
    )
}

fn render_csv(items: &[ActionItem]) -> String {
    let mut lines = vec!["#,Priority,Task,Assignee,Deadline".to_string()];
    for (i, item) in items.iter().enumerate() {
        let task_escaped = item.task.replace('"', "\"\"");
        lines.push(format!(
            "{},{},\"{}\",{},{}",
            i + 1,
            item.priority,
            task_escaped,
            item.assignee,
            item.deadline
        ));
    }
    lines.join("\n")
}

// ── Tests ─────────────────────────────────────────────────────────────────
