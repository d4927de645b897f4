//! Email summary tool: renders a ready-to-send meeting summary email
//! in both plain-text and HTML form.

use async_trait::async_trait;
use chrono::Local;
use meetagent_core::error::ToolError;
use meetagent_core::tool::Tool;
use serde::Deserialize;

pub struct EmailSummaryTool;

#[derive(Debug, Deserialize)]
struct Args {
    #[serde(default)]
    subject: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    attendees: Vec<String>,
    #[serde(default)]
    date: Option<String>,
}

#[async_trait]
impl Tool for EmailSummaryTool {
    fn name(&self) -> &str {
        "create_email_summary"
    }

    fn description(&self) -> &str {
        "Draft a ready-to-send email summarizing the meeting for its attendees"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "subject": {
                    "type": "string",
                    "description": "Email subject line"
                },
                "body": {
                    "type": "string",
                    "description": "Summary text forming the body of the email"
                },
                "attendees": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Recipient names or emails"
                },
                "date": {
                    "type": "string",
                    "description": "Meeting date in ISO 8601 format"
                }
            },
            "required": ["subject", "body"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let args: Args = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let email_date = args
            .date
            .unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string());
        let recipients = if args.attendees.is_empty() {
            "Team".to_string()
        } else {
            args.attendees.join(", ")
        };

        let body_plain = render_plain(&recipients, &email_date, &args.body);
        let body_html = render_html(&recipients, &email_date, &args.body);

        Ok(serde_json::json!({
            "type": "email_summary",
            "subject": args.subject,
            "body_plain": body_plain,
            "body_html": body_html,
            "metadata": {
                "subject": args.subject,
                "date": email_date,
                "attendees": args.attendees,
                "body": args.body,
            },
        }))
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────

fn render_plain(recipients: &str, date: &str, body: &str) -> String {
    format!(
        "Hi {recipients},\n\nHere is the summary from our meeting on {date}:\n\n{body}\n\nBest regards,\nMeeting Agent\n"
    )
}

fn render_html(recipients: &str, date: &str, body: &str) -> String {
    format!(
        r#"<div style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 600px; margin: 0 auto; color: #333;">
  <p>Hi {recipients},</p>
  <p>Here is the summary from our meeting on <strong>{date}</strong>:</p>
  <hr style="border: none; border-top: 1px solid #e5e5e5; margin: 16px 0;" />
  <div style="white-space: pre-wrap; line-height: 1.6;">{body}</div>
  <hr style="border: none; border-top: 1px solid #e5e5e5; margin: 16px 0;" />
  <p style="color: #888; font-size: 12px;">Best regards,<br/>Meeting Agent</p>
</div>"#
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────
