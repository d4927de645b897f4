//! Calendar invite tool: builds a .ics file and a Google Calendar
//! prefill link for events scheduled during a meeting.
//!
//! Times are parsed as naive ISO 8601 local times. When the model
//! hands back something unparseable ("TBD", "next Thursday"), the
//! event falls back to a 9:00-10:00 slot today instead of failing.

use async_trait::async_trait;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use meetagent_core::error::ToolError;
use meetagent_core::tool::Tool;
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

pub struct CalendarInviteTool;

#[derive(Debug, Deserialize)]
struct Args {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    start_time: String,
    #[serde(default)]
    end_time: String,
    #[serde(default)]
    attendees: Vec<String>,
}

#[async_trait]
impl Tool for CalendarInviteTool {
    fn name(&self) -> &str {
        "create_calendar_invite"
    }

    fn description(&self) -> &str {
        "Create a calendar invite (.ics file) for a scheduled event mentioned in the meeting"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "title": {
                    "type": "string",
                    "description": "Title of the calendar event"
                },
                "description": {
                    "type": "string",
                    "description": "Description/agenda for the event"
                },
                "start_time": {
                    "type": "string",
                    "description": "Start time in ISO 8601 format (e.g. 2026-02-20T14:00:00)"
                },
                "end_time": {
                    "type": "string",
                    "description": "End time in ISO 8601 format (e.g. 2026-02-20T15:00:00)"
                },
                "attendees": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "List of attendee names or emails"
                }
            },
            "required": ["title", "start_time", "end_time"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let args: Args = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let (dt_start, dt_end) = event_window(&args.start_time, &args.end_time);
        let ics_content = build_ics(
            &args.title,
            &args.description,
            dt_start,
            dt_end,
            &args.attendees,
        );
        let google_url = google_calendar_url(&args.title, &args.description, dt_start, dt_end);

        Ok(serde_json::json!({
            "type": "calendar_invite",
            "ics_content": ics_content,
            "google_calendar_url": google_url,
            "event_details": {
                "title": args.title,
                "description": args.description,
                "start_time": dt_start.format("%Y-%m-%dT%H:%M:%S").to_string(),
                "end_time": dt_end.format("%Y-%m-%dT%H:%M:%S").to_string(),
                "attendees": args.attendees,
            },
        }))
    }
}

// ── Event window ──────────────────────────────────────────────────────────

/// Parse both timestamps. If either is invalid the pair degrades to a
/// one-hour slot this morning so the invite is still usable.
fn event_window(start: &str, end: &str) -> (NaiveDateTime, NaiveDateTime) {
    match (parse_iso(start), parse_iso(end)) {
        (Some(s), Some(e)) => (s, e),
        _ => {
            warn!(start = %start, end = %end, "Unparseable event times, using fallback slot");
            let today = Local::now().date_naive();
            (
                today.and_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)),
                today.and_time(NaiveTime::from_hms_opt(10, 0, 0).unwrap_or(NaiveTime::MIN)),
            )
        }
    }
}

fn parse_iso(value: &str) -> Option<NaiveDateTime> {
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    // Date-only inputs become midnight.
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

// ── ICS generation ────────────────────────────────────────────────────────

const ICS_STAMP: &str = "%Y%m%dT%H%M%S";

fn build_ics(
    title: &str,
    description: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
    attendees: &[String],
) -> String {
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "PRODID:-//Meeting Agent//EN".to_string(),
        "VERSION:2.0".to_string(),
        "CALSCALE:GREGORIAN".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("SUMMARY:{}", escape_ics(title)),
        format!("DTSTART:{}", start.format(ICS_STAMP)),
        format!("DTEND:{}", end.format(ICS_STAMP)),
        format!("DESCRIPTION:{}", escape_ics(description)),
        format!("UID:{}", Uuid::new_v4()),
        format!("DTSTAMP:{}", Local::now().naive_local().format(ICS_STAMP)),
    ];
    for attendee in attendees {
        if attendee.contains('@') {
            lines.push(format!("ATTENDEE:mailto:{attendee}"));
        } else {
            lines.push(format!("ATTENDEE:{}", escape_ics(attendee)));
        }
    }
    lines.push("END:VEVENT".to_string());
    lines.push("END:VCALENDAR".to_string());

    let mut ics = lines.join("\r\n");
    ics.push_str("\r\n");
    ics
}

/// RFC 5545 TEXT escaping for backslashes, semicolons, commas, newlines.
fn escape_ics(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

fn google_calendar_url(
    title: &str,
    description: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> String {
    let dates = format!("{}/{}", start.format(ICS_STAMP), end.format(ICS_STAMP));
    format!(
        "https://calendar.google.com/calendar/render?action=TEMPLATE&text={}&dates={}&details={}",
        urlencoding::encode(title),
        dates,
        urlencoding::encode(description)
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────
