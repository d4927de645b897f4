//! Sentiment tool: summarizes meeting tone as a UI badge plus a
//! structured analysis with a clamped productivity score.

use async_trait::async_trait;
use meetagent_core::error::ToolError;
use meetagent_core::tool::Tool;
use serde::Deserialize;

pub struct SentimentTool;

#[derive(Debug, Deserialize)]
struct Args {
    #[serde(default)]
    overall_tone: String,
    #[serde(default)]
    tone_details: String,
    #[serde(default)]
    conflict_detected: bool,
    #[serde(default)]
    conflict_details: Option<String>,
    #[serde(default)]
    key_emotions: Vec<String>,
    #[serde(default)]
    productivity_score: Option<i64>,
}

#[async_trait]
impl Tool for SentimentTool {
    fn name(&self) -> &str {
        "analyze_sentiment"
    }

    fn description(&self) -> &str {
        "Analyze the overall tone of the meeting, flag conflicts, and rate how productive it was"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "overall_tone": {
                    "type": "string",
                    "description": "Overall tone, e.g. productive, tense, casual, mixed"
                },
                "tone_details": {
                    "type": "string",
                    "description": "Brief explanation of the tone assessment"
                },
                "conflict_detected": {
                    "type": "boolean",
                    "description": "Whether any tension or disagreement was noted"
                },
                "conflict_details": {
                    "type": "string",
                    "description": "Description of the conflict if detected"
                },
                "key_emotions": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Emotions observed, e.g. enthusiasm, frustration"
                },
                "productivity_score": {
                    "type": "integer",
                    "description": "1-10 rating of how productive the meeting was"
                }
            },
            "required": ["overall_tone", "tone_details"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let args: Args = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let score = args.productivity_score.unwrap_or(5).clamp(1, 10);
        let (mut badge, mut badge_color) = tone_badge(&args.overall_tone);
        if args.conflict_detected && badge_color != "red" {
            badge.push_str(" + Conflict");
            badge_color = "yellow";
        }

        Ok(serde_json::json!({
            "type": "sentiment",
            "tone": args.overall_tone,
            "badge": badge,
            "badge_color": badge_color,
            "conflict_detected": args.conflict_detected,
            "details": {
                "overall_tone": args.overall_tone,
                "tone_details": args.tone_details,
                "conflict_detected": args.conflict_detected,
                "conflict_details": args.conflict_details.unwrap_or_default(),
                "key_emotions": args.key_emotions,
                "productivity_score": score,
            },
        }))
    }
}

// ── Badges ────────────────────────────────────────────────────────────────

fn tone_badge(tone: &str) -> (String, &'static str) {
    match tone.to_lowercase().as_str() {
        "productive" => ("Productive".to_string(), "green"),
        "tense" => ("Tension Detected".to_string(), "red"),
        "casual" => ("Casual".to_string(), "blue"),
        "mixed" => ("Mixed Tone".to_string(), "yellow"),
        "positive" => ("Positive".to_string(), "green"),
        "negative" => ("Negative".to_string(), "red"),
        "neutral" => ("Neutral".to_string(), "gray"),
        other => (capitalize(other), "gray"),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
