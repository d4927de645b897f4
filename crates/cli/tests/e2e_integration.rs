//! End-to-end integration tests for the Meeting Agent pipeline.
//!
//! These tests exercise the full path from transcript to artifacts,
//! including the analysis loop, tool dispatch, and meeting persistence.

use std::sync::Arc;

use meetagent_agent::{AgentEvent, AgentRunner};
use meetagent_core::error::ProviderError;
use meetagent_core::message::{Message, MessageToolCall};
use meetagent_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use meetagent_storage::MeetingStore;
use meetagent_tools::default_registry;
use tokio::sync::mpsc;

const SAMPLE_TRANSCRIPT: &str = "\
Sarah: Good morning everyone. Let's get started with the weekly standup.

John: I've been working on the new authentication module. I think we should switch
from session-based auth to JWT tokens. It will scale better with our microservices.

Sarah: I think that makes sense given our architecture direction. Let's go with JWT.
Maria, can you document this decision?

Maria: Sure. Also, we need to schedule a follow-up meeting to review the implementation
plan. How about next Thursday at 3pm?

Sarah: Thursday at 3pm works for me. Let's plan for one hour.
John — draft the JWT implementation. Maria — update the auth documentation.";

// ── Mock Provider ────────────────────────────────────────────────────────

/// A mock provider that returns scripted responses in sequence.
struct ScriptedProvider {
    responses: std::sync::Mutex<Vec<ProviderResponse>>,
    call_count: std::sync::Mutex<usize>,
}

impl ScriptedProvider {
    fn new(responses: Vec<ProviderResponse>) -> Self {
        Self {
            responses: std::sync::Mutex::new(responses),
            call_count: std::sync::Mutex::new(0),
        }
    }

    fn text(response: &str) -> Self {
        Self::new(vec![text_response(response)])
    }

    fn tools_then_text(tool_calls: Vec<MessageToolCall>, answer: &str) -> Self {
        Self::new(vec![tool_response(tool_calls), text_response(answer)])
    }

    fn calls(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut count = self.call_count.lock().unwrap();
        let responses = self.responses.lock().unwrap();
        if *count >= responses.len() {
            panic!(
                "ScriptedProvider exhausted: call #{}, have {}",
                *count,
                responses.len()
            );
        }
        let resp = responses[*count].clone();
        *count += 1;
        Ok(resp)
    }
}

fn text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        message: Message::assistant(text),
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock".into(),
    }
}

fn tool_response(tool_calls: Vec<MessageToolCall>) -> ProviderResponse {
    let mut msg = Message::assistant("");
    msg.tool_calls = tool_calls;
    ProviderResponse {
        message: msg,
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock".into(),
    }
}

fn make_tool_call(name: &str, args: serde_json::Value) -> MessageToolCall {
    MessageToolCall {
        id: format!("call_{name}"),
        name: name.to_string(),
        arguments: serde_json::to_string(&args).unwrap(),
    }
}

fn runner_with(provider: Arc<ScriptedProvider>) -> Arc<AgentRunner> {
    Arc::new(AgentRunner::new(
        provider,
        "mock",
        Arc::new(default_registry()),
    ))
}

async fn collect(mut rx: mpsc::Receiver<AgentEvent>) -> Vec<AgentEvent> {
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    events
}

// ── E2E: Full Analysis Pipeline ──────────────────────────────────────────

#[tokio::test]
async fn e2e_two_artifact_analysis_run() {
    // Scenario: the transcript mentions a Thursday 3pm follow-up and a
    // decision to adopt JWT. The model asks for a calendar invite and a
    // decision record in one batch, then closes with a summary.
    let provider = Arc::new(ScriptedProvider::tools_then_text(
        vec![
            make_tool_call(
                "create_calendar_invite",
                serde_json::json!({
                    "title": "JWT implementation review",
                    "start_time": "2026-08-27T15:00:00",
                    "end_time": "2026-08-27T16:00:00",
                    "attendees": ["Sarah", "John", "Maria"]
                }),
            ),
            make_tool_call(
                "create_decision_record",
                serde_json::json!({
                    "title": "Adopt JWT authentication",
                    "context": "Session-based auth does not scale across microservices",
                    "decision": "Switch from session-based auth to JWT tokens",
                    "participants": ["Sarah", "John", "Maria"]
                }),
            ),
        ],
        "Scheduled the follow-up and recorded the JWT decision.",
    ));

    let runner = runner_with(provider.clone());
    let events = collect(runner.run_stream(SAMPLE_TRANSCRIPT.into())).await;

    let kinds: Vec<&str> = events.iter().map(|e| e.event_type()).collect();
    assert_eq!(
        kinds,
        vec![
            "thinking",
            "tool_call",
            "tool_result",
            "tool_call",
            "tool_result",
            "thinking",
            "final"
        ]
    );
    assert_eq!(provider.calls(), 2);

    // Calendar artifact carries the ICS body and the parsed window.
    match &events[2] {
        AgentEvent::ToolResult { tool, result } => {
            assert_eq!(tool, "create_calendar_invite");
            assert_eq!(result["type"], "calendar_invite");
            let ics = result["ics_content"].as_str().unwrap();
            assert!(ics.contains("BEGIN:VCALENDAR"));
            assert!(ics.contains("SUMMARY:JWT implementation review"));
            assert!(ics.contains("DTSTART:20260827T150000"));
            assert!(ics.contains("DTEND:20260827T160000"));
            assert_eq!(result["event_details"]["start_time"], "2026-08-27T15:00:00");
        }
        other => panic!("expected calendar tool_result, got {other:?}"),
    }

    // Decision artifact carries the record and its markdown rendering.
    match &events[4] {
        AgentEvent::ToolResult { tool, result } => {
            assert_eq!(tool, "create_decision_record");
            assert_eq!(result["type"], "decision_record");
            assert_eq!(result["record"]["title"], "Adopt JWT authentication");
            assert!(result["markdown"]
                .as_str()
                .unwrap()
                .contains("Adopt JWT authentication"));
        }
        other => panic!("expected decision tool_result, got {other:?}"),
    }

    match events.last().unwrap() {
        AgentEvent::Final { content } => {
            assert_eq!(content, "Scheduled the follow-up and recorded the JWT decision.")
        }
        other => panic!("expected final, got {other:?}"),
    }
}

#[tokio::test]
async fn e2e_failed_tool_does_not_block_siblings() {
    // An unknown tool mid-batch degrades to an error payload; the
    // sibling call still runs and the loop still reaches its summary.
    let provider = Arc::new(ScriptedProvider::tools_then_text(
        vec![
            make_tool_call("summon_intern", serde_json::json!({})),
            make_tool_call(
                "create_action_items",
                serde_json::json!({
                    "items": [{"task": "Draft JWT impl", "assignee": "John"}]
                }),
            ),
        ],
        "Captured the action items.",
    ));

    let runner = runner_with(provider.clone());
    let events = collect(runner.run_stream(SAMPLE_TRANSCRIPT.into())).await;

    match &events[2] {
        AgentEvent::ToolResult { tool, result } => {
            assert_eq!(tool, "summon_intern");
            assert_eq!(result["error"], "Unknown tool: summon_intern");
        }
        other => panic!("expected error payload, got {other:?}"),
    }

    // The sibling ran and filled in its defaults.
    match &events[4] {
        AgentEvent::ToolResult { tool, result } => {
            assert_eq!(tool, "create_action_items");
            assert_eq!(result["type"], "action_items");
            assert_eq!(result["items"][0]["task"], "Draft JWT impl");
            assert_eq!(result["items"][0]["assignee"], "John");
            assert_eq!(result["items"][0]["priority"], "medium");
            assert_eq!(result["items"][0]["deadline"], "TBD");
        }
        other => panic!("expected action_items tool_result, got {other:?}"),
    }

    assert_eq!(events.last().unwrap().event_type(), "final");
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn e2e_direct_summary_no_tools() {
    let provider = Arc::new(ScriptedProvider::text(
        "Short sync with nothing actionable to extract.",
    ));

    let runner = runner_with(provider.clone());
    let events = collect(runner.run_stream("Sarah: hi\nJohn: hi".into())).await;

    let kinds: Vec<&str> = events.iter().map(|e| e.event_type()).collect();
    assert_eq!(kinds, vec!["thinking", "final"]);
    assert_eq!(provider.calls(), 1);
}

// ── E2E: Persistence ─────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_completed_run_persists_artifacts() {
    // Run a scripted analysis, collect what a consumer would keep, and
    // round-trip it through the store.
    let provider = Arc::new(ScriptedProvider::tools_then_text(
        vec![make_tool_call(
            "create_report",
            serde_json::json!({
                "title": "Weekly standup",
                "summary": "Agreed to move auth to JWT tokens.",
                "key_points": ["JWT scales better with microservices"],
                "action_items": ["John drafts the implementation"]
            }),
        )],
        "The team agreed to move authentication to JWT tokens.",
    ));

    let runner = runner_with(provider);
    let events = collect(runner.run_stream(SAMPLE_TRANSCRIPT.into())).await;

    let mut artifacts = Vec::new();
    let mut summary = String::new();
    for event in &events {
        match event {
            AgentEvent::ToolResult { result, .. } if result.get("error").is_none() => {
                artifacts.push(result.clone());
            }
            AgentEvent::Final { content } => summary = content.clone(),
            _ => {}
        }
    }
    assert_eq!(artifacts.len(), 1);
    assert!(!summary.is_empty());

    let title: String = summary.split_whitespace().take(8).collect::<Vec<_>>().join(" ");

    let store = MeetingStore::in_memory().await.unwrap();
    let id = store
        .save_meeting(SAMPLE_TRANSCRIPT, &artifacts, &summary, &title)
        .await
        .unwrap();

    let meeting = store.get_meeting(id).await.unwrap().unwrap();
    assert_eq!(meeting.transcript, SAMPLE_TRANSCRIPT);
    assert_eq!(meeting.summary, summary);
    assert_eq!(meeting.title, "The team agreed to move authentication to");
    assert_eq!(meeting.results.len(), 1);
    assert_eq!(meeting.results[0]["type"], "report");
    assert!(meeting.results[0]["markdown"]
        .as_str()
        .unwrap()
        .contains("Weekly standup"));

    // And it shows up in the listing for the UI.
    let rows = store.list_meetings(50, 0, None).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, id);
}

// ── E2E: Tool Registry Full Coverage ─────────────────────────────────────

#[tokio::test]
async fn e2e_all_artifact_tools_registered() {
    let registry = default_registry();

    let expected_tools = [
        "create_calendar_invite",
        "create_decision_record",
        "create_report",
        "create_email_summary",
        "create_action_items",
        "analyze_sentiment",
    ];
    assert_eq!(registry.len(), expected_tools.len());

    for tool_name in &expected_tools {
        assert!(
            registry.get(tool_name).is_some(),
            "Tool '{tool_name}' should be registered"
        );
    }

    // Every definition must be a function-call-ready schema.
    for def in registry.definitions() {
        assert!(!def.description.is_empty());
        assert_eq!(def.parameters["type"], "object");
    }
}
