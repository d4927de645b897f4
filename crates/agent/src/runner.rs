//! The transcript analysis loop.
//!
//! `AgentRunner::run_stream` spawns the loop as a producer task and
//! hands back a capacity-1 channel of progress events. Backpressure is
//! total: each event must be consumed before the next one is produced.
//! Dropping the receiver cancels the run; an in-flight LLM call is
//! abandoned by racing it against channel closure.

use std::sync::Arc;

use meetagent_core::message::{Conversation, Message};
use meetagent_core::provider::{Provider, ProviderRequest};
use meetagent_core::tool::{ToolCall, ToolRegistry};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::event::AgentEvent;
use crate::prompts::{analysis_prompt, SYSTEM_PROMPT};

/// Maximum LLM round-trips per analysis run.
const MAX_ITERATIONS: usize = 5;

/// Orchestrates LLM calls and tool execution for one transcript.
pub struct AgentRunner {
    provider: Arc<dyn Provider>,
    model: String,
    tools: Arc<ToolRegistry>,
    max_iterations: usize,
}

impl AgentRunner {
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        tools: Arc<ToolRegistry>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            tools,
            max_iterations: MAX_ITERATIONS,
        }
    }

    /// Override the iteration cap.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Start an analysis run, returning its event stream.
    ///
    /// The stream ends with a `final` or `error` event unless the
    /// receiver is dropped first, in which case the producer task stops
    /// at its next send.
    pub fn run_stream(self: &Arc<Self>, transcript: String) -> mpsc::Receiver<AgentEvent> {
        let (tx, rx) = mpsc::channel(1);
        let runner = Arc::clone(self);
        tokio::spawn(async move {
            runner.run(transcript, tx).await;
        });
        rx
    }

    async fn run(&self, transcript: String, tx: mpsc::Sender<AgentEvent>) {
        let mut conversation = Conversation::new();
        conversation.push(Message::system(SYSTEM_PROMPT));
        conversation.push(Message::user(analysis_prompt(&transcript)));
        let tool_definitions = self.tools.definitions();

        for iteration in 1..=self.max_iterations {
            debug!(iteration, messages = conversation.len(), "Agent loop iteration");

            let thinking = AgentEvent::Thinking {
                content: "Analyzing transcript...".into(),
            };
            if tx.send(thinking).await.is_err() {
                return;
            }

            let request = ProviderRequest::new(
                self.model.clone(),
                conversation.messages.clone(),
                tool_definitions.clone(),
            );

            let response = tokio::select! {
                result = self.provider.complete(request) => result,
                _ = tx.closed() => {
                    debug!(iteration, "Client disconnected, abandoning LLM call");
                    return;
                }
            };

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    warn!(error = %e, "LLM call failed");
                    let _ = tx
                        .send(AgentEvent::Error {
                            content: format!("LLM API error: {e}"),
                        })
                        .await;
                    return;
                }
            };

            if response.message.tool_calls.is_empty() {
                let content = if response.message.content.is_empty() {
                    "Analysis complete.".to_string()
                } else {
                    response.message.content.clone()
                };
                info!(iteration, "Analysis finished");
                let _ = tx.send(AgentEvent::Final { content }).await;
                return;
            }

            // The assistant message enters the history before any tool
            // runs so the tool messages can reference its call ids.
            let tool_calls = response.message.tool_calls.clone();
            conversation.push(response.message);

            info!(count = tool_calls.len(), "Executing tool calls");

            for tc in &tool_calls {
                let call = ToolCall::from_message(tc);

                let call_event = AgentEvent::ToolCall {
                    tool: call.name.clone(),
                    arguments: call.arguments.clone(),
                };
                if tx.send(call_event).await.is_err() {
                    return;
                }

                let result = self.tools.dispatch(&call).await;

                let result_event = AgentEvent::ToolResult {
                    tool: call.name.clone(),
                    result: result.clone(),
                };
                if tx.send(result_event).await.is_err() {
                    return;
                }

                conversation.push(Message::tool_result(&call.id, result.to_string()));
            }
        }

        info!(iterations = self.max_iterations, "Iteration budget exhausted");
        let _ = tx
            .send(AgentEvent::Final {
                content: "Agent finished (max iterations reached).".into(),
            })
            .await;
    }
}
