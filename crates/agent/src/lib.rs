//! Transcript analysis loop for MeetAgent.
//!
//! Feeds a meeting transcript to an LLM with the artifact tools
//! attached, executes the tools it asks for, and streams progress
//! events until a terminal `final` or `error`.

pub mod event;
pub mod prompts;
pub mod runner;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use event::AgentEvent;
pub use runner::AgentRunner;
