//! Built-in artifact tools for MeetAgent.
//!
//! Each tool turns details the model extracted from a transcript into
//! a shareable artifact: calendar invites, decision records, meeting
//! reports, summary emails, action-item tables, and sentiment badges.
//! Tools never fail the agent run; bad arguments degrade to sensible
//! defaults and produce a usable artifact anyway.

pub mod action_items;
pub mod calendar_invite;
pub mod decision_record;
pub mod email_summary;
pub mod report;
pub mod sentiment;

use meetagent_core::tool::ToolRegistry;

pub use action_items::ActionItemsTool;
pub use calendar_invite::CalendarInviteTool;
pub use decision_record::DecisionRecordTool;
pub use email_summary::EmailSummaryTool;
pub use report::ReportTool;
pub use sentiment::SentimentTool;

/// Create a registry with all built-in meeting tools.
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(calendar_invite::CalendarInviteTool));
    registry.register(Box::new(decision_record::DecisionRecordTool));
    registry.register(Box::new(report::ReportTool));
    registry.register(Box::new(email_summary::EmailSummaryTool));
    registry.register(Box::new(action_items::ActionItemsTool));
    registry.register(Box::new(sentiment::SentimentTool));
    registry
}
