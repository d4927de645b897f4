//! Meeting history persistence for MeetAgent.

pub mod sqlite;

pub use sqlite::{Meeting, MeetingStore, MeetingSummary};
