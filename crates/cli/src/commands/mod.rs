//! CLI subcommand implementations.

pub mod analyze;
pub mod doctor;
pub mod gateway;
pub mod onboard;
