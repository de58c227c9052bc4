//! CLI commands for dagwalk

pub mod dispatch;
pub mod walk;
