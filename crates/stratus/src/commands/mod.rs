//! Command handlers: bridge CLI args -> engine calls -> output formatting.

pub mod config_cmd;
pub mod report;
