//! CLI library components for the roll-call tool.

pub mod app;
pub mod config;
pub mod logging;
