//! Utility modules for common functionality
//!
//! - `logging`: tracing subscriber setup
//! - `progress`: spinner helpers for consistent CLI feedback

pub mod logging;
pub mod progress;
