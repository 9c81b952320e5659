//! Utility functions module
//!
//! Contains helper functions for units formatting, the start prompt,
//! and other common operations.

pub mod prompt;
pub mod units;

// Re-export commonly used functions
pub use prompt::wait_for_enter;
pub use units::{format_bytes, format_duration, format_ops, format_total_time, rule};
