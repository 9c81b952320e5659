//! Data models module
//!
//! Contains workload result records, the finished-run report,
//! and system information definitions.

pub mod result;

// Re-export commonly used types
pub use result::{
    BenchmarkResult,
    RunReport,
    SystemInfo,
    MIN_ELAPSED,
};
