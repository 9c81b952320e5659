//! Benchmark engine module
//!
//! Contains the workload implementations, the progress channel,
//! and the orchestrator that runs the suite in order.

pub mod cpu;
pub mod data;
pub mod memory;
pub mod orchestrator;
pub mod parallel;
pub mod progress;
pub mod workload;

// Re-export commonly used types
pub use orchestrator::{Orchestrator, OrchestratorState};
pub use progress::{ProgressMessage, ProgressPrinter};
pub use workload::{run_workload, WorkloadContext, WorkloadKind};
