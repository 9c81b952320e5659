//! Suite orchestration
//!
//! Runs the ten workloads in order, accumulates results and the running
//! total under a lock, and shuts the progress printer down cleanly once
//! the last workload is done.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::bench::progress::{self, ProgressPrinter};
use crate::bench::workload::{run_workload, WorkloadContext, WorkloadKind};
use crate::config::BenchmarkConfig;
use crate::models::{BenchmarkResult, RunReport, SystemInfo};
use crate::Result;

/// Mutable state shared while the suite runs
#[derive(Debug, Clone)]
pub struct OrchestratorState {
    /// Results in completion order
    pub results: Vec<BenchmarkResult>,
    /// Sum of `results[*].score`
    pub total_score: u64,
    pub cores: usize,
    pub started_at: Option<Instant>,
}

impl OrchestratorState {
    fn new(cores: usize) -> Self {
        Self {
            results: Vec::with_capacity(WorkloadKind::ALL.len()),
            total_score: 0,
            cores,
            started_at: None,
        }
    }

    fn record(&mut self, result: BenchmarkResult) {
        self.total_score += result.score;
        self.results.push(result);
    }
}

/// Drives one benchmark run
pub struct Orchestrator {
    config: BenchmarkConfig,
    context: Arc<WorkloadContext>,
    state: Arc<Mutex<OrchestratorState>>,
    printer: Option<ProgressPrinter>,
}

impl Orchestrator {
    /// Create an orchestrator; the configuration is validated here
    pub fn new(config: BenchmarkConfig) -> Result<Self> {
        config.validate()?;

        let context = Arc::new(WorkloadContext::from_config(&config));
        let state = Arc::new(Mutex::new(OrchestratorState::new(context.cores)));

        Ok(Self {
            config,
            context,
            state,
            printer: None,
        })
    }

    /// Use `printer` for progress output instead of a silent one
    pub fn with_printer(mut self, printer: ProgressPrinter) -> Self {
        self.printer = Some(printer);
        self
    }

    /// Handle to the shared run state
    pub fn state(&self) -> Arc<Mutex<OrchestratorState>> {
        Arc::clone(&self.state)
    }

    pub fn cores(&self) -> usize {
        self.context.cores
    }

    /// Run the whole suite and return the final report
    pub async fn run(&mut self) -> Result<RunReport> {
        let started = Instant::now();
        let timestamp = Utc::now();
        {
            let mut state = self.state.lock().await;
            *state = OrchestratorState::new(self.context.cores);
            state.started_at = Some(started);
        }

        let (tx, rx) = progress::channel();
        let printer = self.printer.take().unwrap_or_else(ProgressPrinter::hidden);
        let printer_handle = printer.spawn(rx);

        info!(
            cores = self.context.cores,
            workloads = WorkloadKind::ALL.len(),
            "Starting benchmark suite"
        );

        let pause = self.config.pause();
        for kind in WorkloadKind::ALL {
            let result = run_workload(kind, Arc::clone(&self.context), &tx).await?;

            {
                let mut state = self.state.lock().await;
                debug!(result = %result.summary(), "Recording result");
                state.record(result);
                debug!(total_score = state.total_score, "Result recorded");
            }

            if pause > Duration::ZERO {
                tokio::time::sleep(pause).await;
            }
        }

        drop(tx);
        let printed = printer_handle.await?;
        debug!(printed, "Progress printer finished");

        let state = self.state.lock().await;
        let report = RunReport {
            timestamp,
            system_info: SystemInfo::detect(state.cores),
            results: state.results.clone(),
            total_score: state.total_score,
            total_duration: started.elapsed(),
        };

        info!(
            total_score = report.total_score,
            elapsed_ms = report.total_duration.as_millis() as u64,
            "Benchmark suite completed"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    fn init_test_logging() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(Level::DEBUG)
            .try_init();
    }

    fn quick_config() -> BenchmarkConfig {
        BenchmarkConfig::quick().with_worker_threads(2).with_seed(1234)
    }

    #[tokio::test]
    async fn test_run_produces_ten_ordered_results() {
        init_test_logging();
        let mut orchestrator = Orchestrator::new(quick_config()).unwrap();
        let report = orchestrator.run().await.unwrap();

        assert_eq!(report.results.len(), 10);
        for (result, kind) in report.results.iter().zip(WorkloadKind::ALL) {
            assert_eq!(result.name, kind.name());
        }
        assert_eq!(report.system_info.logical_cores, 2);
    }

    #[tokio::test]
    async fn test_total_is_sum_of_scores() {
        let mut orchestrator = Orchestrator::new(quick_config()).unwrap();
        let report = orchestrator.run().await.unwrap();

        let sum: u64 = report.results.iter().map(|r| r.score).sum();
        assert_eq!(report.total_score, sum);
        assert!(report.is_consistent());

        let state = orchestrator.state();
        let state = state.lock().await;
        assert_eq!(state.total_score, sum);
        assert_eq!(state.results.len(), 10);
    }

    #[tokio::test]
    async fn test_rejects_invalid_config() {
        let config = BenchmarkConfig::quick().with_worker_threads(0);
        assert!(Orchestrator::new(config).is_err());
    }

    #[tokio::test]
    async fn test_pause_is_applied_between_workloads() {
        let config = quick_config().with_pause(Duration::from_millis(5));
        let mut orchestrator = Orchestrator::new(config).unwrap();
        let report = orchestrator.run().await.unwrap();
        assert!(report.total_duration >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_second_run_starts_fresh() {
        let mut orchestrator = Orchestrator::new(quick_config()).unwrap();
        orchestrator.run().await.unwrap();
        let report = orchestrator.run().await.unwrap();
        assert_eq!(report.results.len(), 10);
    }
}
