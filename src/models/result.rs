//! Benchmark result data models
//!
//! Contains the per-workload result record, the finished-run report,
//! and system information captured alongside a run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::report::rating::Rating;

/// Floor applied to measured elapsed time before computing throughput
pub const MIN_ELAPSED: Duration = Duration::from_micros(1);

/// Result of a single workload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Human-readable workload name
    pub name: String,
    /// Wall-clock time spent in the synthetic work
    #[serde(with = "duration_serde")]
    pub duration: Duration,
    /// Number of operations the workload counted
    pub operations: u64,
    /// Operations per second
    pub ops_per_second: f64,
    /// Normalized score
    pub score: u64,
}

impl BenchmarkResult {
    /// Build a result from a raw measurement.
    ///
    /// Throughput is computed against `max(elapsed, MIN_ELAPSED)` so a
    /// zero timer reading never divides by zero; the stored duration is the
    /// measured one.
    pub fn from_measurement(
        name: impl Into<String>,
        operations: u64,
        elapsed: Duration,
        divisor: f64,
    ) -> Self {
        let ops_per_second = calculate_ops_per_second(operations, elapsed);
        Self {
            name: name.into(),
            duration: elapsed,
            operations,
            ops_per_second,
            score: normalize_score(ops_per_second, divisor),
        }
    }

    /// One-line summary used in logs
    pub fn summary(&self) -> String {
        format!(
            "{} - {} ops in {:.3}s - {:.0} ops/s - score {}",
            self.name,
            self.operations,
            self.duration.as_secs_f64(),
            self.ops_per_second,
            self.score
        )
    }
}

/// Operations per second with the elapsed time clamped to `MIN_ELAPSED`
pub fn calculate_ops_per_second(operations: u64, elapsed: Duration) -> f64 {
    operations as f64 / elapsed.max(MIN_ELAPSED).as_secs_f64()
}

/// `floor(ops_per_second / divisor)`, saturating at zero for degenerate input
pub fn normalize_score(ops_per_second: f64, divisor: f64) -> u64 {
    if !(divisor > 0.0) || !ops_per_second.is_finite() || ops_per_second <= 0.0 {
        return 0;
    }
    (ops_per_second / divisor).floor() as u64
}

/// Complete report for a finished suite run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Timestamp when the run started
    pub timestamp: DateTime<Utc>,
    /// System information at time of the run
    pub system_info: SystemInfo,
    /// Per-workload results, in execution order
    pub results: Vec<BenchmarkResult>,
    /// Sum of all workload scores
    pub total_score: u64,
    /// Wall time of the whole run, pauses included
    #[serde(with = "duration_serde")]
    pub total_duration: Duration,
}

impl RunReport {
    /// Average score using integer division; 0 for an empty run
    pub fn average_score(&self) -> u64 {
        if self.results.is_empty() {
            0
        } else {
            self.total_score / self.results.len() as u64
        }
    }

    /// Qualitative rating of the total score
    pub fn rating(&self) -> Rating {
        Rating::from_total_score(self.total_score)
    }

    /// Check that the stored total matches the per-workload scores
    pub fn is_consistent(&self) -> bool {
        self.results.iter().map(|r| r.score).sum::<u64>() == self.total_score
    }

    /// Get a human-readable summary of the run
    pub fn summary(&self) -> String {
        format!(
            "{} - {} workloads - total {} - avg {} - {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.results.len(),
            self.total_score,
            self.average_score(),
            self.rating().headline()
        )
    }
}

/// System information captured at benchmark time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Operating system name
    pub os: String,
    /// CPU architecture
    pub arch: String,
    /// Logical cores used to size the parallel workloads
    pub logical_cores: usize,
}

impl SystemInfo {
    /// Detect the current system, reporting `cores` as the parallelism degree
    pub fn detect(cores: usize) -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            logical_cores: cores,
        }
    }
}

impl Default for SystemInfo {
    fn default() -> Self {
        Self::detect(crate::config::detect_cores())
    }
}

// Durations are stored as integer nanoseconds
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_nanos() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let nanos = u64::deserialize(deserializer)?;
        Ok(Duration::from_nanos(nanos))
    }
}
