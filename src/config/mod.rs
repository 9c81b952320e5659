//! Configuration management module
//!
//! Handles loading, saving, and validation of the benchmark suite
//! configuration: workload sizes, score divisors and run pacing.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{BenchError, Result, APP_NAME, CONFIG_FILE};

pub mod persistence;

/// Largest Fibonacci index whose value fits in a `u64`
pub const MAX_FIB_INDEX: u32 = 90;

/// Benchmark configuration structure containing all suite parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Cosmetic pause between workloads, in milliseconds
    pub pause_ms: u64,
    /// Override for the detected number of logical cores
    pub worker_threads: Option<usize>,
    /// Fixed RNG seed; the clock is used when absent
    pub seed: Option<u64>,
    /// Append every finished run to the history file
    pub save_history: bool,
    /// Amount of synthetic work per workload
    pub sizes: WorkloadSizes,
    /// Empirical score normalization divisors per workload
    pub divisors: ScoreDivisors,
}

/// Work sizes for the ten workloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadSizes {
    /// Upper bound (exclusive) for trial-division prime counting
    pub prime_limit: u64,
    /// Iterations of the transcendental math loop
    pub math_iterations: u64,
    /// Workers per logical core for the multi-threading workload
    pub parallel_workers_per_core: usize,
    /// Math operations performed by each multi-threading worker
    pub parallel_jobs_per_worker: u64,
    /// Integers allocated and sorted by the memory workload
    pub memory_array_size: usize,
    /// Binary-search probes after the memory sort
    pub memory_probes: u64,
    /// Iterations of the string append loop
    pub string_iterations: u64,
    /// Iterations of the MD5 + SHA-256 hashing loop
    pub hash_iterations: u64,
    /// Iterations of the JSON record round trip
    pub record_iterations: u64,
    /// Rounds of generate/sort/search
    pub sort_rounds: u64,
    /// Integers generated per sort round
    pub sort_array_size: usize,
    /// Binary-search probes per sort round
    pub sort_probes: u64,
    /// Highest Fibonacci index computed (inclusive)
    pub fib_max: u32,
    /// Index looked up repeatedly to exercise the memo table
    pub fib_repeat_n: u32,
    /// Number of repeated memo lookups
    pub fib_repeats: u64,
    /// Math operations per mixed-workload worker
    pub mixed_math_ops: u64,
    /// Integers sorted per mixed-workload worker
    pub mixed_sort_size: usize,
    /// SHA-256 digests per mixed-workload worker
    pub mixed_hashes: u64,
}

/// Score divisors: `score = floor(ops_per_second / divisor)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreDivisors {
    pub prime_numbers: f64,
    pub math_operations: f64,
    pub multi_threading: f64,
    pub memory_operations: f64,
    pub string_operations: f64,
    pub crypto_operations: f64,
    pub record_encoding: f64,
    pub algorithms: f64,
    pub recursion: f64,
    pub mixed_workload: f64,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            pause_ms: 500,
            worker_threads: None,
            seed: None,
            save_history: true,
            sizes: WorkloadSizes::default(),
            divisors: ScoreDivisors::default(),
        }
    }
}

impl Default for WorkloadSizes {
    fn default() -> Self {
        Self {
            prime_limit: 1_000_000,
            math_iterations: 10_000_000,
            parallel_workers_per_core: 2,
            parallel_jobs_per_worker: 500_000,
            memory_array_size: 10_000_000,
            memory_probes: 10_000,
            string_iterations: 100_000,
            hash_iterations: 100_000,
            record_iterations: 50_000,
            sort_rounds: 100,
            sort_array_size: 100_000,
            sort_probes: 1_000,
            fib_max: 34,
            fib_repeat_n: 30,
            fib_repeats: 1_000,
            mixed_math_ops: 10_000,
            mixed_sort_size: 10_000,
            mixed_hashes: 1_000,
        }
    }
}

impl WorkloadSizes {
    /// Tiny sizes that finish in milliseconds
    pub fn quick() -> Self {
        Self {
            prime_limit: 2_000,
            math_iterations: 5_000,
            parallel_workers_per_core: 2,
            parallel_jobs_per_worker: 1_000,
            memory_array_size: 5_000,
            memory_probes: 100,
            string_iterations: 200,
            hash_iterations: 200,
            record_iterations: 100,
            sort_rounds: 3,
            sort_array_size: 1_000,
            sort_probes: 50,
            fib_max: 34,
            fib_repeat_n: 30,
            fib_repeats: 100,
            mixed_math_ops: 500,
            mixed_sort_size: 500,
            mixed_hashes: 50,
        }
    }
}

impl Default for ScoreDivisors {
    fn default() -> Self {
        Self {
            prime_numbers: 10_000.0,
            math_operations: 100_000.0,
            multi_threading: 500_000.0,
            memory_operations: 100_000.0,
            string_operations: 50_000.0,
            crypto_operations: 10_000.0,
            record_encoding: 5_000.0,
            algorithms: 100_000.0,
            recursion: 50.0,
            mixed_workload: 10_000.0,
        }
    }
}

impl ScoreDivisors {
    fn all(&self) -> [(&'static str, f64); 10] {
        [
            ("prime_numbers", self.prime_numbers),
            ("math_operations", self.math_operations),
            ("multi_threading", self.multi_threading),
            ("memory_operations", self.memory_operations),
            ("string_operations", self.string_operations),
            ("crypto_operations", self.crypto_operations),
            ("record_encoding", self.record_encoding),
            ("algorithms", self.algorithms),
            ("recursion", self.recursion),
            ("mixed_workload", self.mixed_workload),
        ]
    }
}

impl BenchmarkConfig {
    /// Create a new benchmark configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration with tiny workloads and no pacing, for smoke runs and tests
    pub fn quick() -> Self {
        Self {
            sizes: WorkloadSizes::quick(),
            pause_ms: 0,
            save_history: false,
            ..Self::default()
        }
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.sizes.parallel_workers_per_core == 0 {
            return Err(BenchError::ConfigError(
                "Workers per core must be greater than 0".to_string(),
            ));
        }

        if self.worker_threads == Some(0) {
            return Err(BenchError::ConfigError(
                "Worker thread override must be greater than 0".to_string(),
            ));
        }

        if self.sizes.fib_max > MAX_FIB_INDEX {
            return Err(BenchError::ConfigError(format!(
                "Fibonacci index too large: {} (max: {})",
                self.sizes.fib_max, MAX_FIB_INDEX
            )));
        }

        if self.sizes.fib_repeat_n > self.sizes.fib_max {
            return Err(BenchError::ConfigError(format!(
                "Repeated Fibonacci index {} exceeds fib_max {}",
                self.sizes.fib_repeat_n, self.sizes.fib_max
            )));
        }

        for (name, divisor) in self.divisors.all() {
            if !(divisor.is_finite() && divisor > 0.0) {
                return Err(BenchError::ConfigError(format!(
                    "Score divisor '{}' must be a positive number, got {}",
                    name, divisor
                )));
            }
        }

        Ok(())
    }

    /// Set the inter-workload pause
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause_ms = pause.as_millis() as u64;
        self
    }

    /// Override the detected core count
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = Some(threads);
        self
    }

    /// Fix the RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Pause between workloads
    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }

    /// Logical cores used to size the parallel workloads
    pub fn effective_cores(&self) -> usize {
        self.worker_threads.unwrap_or_else(detect_cores)
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path
    pub fn load_from(config_path: &PathBuf) -> Result<Self> {
        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            BenchError::ConfigError(format!(
                "Failed to read config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            BenchError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        config.validate()?;
        debug!(path = %config_path.display(), "Loaded config file");

        Ok(config)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &PathBuf) -> Result<()> {
        self.validate()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                BenchError::ConfigError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content).map_err(|e| {
            BenchError::ConfigError(format!(
                "Failed to write config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/lapbench/lapbench.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            BenchError::ConfigError("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

/// Number of logical cores available to this process
pub fn detect_cores() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
