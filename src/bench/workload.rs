//! Workload catalogue and dispatch
//!
//! Names the ten workloads in their fixed suite order, carries the shared
//! run context, and routes each kind to its implementation.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::bench::progress::{notify, ProgressMessage, ProgressSender};
use crate::bench::{cpu, data, memory, parallel};
use crate::config::{BenchmarkConfig, ScoreDivisors, WorkloadSizes};
use crate::models::BenchmarkResult;
use crate::util::units::format_ops;
use crate::Result;

/// The ten workloads, in suite order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkloadKind {
    PrimeNumbers,
    MathOperations,
    MultiThreading,
    MemoryOperations,
    StringOperations,
    CryptoOperations,
    RecordEncoding,
    Algorithms,
    Recursion,
    MixedWorkload,
}

impl WorkloadKind {
    /// Fixed execution order; the report layout depends on it
    pub const ALL: [WorkloadKind; 10] = [
        WorkloadKind::PrimeNumbers,
        WorkloadKind::MathOperations,
        WorkloadKind::MultiThreading,
        WorkloadKind::MemoryOperations,
        WorkloadKind::StringOperations,
        WorkloadKind::CryptoOperations,
        WorkloadKind::RecordEncoding,
        WorkloadKind::Algorithms,
        WorkloadKind::Recursion,
        WorkloadKind::MixedWorkload,
    ];

    /// 1-based position in [`WorkloadKind::ALL`]
    pub fn position(&self) -> usize {
        Self::ALL
            .iter()
            .position(|k| k == self)
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    pub fn name(&self) -> &'static str {
        match self {
            WorkloadKind::PrimeNumbers => "Prime counting",
            WorkloadKind::MathOperations => "Math operations",
            WorkloadKind::MultiThreading => "Multi-threaded math",
            WorkloadKind::MemoryOperations => "Memory operations",
            WorkloadKind::StringOperations => "String processing",
            WorkloadKind::CryptoOperations => "Cryptographic hashing",
            WorkloadKind::RecordEncoding => "JSON record encoding",
            WorkloadKind::Algorithms => "Algorithms (sort/search)",
            WorkloadKind::Recursion => "Recursion (memoized Fibonacci)",
            WorkloadKind::MixedWorkload => "Mixed workload",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WorkloadKind::PrimeNumbers => "🔢",
            WorkloadKind::MathOperations => "➗",
            WorkloadKind::MultiThreading => "🔄",
            WorkloadKind::MemoryOperations => "💾",
            WorkloadKind::StringOperations => "📝",
            WorkloadKind::CryptoOperations => "🔐",
            WorkloadKind::RecordEncoding => "📦",
            WorkloadKind::Algorithms => "🎯",
            WorkloadKind::Recursion => "🔁",
            WorkloadKind::MixedWorkload => "⚡",
        }
    }

    /// Score divisor for this workload
    pub fn divisor(&self, divisors: &ScoreDivisors) -> f64 {
        match self {
            WorkloadKind::PrimeNumbers => divisors.prime_numbers,
            WorkloadKind::MathOperations => divisors.math_operations,
            WorkloadKind::MultiThreading => divisors.multi_threading,
            WorkloadKind::MemoryOperations => divisors.memory_operations,
            WorkloadKind::StringOperations => divisors.string_operations,
            WorkloadKind::CryptoOperations => divisors.crypto_operations,
            WorkloadKind::RecordEncoding => divisors.record_encoding,
            WorkloadKind::Algorithms => divisors.algorithms,
            WorkloadKind::Recursion => divisors.recursion,
            WorkloadKind::MixedWorkload => divisors.mixed_workload,
        }
    }

    /// Whether this workload fans out over several worker tasks
    pub fn is_parallel(&self) -> bool {
        matches!(self, WorkloadKind::MultiThreading | WorkloadKind::MixedWorkload)
    }
}

/// Everything a workload needs besides its own code
#[derive(Debug, Clone)]
pub struct WorkloadContext {
    pub sizes: WorkloadSizes,
    pub divisors: ScoreDivisors,
    /// Detected (or overridden) logical core count
    pub cores: usize,
    seed: Option<u64>,
}

impl WorkloadContext {
    pub fn new(
        sizes: WorkloadSizes,
        divisors: ScoreDivisors,
        cores: usize,
        seed: Option<u64>,
    ) -> Self {
        Self {
            sizes,
            divisors,
            cores: cores.max(1),
            seed,
        }
    }

    pub fn from_config(config: &BenchmarkConfig) -> Self {
        Self::new(
            config.sizes.clone(),
            config.divisors.clone(),
            config.effective_cores(),
            config.seed,
        )
    }

    /// Independent random stream for one workload (and one worker within it)
    pub fn rng(&self, kind: WorkloadKind, worker: usize) -> SmallRng {
        let base = self.seed.unwrap_or_else(clock_seed);
        let stream = ((kind.position() as u64) << 32) | worker as u64;
        SmallRng::seed_from_u64(base ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// Wrap a raw measurement into a result for `kind`
    pub fn result(
        &self,
        kind: WorkloadKind,
        operations: u64,
        elapsed: std::time::Duration,
    ) -> BenchmarkResult {
        BenchmarkResult::from_measurement(
            kind.name(),
            operations,
            elapsed,
            kind.divisor(&self.divisors),
        )
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Run one workload: announce it, do the work, return its single result
pub async fn run_workload(
    kind: WorkloadKind,
    ctx: Arc<WorkloadContext>,
    progress: &ProgressSender,
) -> Result<BenchmarkResult> {
    notify(progress, ProgressMessage::starting(kind));
    debug!(
        workload = kind.name(),
        position = kind.position(),
        parallel = kind.is_parallel(),
        "Starting workload"
    );

    let result = match kind {
        WorkloadKind::MultiThreading => parallel::multi_threading(&ctx).await?,
        WorkloadKind::MixedWorkload => parallel::mixed_workload(&ctx).await?,
        _ => tokio::task::spawn_blocking(move || run_sequential(kind, &ctx)).await??,
    };

    info!(
        workload = kind.name(),
        operations = result.operations,
        throughput = %format_ops(result.ops_per_second),
        score = result.score,
        elapsed_ms = result.duration.as_millis() as u64,
        "Workload completed"
    );
    Ok(result)
}

/// Single-threaded workloads, executed on a blocking thread
fn run_sequential(kind: WorkloadKind, ctx: &WorkloadContext) -> Result<BenchmarkResult> {
    match kind {
        WorkloadKind::PrimeNumbers => Ok(cpu::prime_numbers(ctx)),
        WorkloadKind::MathOperations => Ok(cpu::math_operations(ctx)),
        WorkloadKind::MemoryOperations => Ok(memory::memory_operations(ctx)),
        WorkloadKind::StringOperations => Ok(data::string_operations(ctx)),
        WorkloadKind::CryptoOperations => Ok(data::crypto_operations(ctx)),
        WorkloadKind::RecordEncoding => data::record_encoding(ctx),
        WorkloadKind::Algorithms => Ok(memory::algorithms(ctx)),
        WorkloadKind::Recursion => Ok(cpu::recursion(ctx)),
        WorkloadKind::MultiThreading | WorkloadKind::MixedWorkload => {
            Err(crate::BenchError::WorkloadError(format!(
                "{} is a parallel workload",
                kind.name()
            )))
        }
    }
}
