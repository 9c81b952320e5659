//! Fan-out workloads
//!
//! Each worker runs on a blocking thread and hands its local operation
//! count back through its join handle. The workload sums the counts after
//! every worker has joined.

use std::hint::black_box;
use std::sync::Arc;
use std::time::Instant;

use rand::Rng;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::bench::workload::{WorkloadContext, WorkloadKind};
use crate::models::BenchmarkResult;
use crate::{BenchError, Result};

/// Value range of the mixed workload's sort data
const MIXED_VALUE_RANGE: u32 = 10_000;

/// Run `job(worker_id)` on `workers` blocking tasks and sum their results
pub async fn fan_out<F>(workers: usize, job: F) -> Result<u64>
where
    F: Fn(usize) -> u64 + Send + Sync + 'static,
{
    let job = Arc::new(job);
    let handles: Vec<_> = (0..workers)
        .map(|id| {
            let job = Arc::clone(&job);
            tokio::task::spawn_blocking(move || job(id))
        })
        .collect();

    let mut total = 0u64;
    for (id, handle) in handles.into_iter().enumerate() {
        let count = handle
            .await
            .map_err(|e| BenchError::WorkerError(format!("worker {} failed: {}", id, e)))?;
        total += count;
    }

    debug!(workers, total, "Workers joined");
    Ok(total)
}

fn spin_math(jobs: u64) -> u64 {
    let mut acc = 0.0f64;
    for j in 0..jobs {
        let x = black_box(j as f64);
        acc += x.sqrt() * x.sin() * x.cos();
    }
    black_box(acc);
    jobs
}

pub async fn multi_threading(ctx: &Arc<WorkloadContext>) -> Result<BenchmarkResult> {
    let workers = ctx.cores * ctx.sizes.parallel_workers_per_core;
    let jobs = ctx.sizes.parallel_jobs_per_worker;

    let start = Instant::now();
    let operations = fan_out(workers, move |_| spin_math(jobs)).await?;
    let elapsed = start.elapsed();

    Ok(ctx.result(WorkloadKind::MultiThreading, operations, elapsed))
}

/// One mixed worker: math, then a sort, then hashing
fn mixed_job(ctx: &WorkloadContext, id: usize) -> u64 {
    let sizes = &ctx.sizes;

    let mut acc = 0.0f64;
    for i in 0..sizes.mixed_math_ops {
        let x = black_box(i as f64);
        acc += x.sqrt() * x.sin();
    }
    black_box(acc);

    let mut rng = ctx.rng(WorkloadKind::MixedWorkload, id);
    let mut values: Vec<u32> = (0..sizes.mixed_sort_size)
        .map(|_| rng.gen_range(0..MIXED_VALUE_RANGE))
        .collect();
    values.sort_unstable();
    black_box(&values);

    for i in 0..sizes.mixed_hashes {
        let payload = format!("worker_{}_data_{}", id, i);
        black_box(Sha256::digest(payload.as_bytes()));
    }

    sizes.mixed_math_ops + values.len() as u64 + sizes.mixed_hashes
}

pub async fn mixed_workload(ctx: &Arc<WorkloadContext>) -> Result<BenchmarkResult> {
    let workers = ctx.cores;
    let shared = Arc::clone(ctx);

    let start = Instant::now();
    let operations = fan_out(workers, move |id| mixed_job(&shared, id)).await?;
    let elapsed = start.elapsed();

    Ok(ctx.result(WorkloadKind::MixedWorkload, operations, elapsed))
}
