//! Memory and sorting workloads

use std::hint::black_box;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::Rng;
use tracing::debug;

use crate::bench::workload::{WorkloadContext, WorkloadKind};
use crate::models::BenchmarkResult;
use crate::util::units::format_bytes;

/// Upper bound (exclusive) for the values both workloads sort and probe
pub const VALUE_RANGE: u32 = 1_000_000;

/// Whether a probe's insertion index lands inside `sorted`.
///
/// Uses insertion-point semantics, so a target larger than every element
/// reports `false` and an empty slice never matches.
pub fn probe_sorted(sorted: &[u32], target: u32) -> bool {
    sorted.partition_point(|&v| v < target) < sorted.len()
}

fn random_values(rng: &mut SmallRng, len: usize, range: u32) -> Vec<u32> {
    (0..len).map(|_| rng.gen_range(0..range)).collect()
}

/// Sort `values` and run `probes` random lookups; returns the probes that landed
fn sort_and_probe(rng: &mut SmallRng, values: &mut [u32], probes: u64, range: u32) -> u64 {
    values.sort_unstable();
    let mut found = 0;
    for _ in 0..probes {
        let target = rng.gen_range(0..range);
        if probe_sorted(values, black_box(target)) {
            found += 1;
        }
    }
    found
}

pub fn memory_operations(ctx: &WorkloadContext) -> BenchmarkResult {
    let size = ctx.sizes.memory_array_size;
    let probes = ctx.sizes.memory_probes;
    let mut rng = ctx.rng(WorkloadKind::MemoryOperations, 0);

    debug!(
        elements = size,
        bytes = %format_bytes((size * std::mem::size_of::<u32>()) as u64),
        "Allocating memory workload array"
    );

    let start = Instant::now();
    let mut values = random_values(&mut rng, size, VALUE_RANGE);
    let found = sort_and_probe(&mut rng, &mut values, probes, VALUE_RANGE);
    black_box(&values);
    let elapsed = start.elapsed();

    debug!(probes, found, "Memory probes finished");
    ctx.result(WorkloadKind::MemoryOperations, size as u64 + found, elapsed)
}

/// One sort-and-search round; returns the sorted data
fn sort_round(rng: &mut SmallRng, size: usize, probes: u64) -> Vec<u32> {
    let mut values = random_values(rng, size, VALUE_RANGE);
    sort_and_probe(rng, &mut values, probes, VALUE_RANGE);
    values
}

pub fn algorithms(ctx: &WorkloadContext) -> BenchmarkResult {
    let sizes = &ctx.sizes;
    let mut rng = ctx.rng(WorkloadKind::Algorithms, 0);

    let start = Instant::now();
    let mut operations = 0u64;
    for _ in 0..sizes.sort_rounds {
        black_box(sort_round(&mut rng, sizes.sort_array_size, sizes.sort_probes));
        operations += sizes.sort_array_size as u64 + sizes.sort_probes;
    }
    let elapsed = start.elapsed();

    ctx.result(WorkloadKind::Algorithms, operations, elapsed)
}
