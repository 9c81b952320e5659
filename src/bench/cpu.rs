//! Single-threaded CPU workloads
//!
//! Prime counting by trial division, a floating-point math loop, and
//! memoized Fibonacci.

use std::collections::HashMap;
use std::hint::black_box;
use std::time::Instant;

use tracing::debug;

use crate::bench::workload::{WorkloadContext, WorkloadKind};
use crate::models::BenchmarkResult;

/// Trial division over every candidate `2..=sqrt(n)`.
///
/// Returns whether `n` is prime and how many divisions were tried. Even
/// candidates are not skipped; the prime-counting divisor assumes this work.
pub fn trial_division(n: u64) -> (bool, u64) {
    if n < 2 {
        return (false, 0);
    }
    let mut divisions = 0;
    let mut divisor = 2u64;
    while divisor * divisor <= n {
        divisions += 1;
        if n % divisor == 0 {
            return (false, divisions);
        }
        divisor += 1;
    }
    (true, divisions)
}

pub fn is_prime(n: u64) -> bool {
    trial_division(n).0
}

/// Number of primes strictly below `limit`
pub fn count_primes(limit: u64) -> u64 {
    (2..limit).filter(|&n| is_prime(n)).count() as u64
}

pub fn prime_numbers(ctx: &WorkloadContext) -> BenchmarkResult {
    let limit = ctx.sizes.prime_limit;

    let start = Instant::now();
    let found = black_box(count_primes(black_box(limit)));
    let elapsed = start.elapsed();

    debug!(limit, found, "Prime counting finished");
    ctx.result(WorkloadKind::PrimeNumbers, limit, elapsed)
}

/// One step of the floating-point mix
#[inline]
fn math_step(x: f64) -> f64 {
    x.sqrt() * x.sin() / (x + 1.0).cos()
        + (x + 1.0).ln() * (x / 1_000_000.0).exp()
        + x.powf(1.5) / (x + 1.0)
}

pub fn math_operations(ctx: &WorkloadContext) -> BenchmarkResult {
    let iterations = ctx.sizes.math_iterations;

    let start = Instant::now();
    let mut acc = 0.0f64;
    for i in 0..iterations {
        acc += math_step(black_box(i as f64));
    }
    black_box(acc);
    let elapsed = start.elapsed();

    ctx.result(WorkloadKind::MathOperations, iterations, elapsed)
}

/// Fibonacci numbers with a memo table
///
/// Indices above 93 overflow `u64`; callers keep `n` within the validated
/// configuration range.
#[derive(Debug, Default)]
pub struct FibCache {
    memo: HashMap<u32, u64>,
    hits: u64,
}

impl FibCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, n: u32) -> u64 {
        if n < 2 {
            return n as u64;
        }
        if let Some(&value) = self.memo.get(&n) {
            self.hits += 1;
            return value;
        }
        let value = self.get(n - 1).wrapping_add(self.get(n - 2));
        self.memo.insert(n, value);
        value
    }

    /// Number of memoized entries
    pub fn len(&self) -> usize {
        self.memo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }

    /// Lookups answered from the memo table
    pub fn hits(&self) -> u64 {
        self.hits
    }
}

pub fn recursion(ctx: &WorkloadContext) -> BenchmarkResult {
    let sizes = &ctx.sizes;
    let operations = (sizes.fib_max as u64 + 1) + sizes.fib_repeats;

    let start = Instant::now();
    let mut cache = FibCache::new();
    for n in 0..=sizes.fib_max {
        black_box(cache.get(black_box(n)));
    }
    for _ in 0..sizes.fib_repeats {
        black_box(cache.get(black_box(sizes.fib_repeat_n)));
    }
    let elapsed = start.elapsed();

    debug!(entries = cache.len(), hits = cache.hits(), "Fibonacci cache state");
    ctx.result(WorkloadKind::Recursion, operations, elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ScoreDivisors, WorkloadSizes};

    fn context(sizes: WorkloadSizes) -> WorkloadContext {
        WorkloadContext::new(sizes, ScoreDivisors::default(), 2, Some(7))
    }

    #[test]
    fn test_is_prime() {
        let primes: Vec<u64> = (0..30).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert!(!is_prime(7919 * 7927));
        assert!(is_prime(7919));
    }

    #[test]
    fn test_trial_division_tries_every_candidate() {
        // 2..=9 for 97, stopping at the first hit for composites
        assert_eq!(trial_division(97), (true, 8));
        assert_eq!(trial_division(25), (false, 4));
        assert_eq!(trial_division(91), (false, 6));
        assert_eq!(trial_division(3), (true, 0));
        assert_eq!(trial_division(1), (false, 0));
    }

    #[test]
    fn test_trial_division_work_per_number() {
        for n in 2..2_000u64 {
            let (prime, divisions) = trial_division(n);
            if prime {
                let root = (n as f64).sqrt() as u64;
                assert_eq!(divisions, root - 1, "prime {}", n);
            } else if n % 2 == 0 {
                assert_eq!(divisions, 1, "even {}", n);
            }
        }
    }

    #[test]
    fn test_count_primes() {
        assert_eq!(count_primes(0), 0);
        assert_eq!(count_primes(2), 0);
        assert_eq!(count_primes(3), 1);
        assert_eq!(count_primes(100), 25);
        assert_eq!(count_primes(1000), 168);
    }

    #[test]
    fn test_prime_workload_counts_limit() {
        let ctx = context(WorkloadSizes::quick());
        let result = prime_numbers(&ctx);
        assert_eq!(result.name, WorkloadKind::PrimeNumbers.name());
        assert_eq!(result.operations, ctx.sizes.prime_limit);
    }

    #[test]
    fn test_math_step_is_finite() {
        for x in [0.0, 1.0, 12345.0, 999_999.0] {
            assert!(math_step(x).is_finite());
        }
    }

    #[test]
    fn test_math_workload_with_zero_iterations() {
        let sizes = WorkloadSizes {
            math_iterations: 0,
            ..WorkloadSizes::quick()
        };
        let result = math_operations(&context(sizes));
        assert_eq!(result.operations, 0);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_fib_values() {
        let mut cache = FibCache::new();
        assert_eq!(cache.get(0), 0);
        assert_eq!(cache.get(1), 1);
        assert_eq!(cache.get(10), 55);
        assert_eq!(cache.get(35), 9_227_465);
        assert_eq!(cache.get(90), 2_880_067_194_370_816_120);
    }

    #[test]
    fn test_fib_repeats_hit_the_cache() {
        let mut cache = FibCache::new();
        cache.get(30);
        let entries = cache.len();
        let hits = cache.hits();

        for _ in 0..5 {
            assert_eq!(cache.get(30), 832_040);
        }
        assert_eq!(cache.len(), entries);
        assert_eq!(cache.hits(), hits + 5);
    }

    #[test]
    fn test_recursion_operation_count() {
        let ctx = context(WorkloadSizes::quick());
        let result = recursion(&ctx);
        let expected = ctx.sizes.fib_max as u64 + 1 + ctx.sizes.fib_repeats;
        assert_eq!(result.operations, expected);
    }
}
