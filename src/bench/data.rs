//! Text, hashing and serialization workloads

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::hint::black_box;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::bench::workload::{WorkloadContext, WorkloadKind};
use crate::models::BenchmarkResult;
use crate::{BenchError, Result};

const BASE_TEXT: &str = "This is a test string used to measure text processing throughput";
const HASH_INPUT: &[u8] =
    b"Test payload for hashing that measures the cryptographic throughput of the system";

/// Appends and length probes per string iteration
const STRING_APPENDS: u64 = 10;
const STRING_PROBES: u64 = 5;

pub fn string_operations(ctx: &WorkloadContext) -> BenchmarkResult {
    let iterations = ctx.sizes.string_iterations;

    let start = Instant::now();
    for _ in 0..iterations {
        let mut text = String::from(BASE_TEXT);
        for j in 0..STRING_APPENDS {
            let _ = write!(text, " {}", j);
        }
        for _ in 0..STRING_PROBES {
            black_box(black_box(&text).len());
        }
    }
    let elapsed = start.elapsed();

    let operations = iterations * (STRING_APPENDS + STRING_PROBES);
    ctx.result(WorkloadKind::StringOperations, operations, elapsed)
}

pub fn crypto_operations(ctx: &WorkloadContext) -> BenchmarkResult {
    let iterations = ctx.sizes.hash_iterations;

    let start = Instant::now();
    for _ in 0..iterations {
        black_box(md5::compute(black_box(HASH_INPUT)));
        black_box(Sha256::digest(black_box(HASH_INPUT)));
    }
    let elapsed = start.elapsed();

    ctx.result(WorkloadKind::CryptoOperations, iterations * 2, elapsed)
}

/// Nested record encoded and decoded by the JSON workload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRecord {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub age: u32,
    pub active: bool,
    pub tags: Vec<String>,
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl TestRecord {
    pub fn sample(i: u64) -> Self {
        let mut metadata = BTreeMap::new();
        metadata.insert("key1".to_string(), serde_json::Value::from("value1"));
        metadata.insert("key2".to_string(), serde_json::Value::from(123));
        metadata.insert("key3".to_string(), serde_json::Value::from(true));

        Self {
            id: i,
            name: format!("User_{}", i),
            email: format!("user{}@example.com", i),
            age: 20 + (i % 50) as u32,
            active: i % 2 == 0,
            tags: vec!["tag1".to_string(), "tag2".to_string(), "tag3".to_string()],
            metadata,
        }
    }
}

pub fn record_encoding(ctx: &WorkloadContext) -> Result<BenchmarkResult> {
    let iterations = ctx.sizes.record_iterations;

    let start = Instant::now();
    for i in 0..iterations {
        let record = TestRecord::sample(i);
        let encoded = serde_json::to_vec(&record).map_err(|e| {
            BenchError::WorkloadError(format!("Failed to encode record {}: {}", i, e))
        })?;
        let decoded: TestRecord = serde_json::from_slice(&encoded).map_err(|e| {
            BenchError::WorkloadError(format!("Failed to decode record {}: {}", i, e))
        })?;
        black_box(decoded);
    }
    let elapsed = start.elapsed();

    Ok(ctx.result(WorkloadKind::RecordEncoding, iterations * 2, elapsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ScoreDivisors, WorkloadSizes};

    fn context() -> WorkloadContext {
        WorkloadContext::new(WorkloadSizes::quick(), ScoreDivisors::default(), 2, Some(5))
    }

    #[test]
    fn test_string_operation_count() {
        let ctx = context();
        let result = string_operations(&ctx);
        assert_eq!(result.operations, ctx.sizes.string_iterations * 15);
    }

    #[test]
    fn test_crypto_operation_count() {
        let ctx = context();
        let result = crypto_operations(&ctx);
        assert_eq!(result.operations, ctx.sizes.hash_iterations * 2);
    }

    #[test]
    fn test_hash_input_digests() {
        assert_eq!(md5::compute(b"").0.len(), 16);
        assert_eq!(Sha256::digest(HASH_INPUT).len(), 32);
    }

    #[test]
    fn test_record_survives_encoding() {
        let record = TestRecord::sample(7);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"email\":\"user7@example.com\""));
        let decoded: TestRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, record);
        assert_eq!(decoded.age, 27);
        assert!(!decoded.active);
    }

    #[test]
    fn test_record_encoding_count() {
        let ctx = context();
        let result = record_encoding(&ctx).unwrap();
        assert_eq!(result.operations, ctx.sizes.record_iterations * 2);
    }
}
