//! Run history persistence
//!
//! Finished runs are appended to a versioned JSON file under the user's data
//! directory. The file keeps at most `MAX_RESULTS_HISTORY` runs, oldest
//! dropped first.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::RunReport;
use crate::{BenchError, Result, APP_NAME, HISTORY_FILE, MAX_RESULTS_HISTORY};

const HISTORY_VERSION: u32 = 1;

/// Runs shown in the summary after a run is recorded
pub const RECENT_RUNS_SHOWN: usize = 5;

/// What the history looked like around a newly recorded run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySummary {
    /// Best total score before this run was added
    pub previous_best: Option<u64>,
    /// Totals of the newest runs, oldest first, this run included
    pub recent_totals: Vec<u64>,
    /// Runs on record after the append
    pub stored_runs: usize,
}

/// Run history storage manager
#[derive(Debug)]
pub struct HistoryStorage {
    history_path: PathBuf,
}

/// On-disk layout of the history file
#[derive(Debug, Serialize, Deserialize)]
struct HistoryFile {
    version: u32,
    runs: Vec<RunReport>,
}

impl HistoryStorage {
    /// Storage at the standard location
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(Self::history_file_path()?))
    }

    /// Storage backed by an explicit file
    pub fn with_path(history_path: impl Into<PathBuf>) -> Self {
        Self {
            history_path: history_path.into(),
        }
    }

    /// `$DATA_DIR/lapbench/history.json`
    pub fn history_file_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            BenchError::PersistenceError("Unable to determine data directory".to_string())
        })?;

        Ok(data_dir.join(APP_NAME).join(HISTORY_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.history_path
    }

    /// All stored runs, oldest first. A missing file is an empty history.
    pub fn load_runs(&self) -> Result<Vec<RunReport>> {
        if !self.history_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.history_path).map_err(|e| {
            BenchError::PersistenceError(format!(
                "Failed to read history file {}: {}",
                self.history_path.display(),
                e
            ))
        })?;

        let file: HistoryFile = serde_json::from_str(&content).map_err(|e| {
            BenchError::PersistenceError(format!(
                "Failed to parse history file {}: {}",
                self.history_path.display(),
                e
            ))
        })?;

        if file.version != HISTORY_VERSION {
            return Err(BenchError::PersistenceError(format!(
                "Unsupported history file version {} (expected {})",
                file.version, HISTORY_VERSION
            )));
        }

        Ok(file.runs)
    }

    /// Append a run, dropping the oldest ones beyond the history limit
    pub fn append_run(&self, report: RunReport) -> Result<()> {
        let mut runs = self.load_runs()?;
        runs.push(report);

        if runs.len() > MAX_RESULTS_HISTORY {
            let excess = runs.len() - MAX_RESULTS_HISTORY;
            runs.drain(..excess);
        }

        self.write_runs(runs)
    }

    fn write_runs(&self, runs: Vec<RunReport>) -> Result<()> {
        if let Some(parent) = self.history_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                BenchError::PersistenceError(format!(
                    "Failed to create history directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let count = runs.len();
        let file = HistoryFile {
            version: HISTORY_VERSION,
            runs,
        };
        let content = serde_json::to_string_pretty(&file)?;

        fs::write(&self.history_path, content).map_err(|e| {
            BenchError::PersistenceError(format!(
                "Failed to write history file {}: {}",
                self.history_path.display(),
                e
            ))
        })?;

        debug!(path = %self.history_path.display(), runs = count, "History saved");
        Ok(())
    }

    pub fn count_runs(&self) -> Result<usize> {
        Ok(self.load_runs()?.len())
    }

    /// The most recent `count` runs, oldest first
    pub fn recent_runs(&self, count: usize) -> Result<Vec<RunReport>> {
        let mut runs = self.load_runs()?;
        if runs.len() > count {
            runs.drain(..runs.len() - count);
        }
        Ok(runs)
    }

    /// Best total score on record
    pub fn best_total_score(&self) -> Result<Option<u64>> {
        Ok(self.load_runs()?.iter().map(|r| r.total_score).max())
    }

    /// Append `report` and summarize the history around it
    pub fn record_run(&self, report: RunReport) -> Result<HistorySummary> {
        let previous_best = self.best_total_score()?;
        self.append_run(report)?;

        Ok(HistorySummary {
            previous_best,
            recent_totals: self
                .recent_runs(RECENT_RUNS_SHOWN)?
                .iter()
                .map(|r| r.total_score)
                .collect(),
            stored_runs: self.count_runs()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BenchmarkResult, SystemInfo};
    use chrono::Utc;
    use std::time::Duration;
    use tempfile::TempDir;

    fn create_test_report(total_score: u64) -> RunReport {
        RunReport {
            timestamp: Utc::now(),
            system_info: SystemInfo::detect(4),
            results: vec![BenchmarkResult {
                name: "Prime counting".to_string(),
                duration: Duration::from_millis(800),
                operations: 1_000_000,
                ops_per_second: 1_250_000.0,
                score: total_score,
            }],
            total_score,
            total_duration: Duration::from_secs(12),
        }
    }

    fn storage_in(dir: &TempDir) -> HistoryStorage {
        HistoryStorage::with_path(dir.path().join("nested").join(HISTORY_FILE))
    }

    #[test]
    fn test_standard_path() {
        if let Ok(path) = HistoryStorage::history_file_path() {
            assert!(path.ends_with(Path::new(APP_NAME).join(HISTORY_FILE)));
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        assert!(storage.load_runs().unwrap().is_empty());
        assert_eq!(storage.best_total_score().unwrap(), None);
    }

    #[test]
    fn test_append_and_load() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        let report = create_test_report(321);

        storage.append_run(report.clone()).unwrap();

        let runs = storage.load_runs().unwrap();
        assert_eq!(runs, vec![report]);
        assert!(storage.path().exists());
    }

    #[test]
    fn test_rotation_drops_oldest() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);

        for i in 0..MAX_RESULTS_HISTORY + 5 {
            storage.append_run(create_test_report(i as u64)).unwrap();
        }

        let runs = storage.load_runs().unwrap();
        assert_eq!(runs.len(), MAX_RESULTS_HISTORY);
        assert_eq!(runs[0].total_score, 5);
        assert_eq!(runs[runs.len() - 1].total_score, (MAX_RESULTS_HISTORY + 4) as u64);
    }

    #[test]
    fn test_recent_and_best() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        for score in [10, 90, 40, 20] {
            storage.append_run(create_test_report(score)).unwrap();
        }

        let recent: Vec<u64> = storage
            .recent_runs(2)
            .unwrap()
            .iter()
            .map(|r| r.total_score)
            .collect();
        assert_eq!(recent, vec![40, 20]);
        assert_eq!(storage.recent_runs(10).unwrap().len(), 4);
        assert_eq!(storage.best_total_score().unwrap(), Some(90));
        assert_eq!(storage.count_runs().unwrap(), 4);
    }

    #[test]
    fn test_record_run_summary() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);

        let first = storage.record_run(create_test_report(50)).unwrap();
        assert_eq!(first.previous_best, None);
        assert_eq!(first.recent_totals, vec![50]);
        assert_eq!(first.stored_runs, 1);

        for score in [70, 30, 60, 20, 40] {
            storage.record_run(create_test_report(score)).unwrap();
        }
        let summary = storage.record_run(create_test_report(65)).unwrap();
        assert_eq!(summary.previous_best, Some(70));
        assert_eq!(summary.recent_totals, vec![30, 60, 20, 40, 65]);
        assert_eq!(summary.stored_runs, 7);
    }

    #[test]
    fn test_corrupt_file_is_persistence_error() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        fs::create_dir_all(storage.path().parent().unwrap()).unwrap();
        fs::write(storage.path(), "{ not json").unwrap();

        let err = storage.load_runs().unwrap_err();
        assert!(matches!(err, BenchError::PersistenceError(_)));
    }

    #[test]
    fn test_unknown_version_rejected() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        fs::create_dir_all(storage.path().parent().unwrap()).unwrap();
        fs::write(storage.path(), r#"{"version": 99, "runs": []}"#).unwrap();

        assert!(storage.load_runs().is_err());
    }
}
