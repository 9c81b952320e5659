use lapbench::bench::{Orchestrator, WorkloadKind};
use lapbench::config::persistence::HistoryStorage;
use lapbench::config::BenchmarkConfig;
use lapbench::report::{render_history, render_report, Palette, Rating};

fn quick_config() -> BenchmarkConfig {
    BenchmarkConfig::quick().with_worker_threads(2).with_seed(2024)
}

#[tokio::test]
async fn test_quick_suite_end_to_end() {
    let mut orchestrator = Orchestrator::new(quick_config()).unwrap();
    let report = orchestrator.run().await.unwrap();

    assert_eq!(report.results.len(), WorkloadKind::ALL.len());
    assert!(report.is_consistent());
    assert_eq!(report.rating(), Rating::from_total_score(report.total_score));

    for result in &report.results {
        assert!(result.ops_per_second.is_finite());
        assert!(result.ops_per_second >= 0.0);
    }

    let text = render_report(&report, &Palette::plain());
    for kind in WorkloadKind::ALL {
        assert!(text.contains(kind.name()), "missing {} in report", kind.name());
    }
    assert!(text.contains(&format!("Total score: {}", report.total_score)));
}

#[tokio::test]
async fn test_parallel_totals_scale_with_cores() {
    let config = quick_config().with_worker_threads(3);
    let sizes = config.sizes.clone();
    let mut orchestrator = Orchestrator::new(config).unwrap();
    let report = orchestrator.run().await.unwrap();

    let multi = &report.results[WorkloadKind::MultiThreading.position() - 1];
    assert_eq!(
        multi.operations,
        3 * sizes.parallel_workers_per_core as u64 * sizes.parallel_jobs_per_worker
    );

    let mixed = &report.results[WorkloadKind::MixedWorkload.position() - 1];
    let per_worker = sizes.mixed_math_ops + sizes.mixed_sort_size as u64 + sizes.mixed_hashes;
    assert_eq!(mixed.operations, 3 * per_worker);
}

#[tokio::test]
async fn test_run_saved_to_history() {
    let dir = tempfile::tempdir().unwrap();
    let storage = HistoryStorage::with_path(dir.path().join("history.json"));

    let mut orchestrator = Orchestrator::new(quick_config()).unwrap();
    let first = orchestrator.run().await.unwrap();
    let summary = storage.record_run(first.clone()).unwrap();
    assert_eq!(summary.previous_best, None);
    assert_eq!(summary.recent_totals, vec![first.total_score]);

    let second = orchestrator.run().await.unwrap();
    let summary = storage.record_run(second.clone()).unwrap();
    assert_eq!(summary.previous_best, Some(first.total_score));
    assert_eq!(summary.stored_runs, 2);

    let text = render_history(second.total_score, &summary, &Palette::plain());
    assert!(text.contains("Runs on record: 2"));

    let runs = storage.load_runs().unwrap();
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[1].total_score, second.total_score);
    assert_eq!(runs[1].results.len(), 10);
}
