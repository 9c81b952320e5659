use std::io::BufReader;

use lapbench::bench::{Orchestrator, ProgressPrinter};
use lapbench::config::persistence::HistoryStorage;
use lapbench::config::BenchmarkConfig;
use lapbench::error::{is_fatal, user_friendly_message};
use lapbench::report::{print_report, render_header, render_history, Palette};
use lapbench::util::wait_for_enter;
use lapbench::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("❌ {}", user_friendly_message(&e));
        if is_fatal(&e) {
            std::process::exit(1);
        }
    }
}

async fn run() -> Result<()> {
    let palette = Palette::detect();

    println!();
    println!("🔥 This program will load every CPU core!");
    println!("⚠️  Make sure the laptop is plugged in");
    println!("⏱️  The run takes about 2-3 minutes");
    println!();
    wait_for_enter(
        "Press Enter to start the benchmark...",
        BufReader::new(std::io::stdin()),
    )
    .await?;

    let config = BenchmarkConfig::load()?;
    info!(?config, "Configuration loaded");

    let mut orchestrator =
        Orchestrator::new(config.clone())?.with_printer(ProgressPrinter::new(palette));

    println!();
    print!("{}", render_header(orchestrator.cores(), chrono::Local::now(), &palette));
    println!();

    let report = orchestrator.run().await?;
    print_report(&report, &palette);
    info!(summary = %report.summary(), "Run finished");

    if config.save_history {
        match HistoryStorage::new().and_then(|storage| storage.record_run(report.clone())) {
            Ok(history) => {
                println!();
                print!("{}", render_history(report.total_score, &history, &palette));
            }
            Err(e) => warn!(error = %e, "Failed to save run history"),
        }
    }

    println!();
    println!("📊 Save or screenshot the results!");
    println!("🔄 Restart the program to run the benchmark again");
    println!();
    Ok(())
}
