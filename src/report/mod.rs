//! Final report rendering
//!
//! Turns a finished [`RunReport`] into the human-readable table, summary,
//! rating and recommendations. Rendering is pure; printing is a thin
//! wrapper around it.

use std::fmt::Write as _;

use crate::config::persistence::HistorySummary;
use crate::models::RunReport;
use crate::util::units::{format_duration, format_total_time, rule};

pub mod palette;
pub mod rating;

pub use palette::{paint, Palette};
pub use rating::Rating;

/// Width of the `=` frame lines
pub const FRAME_WIDTH: usize = 60;
/// Width of the `-` table rules
pub const TABLE_WIDTH: usize = 70;

/// Banner printed before the first workload
pub fn render_header(
    cores: usize,
    started: chrono::DateTime<chrono::Local>,
    palette: &Palette,
) -> String {
    let mut out = String::new();
    let frame = paint(&rule('=', FRAME_WIDTH), palette.frame);

    let _ = writeln!(out, "{}", frame);
    let _ = writeln!(out, "{}", paint("🚀 LAPTOP PERFORMANCE BENCHMARK 🚀", palette.title));
    let _ = writeln!(out, "{}", frame);
    let _ = writeln!(out, "💻 Processor: {} cores/threads", cores);
    let _ = writeln!(out, "⏰ Started at: {}", started.format("%H:%M:%S"));
    out
}

/// Render the full results report
pub fn render_report(report: &RunReport, palette: &Palette) -> String {
    let mut out = String::new();
    let green_frame = paint(&rule('=', FRAME_WIDTH), palette.good);
    let table_rule = paint(&rule('-', TABLE_WIDTH), palette.frame);

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", green_frame);
    let _ = writeln!(out, "{}", paint("📊 BENCHMARK RESULTS 📊", palette.good));
    let _ = writeln!(out, "{}", green_frame);
    let _ = writeln!(out);

    let _ = writeln!(out, "{:<35} {:>10} {:>12} {:>8}", "TEST", "TIME", "OPS/SEC", "SCORE");
    let _ = writeln!(out, "{}", table_rule);

    for result in &report.results {
        let score = paint(&format!("{:>8}", result.score), palette.score_color(result.score));
        let _ = writeln!(
            out,
            "{:<35} {:>10} {:>12.0} {}",
            result.name,
            format_duration(result.duration),
            result.ops_per_second,
            score
        );
    }

    let _ = writeln!(out, "{}", table_rule);

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", paint("📈 SUMMARY:", palette.section));
    let _ = writeln!(out, "   Total run time: {}", format_total_time(report.total_duration));
    let _ = writeln!(
        out,
        "   Total score: {}",
        paint(&report.total_score.to_string(), palette.highlight)
    );
    let _ = writeln!(
        out,
        "   Average score: {}",
        paint(&report.average_score().to_string(), palette.highlight)
    );
    let _ = writeln!(out, "   Logical cores: {}", report.system_info.logical_cores);

    let rating = report.rating();
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} {}",
        paint("🏆 FINAL RATING:", palette.title),
        paint(rating.headline(), palette.tone(rating.tone()))
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", paint("💡 RECOMMENDATIONS:", palette.frame));
    for line in rating.recommendations() {
        let _ = writeln!(out, "   • {}", line);
    }

    let frame = paint(&rule('=', FRAME_WIDTH), palette.frame);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", frame);
    let _ = writeln!(out, "✅ Benchmark complete!");
    let _ = writeln!(out, "{}", frame);
    out
}

/// Lines comparing `total_score` with the saved run history
pub fn render_history(total_score: u64, history: &HistorySummary, palette: &Palette) -> String {
    let mut out = String::new();

    match history.previous_best {
        Some(best) if total_score > best => {
            let _ = writeln!(out, "{}", paint("🥇 New personal best!", palette.good));
        }
        Some(best) => {
            let _ = writeln!(out, "   Previous best total score: {}", best);
        }
        None => {}
    }

    if !history.recent_totals.is_empty() {
        let totals: Vec<String> = history.recent_totals.iter().map(u64::to_string).collect();
        let _ = writeln!(out, "   Recent totals: {}", totals.join(" → "));
    }
    let _ = writeln!(out, "   Runs on record: {}", history.stored_runs);
    out
}

/// Write the report to standard output
pub fn print_report(report: &RunReport, palette: &Palette) {
    print!("{}", render_report(report, palette));
}
