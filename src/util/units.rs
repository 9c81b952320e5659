//! Units formatting utilities
//!
//! Provides human-readable formatting of sizes, durations, throughput,
//! and the separator lines used by the report.

use std::time::Duration;

/// Format bytes into human-readable size with appropriate units
///
/// # Examples
/// ```
/// use lapbench::util::units::format_bytes;
///
/// assert_eq!(format_bytes(1024), "1.0 KiB");
/// assert_eq!(format_bytes(80_000_000), "76.3 MiB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB", "PiB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Format a workload duration, rounded to milliseconds
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use lapbench::util::units::format_duration;
///
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if total_secs >= 3600 {
        let hours = total_secs / 3600;
        let minutes = (total_secs % 3600) / 60;
        let seconds = total_secs % 60;
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if total_secs >= 60 {
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{}m {}s", minutes, seconds)
    } else if total_secs > 0 {
        if millis > 0 {
            format!("{}.{:02}s", total_secs, millis / 10)
        } else {
            format!("{}s", total_secs)
        }
    } else if millis > 0 {
        format!("{}ms", millis)
    } else {
        format!("{}µs", duration.as_micros())
    }
}

/// Format the whole-run wall time, rounded to seconds
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use lapbench::util::units::format_total_time;
///
/// assert_eq!(format_total_time(Duration::from_millis(125_600)), "2m 6s");
/// ```
pub fn format_total_time(duration: Duration) -> String {
    let rounded = Duration::from_secs(duration.as_secs_f64().round() as u64);
    humantime::format_duration(rounded).to_string()
}

/// Format operations per second with a magnitude suffix
///
/// # Examples
/// ```
/// use lapbench::util::units::format_ops;
///
/// assert_eq!(format_ops(1500.0), "1.5K ops/s");
/// assert_eq!(format_ops(2500000.0), "2.5M ops/s");
/// ```
pub fn format_ops(ops_per_second: f64) -> String {
    if ops_per_second >= 1_000_000_000.0 {
        format!("{:.1}G ops/s", ops_per_second / 1_000_000_000.0)
    } else if ops_per_second >= 1_000_000.0 {
        format!("{:.1}M ops/s", ops_per_second / 1_000_000.0)
    } else if ops_per_second >= 1_000.0 {
        format!("{:.1}K ops/s", ops_per_second / 1_000.0)
    } else {
        format!("{:.0} ops/s", ops_per_second)
    }
}

/// A separator line of `width` copies of `fill`
pub fn rule(fill: char, width: usize) -> String {
    std::iter::repeat(fill).take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KiB");
        assert_eq!(format_bytes(1048576), "1.0 MiB");
        assert_eq!(format_bytes(1073741824), "1.0 GiB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
        assert_eq!(format_duration(Duration::from_secs(30)), "30s");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_secs(3661)), "1h 1m 1s");
        assert_eq!(format_duration(Duration::from_micros(250)), "250µs");
        assert_eq!(format_duration(Duration::ZERO), "0µs");
    }

    #[test]
    fn test_format_total_time() {
        assert_eq!(format_total_time(Duration::from_millis(400)), "0s");
        assert_eq!(format_total_time(Duration::from_millis(1600)), "2s");
        assert_eq!(format_total_time(Duration::from_secs(150)), "2m 30s");
    }

    #[test]
    fn test_format_ops() {
        assert_eq!(format_ops(500.0), "500 ops/s");
        assert_eq!(format_ops(1500.0), "1.5K ops/s");
        assert_eq!(format_ops(2500000.0), "2.5M ops/s");
        assert_eq!(format_ops(3_200_000_000.0), "3.2G ops/s");
    }

    #[test]
    fn test_rule() {
        assert_eq!(rule('=', 5), "=====");
        assert_eq!(rule('-', 0), "");
        assert_eq!(rule('=', 60).chars().count(), 60);
    }
}
