//! Formatting helpers shared by the scanner, history and reports.

use chrono::{DateTime, Utc};

const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Human readable file size with up to two decimals ("1.5 KB", "0 Bytes")
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let k = 1024f64;
    let exponent = ((bytes as f64).ln() / k.ln()).floor() as usize;
    let exponent = exponent.min(SIZE_UNITS.len() - 1);
    let value = bytes as f64 / k.powi(exponent as i32);

    // Two decimals, trailing zeros dropped
    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[exponent])
}

/// Duration label used in the scan history ("3m 42s")
pub fn format_duration(seconds: u64) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}

/// Relative age label derived from a timestamp.
///
/// Under a minute is "Just now", then minutes up to an hour, then hours.
pub fn relative_time_label(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes().max(0);

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{} {} ago", minutes, if minutes == 1 { "minute" } else { "minutes" })
    } else {
        let hours = minutes / 60;
        format!("{} {} ago", hours, if hours == 1 { "hour" } else { "hours" })
    }
}

/// Shorten a path for progress display, keeping the tail
pub fn truncate_display(name: &str, max_chars: usize) -> String {
    let count = name.chars().count();
    if count <= max_chars || max_chars <= 3 {
        return name.to_string();
    }

    let tail: String = name.chars().skip(count - (max_chars - 3)).collect();
    format!("...{}", tail)
}
