//! Rendering helpers shared by the report and inspect commands.

use chrono::NaiveDateTime;

/// Formats elapsed seconds as `H:MM:SS.mmm`.
pub fn format_elapsed(seconds: f64) -> String {
    let total_millis = (seconds * 1000.0).round() as u64;
    let millis = total_millis % 1000;
    let total_secs = total_millis / 1000;
    let secs = total_secs % 60;
    let mins = (total_secs / 60) % 60;
    let hours = total_secs / 3600;
    format!("{hours}:{mins:02}:{secs:02}.{millis:03}")
}

/// Formats a recorder timestamp for display.
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}
