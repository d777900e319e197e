//! Elapsed/total time text.

const SECS_PER_HOUR: u64 = 3600;

/// Format `elapsed / total` for display.
///
/// Uses `M:SS` unless the total reaches an hour, in which case both sides
/// switch to `H:MM:SS` so they line up. Negative and non-finite values show
/// as zero; fractional seconds are truncated.
pub fn format_time(elapsed_seconds: f64, total_seconds: f64) -> String {
    let elapsed = whole_seconds(elapsed_seconds);
    let total = whole_seconds(total_seconds);
    let with_hours = total >= SECS_PER_HOUR || elapsed >= SECS_PER_HOUR;

    format!(
        "{} / {}",
        format_clock(elapsed, with_hours),
        format_clock(total, with_hours)
    )
}

fn whole_seconds(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    }
}

fn format_clock(seconds: u64, with_hours: bool) -> String {
    let hours = seconds / SECS_PER_HOUR;
    let mins = (seconds % SECS_PER_HOUR) / 60;
    let secs = seconds % 60;

    if with_hours {
        format!("{hours}:{mins:02}:{secs:02}")
    } else {
        format!("{}:{secs:02}", seconds / 60)
    }
}
