use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Format seconds as `m:ss`, truncating fractions
pub fn format_clock(secs: f64) -> String {
    let whole = secs.max(0.0).floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Countdown label; overtime is shown as the absolute value behind a minus sign
pub fn format_countdown(remaining_secs: f64, overtime: bool) -> String {
    let clock = format_clock(remaining_secs.abs());
    if overtime {
        format!("-{}", clock)
    } else {
        clock
    }
}

/// Meeting start as `HH:MM` in the team's time zone
pub fn format_start_time(started_at: DateTime<Utc>, tz: Tz) -> String {
    started_at.with_timezone(&tz).format("%H:%M").to_string()
}
