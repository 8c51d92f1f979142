//! Shared console formatting helpers.

use chrono::{DateTime, Local};

/// Renders epoch milliseconds as local `YYYY-MM-DD HH:MM:SS`.
pub fn timestamp(epoch_ms: i64) -> String {
    DateTime::from_timestamp_millis(epoch_ms)
        .map(|utc| {
            utc.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| epoch_ms.to_string())
}

/// Renders a percentage with one decimal.
pub fn percent(value: f64) -> String {
    format!("{value:.1}%")
}
