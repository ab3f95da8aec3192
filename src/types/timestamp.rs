use chrono::{DateTime, Utc};

pub const NOT_AVAILABLE: &str = "N/A";

/// Render an on-chain unix timestamp (seconds) for display.
pub fn format_last_updated(unix_secs: u64) -> String {
    i64::try_from(unix_secs)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
