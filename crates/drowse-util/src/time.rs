//! Time utilities for drowse
//!
//! All decisions are made on UTC wall-clock instants with second resolution.
//!
//! # Mock Time for Development
//!
//! In debug builds, the `DROWSE_MOCK_TIME` environment variable can be set
//! to shift the clock seen by the daemon. The mock time advances at the same
//! rate as real time.
//!
//! Format: `YYYY-MM-DD HH:MM:SS` in UTC (e.g., `2025-12-25 14:30:00`)

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeDelta, TimeZone, Utc};
use std::sync::OnceLock;

/// Environment variable name for mock time (debug builds only)
pub const MOCK_TIME_ENV_VAR: &str = "DROWSE_MOCK_TIME";

/// Format accepted in `DROWSE_MOCK_TIME`
const MOCK_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static MOCK_TIME_OFFSET: OnceLock<Option<TimeDelta>> = OnceLock::new();

fn get_mock_time_offset() -> Option<TimeDelta> {
    *MOCK_TIME_OFFSET.get_or_init(|| {
        #[cfg(debug_assertions)]
        {
            if let Ok(mock_time_str) = std::env::var(MOCK_TIME_ENV_VAR) {
                match NaiveDateTime::parse_from_str(&mock_time_str, MOCK_TIME_FORMAT) {
                    Ok(naive_dt) => {
                        let offset = Utc.from_utc_datetime(&naive_dt) - Utc::now();
                        tracing::info!(
                            mock_time = %mock_time_str,
                            offset_secs = offset.num_seconds(),
                            "Mock time enabled"
                        );
                        return Some(offset);
                    }
                    Err(_) => {
                        tracing::warn!(
                            mock_time = %mock_time_str,
                            expected_format = MOCK_TIME_FORMAT,
                            "Invalid mock time format"
                        );
                    }
                }
            }
            None
        }
        #[cfg(not(debug_assertions))]
        {
            None
        }
    })
}

/// Returns whether mock time is currently active.
pub fn is_mock_time_active() -> bool {
    get_mock_time_offset().is_some()
}

/// Get the current UTC time, truncated to whole seconds.
///
/// In debug builds, if `DROWSE_MOCK_TIME` is set, the returned time is
/// shifted by the offset between the mock time and the process start.
pub fn now() -> DateTime<Utc> {
    let real_now = Utc::now();
    let shifted = match get_mock_time_offset() {
        Some(offset) => real_now + offset,
        None => real_now,
    };
    truncate_to_seconds(shifted)
}

/// Drop the sub-second part of an instant.
pub fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(dt.timestamp(), 0).unwrap_or(dt)
}

/// Parse an epoch-seconds timestamp such as `1700000000` or `1700000000.5`.
///
/// Fractional seconds are truncated. Returns `None` for anything that is not
/// a finite number inside chrono's representable range.
pub fn parse_epoch_seconds(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    if let Ok(secs) = trimmed.parse::<i64>() {
        return DateTime::from_timestamp(secs, 0);
    }

    let secs = trimmed.parse::<f64>().ok()?;
    if !secs.is_finite() || secs.abs() > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp(secs.trunc() as i64, 0)
}

/// Format an instant as integer epoch seconds (the `{timestamp}` placeholder).
pub fn format_epoch(dt: &DateTime<Utc>) -> String {
    dt.timestamp().to_string()
}

/// Format an instant as RFC 3339 text (the `{iso}` placeholder).
pub fn format_iso(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

/// Helper to format durations in human-readable form
pub fn format_duration(d: TimeDelta) -> String {
    let sign = if d < TimeDelta::zero() { "-" } else { "" };
    let total_secs = d.num_seconds().unsigned_abs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}{}h {}m {}s", sign, hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}{}m {}s", sign, minutes, seconds)
    } else {
        format!("{}{}s", sign, seconds)
    }
}
