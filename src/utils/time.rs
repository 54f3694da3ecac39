use chrono::{DateTime, SecondsFormat, Utc};
use std::time::{SystemTime, UNIX_EPOCH};

pub fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System time is before Unix epoch")
        .as_secs() as i64
}

/// Current time as ISO-8601 with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`
pub fn iso_timestamp() -> String {
    format_iso(Utc::now())
}

pub fn format_iso(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Human readable form of an ISO timestamp for HTML pages.
/// Unparseable input is returned unchanged.
pub fn display_timestamp(iso: &str) -> String {
    match DateTime::parse_from_rfc3339(iso) {
        Ok(at) => at.with_timezone(&Utc).format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        Err(_) => iso.to_string(),
    }
}
