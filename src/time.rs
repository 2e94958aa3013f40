use crate::Timestamp;
use chrono::{DateTime, Utc};

/// Returns the current timestamp.
#[must_use]
pub fn timestamp() -> Timestamp {
    Utc::now()
}

/// Parses a fixed-offset RFC 3339 timestamp (e.g. `2024-05-01T10:00:00+02:00`)
/// as reported by the monitoring backend.
///
/// # Errors
///
/// Returns an error if the string is not a valid RFC 3339 timestamp.
pub fn parse_timestamp(s: &str) -> crate::Result<Timestamp> {
    let ts = DateTime::parse_from_rfc3339(s)?;
    Ok(ts.with_timezone(&Utc))
}
