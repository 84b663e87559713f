//! Timestamp helpers for Cirrus.
//!
//! Timestamps are stored as RFC 3339 UTC strings with millisecond
//! precision. Fixed-width UTC strings sort lexicographically in creation
//! order, which the registry relies on for newest-first listings.

use chrono::{DateTime, SecondsFormat, Utc};

/// Current time as a stored timestamp string.
pub fn now() -> String {
    to_stored(&Utc::now())
}

/// Format a datetime as a stored timestamp string.
pub fn to_stored(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored timestamp string.
pub fn from_stored(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
