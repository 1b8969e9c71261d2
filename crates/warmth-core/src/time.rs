//! Timestamp parsing and elapsed-time helpers.

use chrono::{DateTime, Utc};

use crate::constants::MILLIS_PER_DAY;
use crate::errors::{WarmthError, WarmthResult};

/// Parse an RFC 3339 timestamp into UTC.
pub fn parse_timestamp(value: &str) -> WarmthResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| WarmthError::InvalidTimestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Fractional days from `from` to `to`. Negative when `to` is earlier
/// (clock skew); callers decide whether to clamp.
pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / MILLIS_PER_DAY
}
