//! Timestamp utilities

use chrono::{DateTime, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Age of a timestamp relative to now, in milliseconds
///
/// Negative ages (timestamp in the future after a clock step) are reported as 0.
pub fn age_ms(since: DateTime<Utc>) -> u64 {
    (now() - since).num_milliseconds().max(0) as u64
}
