use chrono::{Duration, Local, NaiveDateTime};

use crate::domain::TimestampPair;

/// Computes the reference timestamps for one run: the current local time and
/// the same moment 24 hours earlier. Called once per run; every file processed
/// in that run receives the same pair.
pub fn freshness_timestamps() -> TimestampPair {
    let now = Local::now().naive_local();
    TimestampPair {
        today: format_iso_with_z(now),
        yesterday: format_iso_with_z(now - Duration::days(1)),
    }
}

/// Renders a local wall-clock time as ISO 8601 with a literal `Z` appended.
///
/// The `Z` is appended verbatim, without converting to UTC. The existing
/// fixtures were produced with this labeling and downstream consumers expect
/// it, so the suffix stays literal.
pub fn format_iso_with_z(timestamp: NaiveDateTime) -> String {
    format!("{}Z", timestamp.format("%Y-%m-%dT%H:%M:%S%.6f"))
}
