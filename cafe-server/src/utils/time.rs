//! Time helpers - business-timezone day arithmetic
//!
//! Timestamps are `i64` Unix millis everywhere; the only calendar
//! question the core asks is "do these two instants fall on the same
//! day", which must be answered in the store's timezone, not UTC.

use chrono::TimeZone;
use chrono_tz::Tz;

/// Whether two instants fall on the same calendar day in `tz`
///
/// Used by the review window: an order may be reviewed on the day it
/// was paid (payment date = the order's last `updated_at`).
pub fn same_business_day(a_millis: i64, b_millis: i64, tz: Tz) -> bool {
    match (
        tz.timestamp_millis_opt(a_millis).single(),
        tz.timestamp_millis_opt(b_millis).single(),
    ) {
        (Some(a), Some(b)) => a.date_naive() == b.date_naive(),
        // Ambiguous/invalid local instants (DST edges) - fall back to UTC days
        _ => {
            let a = chrono::DateTime::from_timestamp_millis(a_millis);
            let b = chrono::DateTime::from_timestamp_millis(b_millis);
            matches!((a, b), (Some(a), Some(b)) if a.date_naive() == b.date_naive())
        }
    }
}
