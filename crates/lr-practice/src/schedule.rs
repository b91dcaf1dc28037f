//! The spaced-repetition schedule: a fixed ladder of review intervals.
//!
//! Dueness compares calendar dates, not instants: an item reviewed at
//! 23:50 is due again the moment the next scheduled *day* starts, exactly
//! as the original date-string comparison behaved.

use chrono::{DateTime, NaiveDate, Utc};

/// Review intervals in days, indexed by `interval_index`. The last entry is
/// terminal: further practice keeps a 365-day cadence.
pub const SR_INTERVALS: [u32; 13] = [0, 1, 3, 7, 14, 30, 45, 60, 75, 90, 120, 180, 365];

/// Highest reachable `interval_index`.
pub const MAX_INTERVAL_INDEX: usize = SR_INTERVALS.len() - 1;

/// Interval in days at `index`, clamped to the terminal entry.
pub fn interval_days(index: usize) -> u32 {
    SR_INTERVALS[index.min(MAX_INTERVAL_INDEX)]
}

/// Next schedule position after a due practice; saturates at the terminal
/// index.
pub fn advance(index: usize) -> usize {
    (index + 1).min(MAX_INTERVAL_INDEX)
}

/// Whether an item is due as of `as_of`: due when it has never been
/// scheduled, or when `as_of` has reached the scheduled review date
/// (date-only comparison).
pub fn is_due(next_review_at: Option<DateTime<Utc>>, as_of: NaiveDate) -> bool {
    match next_review_at {
        None => true,
        Some(next) => as_of >= next.date_naive(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
