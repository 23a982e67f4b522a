//! Allowed check-in interval around a scheduled visit start.

use chrono::{DateTime, Duration, Utc};

/// Inclusive time interval during which a check-in is temporally valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckinWindow {
    pub start_allowed: DateTime<Utc>,
    pub end_allowed: DateTime<Utc>,
}

impl CheckinWindow {
    /// Inclusive on both ends.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start_allowed <= instant && instant <= self.end_allowed
    }
}

/// Compute the window `[start - minutes_before, start + minutes_after]`.
///
/// Offsets apply to the instant, so day/month rollover is handled by the
/// timeline arithmetic. No clock access: callers supply "now" separately.
pub fn checkin_window(
    scheduled_start: DateTime<Utc>,
    minutes_before: i64,
    minutes_after: i64,
) -> CheckinWindow {
    CheckinWindow {
        start_allowed: scheduled_start - Duration::minutes(minutes_before),
        end_allowed: scheduled_start + Duration::minutes(minutes_after),
    }
}
