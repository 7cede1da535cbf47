//! Countdown text math
//!
//! Pure time-remaining breakdown; the page writes the pieces into the DOM.

use std::fmt;

const MS_PER_SECOND: f64 = 1000.0;
const MS_PER_MINUTE: f64 = 60.0 * MS_PER_SECOND;
const MS_PER_HOUR: f64 = 60.0 * MS_PER_MINUTE;
const MS_PER_DAY: f64 = 24.0 * MS_PER_HOUR;

/// Feb 2 2026, 8:20 AM AEDT (UTC+11) = 2026-02-01T21:20:00Z
pub const DEFAULT_TARGET_MS: f64 = 1_769_980_800_000.0;

/// Whole units left until the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRemaining {
    pub days: u64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl TimeRemaining {
    /// Break a positive millisecond span into floored units
    pub fn from_millis(diff_ms: f64) -> Self {
        let diff = diff_ms.max(0.0);
        Self {
            days: (diff / MS_PER_DAY).floor() as u64,
            hours: ((diff % MS_PER_DAY) / MS_PER_HOUR).floor() as u8,
            minutes: ((diff % MS_PER_HOUR) / MS_PER_MINUTE).floor() as u8,
            seconds: ((diff % MS_PER_MINUTE) / MS_PER_SECOND).floor() as u8,
        }
    }
}

impl fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            pad2(self.days),
            pad2(self.hours.into()),
            pad2(self.minutes.into()),
            pad2(self.seconds.into())
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStatus {
    Remaining(TimeRemaining),
    Completed,
}

pub fn countdown_status(now_ms: f64, target_ms: f64) -> CountdownStatus {
    let diff = target_ms - now_ms;
    if diff <= 0.0 {
        CountdownStatus::Completed
    } else {
        CountdownStatus::Remaining(TimeRemaining::from_millis(diff))
    }
}

/// Left-pad to at least two digits
pub fn pad2(value: u64) -> String {
    format!("{:02}", value)
}
