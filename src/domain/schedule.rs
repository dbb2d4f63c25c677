//! Scheduled broadcast windows
//!
//! Earlier revisions of this tool disagreed on whether the notification
//! hours were meant in UTC, Brasília or Cuiabá time. The convention here is
//! explicit: hours are interpreted at a fixed configured UTC offset
//! (default 0, i.e. plain UTC) and everything else stays in UTC.

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::Deserialize;

/// Times of day at which a broadcast fires regardless of price variation
#[derive(Debug, Clone, Deserialize)]
pub struct BroadcastWindows {
    /// Target hours, 0-23, in the offset-adjusted clock
    pub hours: Vec<u32>,

    /// A window covers the first N minutes of each target hour
    pub tolerance_minutes: u32,

    /// Fixed offset applied before comparing hours (-3 = Brasília)
    pub utc_offset_hours: i64,
}

impl BroadcastWindows {
    /// True iff `now` falls inside any configured window
    pub fn contains(&self, now: DateTime<Utc>) -> bool {
        let local = now + Duration::hours(self.utc_offset_hours);
        self.hours.contains(&local.hour()) && local.minute() < self.tolerance_minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn windows(hours: Vec<u32>, offset: i64) -> BroadcastWindows {
        BroadcastWindows {
            hours,
            tolerance_minutes: 15,
            utc_offset_hours: offset,
        }
    }

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_inside_window() {
        let w = windows(vec![12, 16, 20], 0);
        assert!(w.contains(at(12, 7)));
        assert!(w.contains(at(20, 0)));
        assert!(w.contains(at(16, 14)));
    }

    #[test]
    fn test_outside_tolerance() {
        let w = windows(vec![12, 16, 20], 0);
        assert!(!w.contains(at(12, 20)));
        assert!(!w.contains(at(12, 15))); // tolerance is exclusive
    }

    #[test]
    fn test_hour_not_configured() {
        let w = windows(vec![12, 16, 20], 0);
        assert!(!w.contains(at(13, 5)));
    }

    #[test]
    fn test_brasilia_offset() {
        // 09:05 Brasília = 12:05 UTC
        let w = windows(vec![9], -3);
        assert!(w.contains(at(12, 5)));
        assert!(!w.contains(at(9, 5)));
    }

    #[test]
    fn test_offset_wraps_past_midnight() {
        // 23:10 UTC at offset -3 is 20:10 the previous evening locally;
        // a 0-hour window at offset +1 catches 23:10 UTC as 00:10.
        let w = windows(vec![0], 1);
        assert!(w.contains(at(23, 10)));
    }
}
