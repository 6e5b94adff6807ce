use chrono::{DateTime, TimeZone};

const MS_PER_SECOND: i64 = 1000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Remaining time until the submission deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeLeft {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeLeft {
    /// Builds the breakdown from a millisecond difference; negative input means
    /// the deadline has passed
    pub fn from_millis(diff_ms: i64) -> Self {
        if diff_ms <= 0 {
            return Self::default();
        }
        Self {
            days: diff_ms / MS_PER_DAY,
            hours: (diff_ms % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (diff_ms % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (diff_ms % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }

    pub fn is_over(&self) -> bool {
        *self == Self::default()
    }

    pub fn total_seconds(&self) -> i64 {
        self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds
    }

    /// Two-digit values for the countdown boxes: days, hours, minutes, seconds
    pub fn padded(&self) -> [String; 4] {
        [
            format!("{:02}", self.days),
            format!("{:02}", self.hours),
            format!("{:02}", self.minutes),
            format!("{:02}", self.seconds),
        ]
    }
}

/// Time left between `now` and `deadline`, all zero once the deadline passed
pub fn time_left<Tz: TimeZone>(now: &DateTime<Tz>, deadline: &DateTime<Tz>) -> TimeLeft {
    TimeLeft::from_millis(deadline.timestamp_millis() - now.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn deadline() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 26, 23, 59, 0).unwrap()
    }

    #[test]
    fn test_after_deadline_is_zero() {
        let d = deadline();
        assert_eq!(time_left(&d, &d), TimeLeft::default());
        assert!(time_left(&(d + Duration::seconds(1)), &d).is_over());
        assert!(time_left(&(d + Duration::days(400)), &d).is_over());
    }

    #[test]
    fn test_breakdown() {
        let d = deadline();
        let now = d - Duration::days(3) - Duration::hours(4) - Duration::minutes(5) - Duration::seconds(6);
        assert_eq!(
            time_left(&now, &d),
            TimeLeft {
                days: 3,
                hours: 4,
                minutes: 5,
                seconds: 6
            }
        );
    }

    #[test]
    fn test_sub_second_remainder_is_floored() {
        let d = deadline();
        let now = d - Duration::milliseconds(1999);
        let left = time_left(&now, &d);
        assert_eq!(left.seconds, 1);
        assert!(!left.is_over());

        let now = d - Duration::milliseconds(500);
        assert!(time_left(&now, &d).is_over());
    }

    #[test]
    fn test_breakdown_reaches_deadline_within_a_second() {
        let d = deadline();
        for offset_ms in [1_234_i64, 59_999, 3_600_001, 86_399_999, 90 * 86_400_000 + 17] {
            let now = d - Duration::milliseconds(offset_ms);
            let left = time_left(&now, &d);
            let reached = now + Duration::seconds(left.total_seconds());
            let gap = d - reached;
            assert!(gap >= Duration::zero() && gap < Duration::seconds(1), "offset {}", offset_ms);
            assert!(left.hours < 24 && left.minutes < 60 && left.seconds < 60);
        }
    }

    #[test]
    fn test_padded() {
        let left = TimeLeft {
            days: 120,
            hours: 4,
            minutes: 0,
            seconds: 9,
        };
        assert_eq!(left.padded(), ["120", "04", "00", "09"]);
    }
}
