use chrono::NaiveDateTime;

/// Inclusive timestamp window used to filter aggregated buckets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimestampRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimestampRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        TimestampRange { start, end }
    }

    /// Both bounds are inclusive.
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }

    /// A window whose end precedes its start matches nothing. This is a
    /// valid degenerate selection, not an error.
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let range = TimestampRange::new(ts(2013, 3, 1, 0), ts(2013, 3, 31, 23));
        assert!(range.contains(ts(2013, 3, 1, 0)));
        assert!(range.contains(ts(2013, 3, 31, 23)));
        assert!(range.contains(ts(2013, 3, 15, 12)));
        assert!(!range.contains(ts(2013, 2, 28, 23)));
        assert!(!range.contains(ts(2013, 4, 1, 0)));
    }

    #[test]
    fn test_reversed_window_is_empty_not_an_error() {
        let range = TimestampRange::new(ts(2013, 4, 1, 0), ts(2013, 3, 1, 0));
        assert!(range.is_empty());
        assert!(!range.contains(ts(2013, 3, 15, 0)));
    }
}
