use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Time-bucket size used for aggregation.
///
/// Each granularity fixes three things at the type level: which raw time
/// sub-fields join the grouping key, which are discarded before
/// aggregation, and which defaults stand in for the discarded fields when
/// the bucket timestamp is rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    Yearly,
    Monthly,
    Daily,
    Hourly,
}

/// Time sub-fields of a raw record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeField {
    Year,
    Month,
    Day,
    Hour,
}

impl TimeField {
    /// Every time sub-field a record carries.
    pub const ALL: [TimeField; 4] = [
        TimeField::Year,
        TimeField::Month,
        TimeField::Day,
        TimeField::Hour,
    ];
}

impl Granularity {
    /// Every granularity, in selection-control order.
    pub const ALL: [Granularity; 4] = [
        Granularity::Yearly,
        Granularity::Monthly,
        Granularity::Daily,
        Granularity::Hourly,
    ];

    /// Name shown in the granularity selector.
    pub fn label(self) -> &'static str {
        match self {
            Granularity::Yearly => "Yearly",
            Granularity::Monthly => "Monthly",
            Granularity::Daily => "Daily",
            Granularity::Hourly => "Hourly",
        }
    }

    /// Inverse of [`label`](Self::label), for select-control values.
    pub fn from_label(label: &str) -> Option<Granularity> {
        Granularity::ALL.into_iter().find(|g| g.label() == label)
    }

    /// Time-bucket noun used in chart titles.
    pub fn unit_noun(self) -> &'static str {
        match self {
            Granularity::Yearly => "Year",
            Granularity::Monthly => "Month",
            Granularity::Daily => "Day",
            Granularity::Hourly => "Hour",
        }
    }

    /// Time sub-fields that join the grouping key (station always does).
    pub fn key_fields(self) -> &'static [TimeField] {
        match self {
            Granularity::Yearly => &[TimeField::Year],
            Granularity::Monthly => &[TimeField::Year, TimeField::Month],
            Granularity::Daily => &[TimeField::Year, TimeField::Month, TimeField::Day],
            Granularity::Hourly => &[
                TimeField::Year,
                TimeField::Month,
                TimeField::Day,
                TimeField::Hour,
            ],
        }
    }

    /// Time sub-fields discarded before aggregation. When the bucket
    /// timestamp is rebuilt, these take the fixed defaults month=1,
    /// day=1, hour=0.
    pub fn dropped_fields(self) -> &'static [TimeField] {
        match self {
            Granularity::Yearly => &[TimeField::Month, TimeField::Day, TimeField::Hour],
            Granularity::Monthly => &[TimeField::Day, TimeField::Hour],
            Granularity::Daily => &[TimeField::Hour],
            Granularity::Hourly => &[],
        }
    }

    /// Bucket key for one record's time fields under this granularity.
    pub fn time_key(self, year: i32, month: u32, day: u32, hour: u32) -> TimeKey {
        match self {
            Granularity::Yearly => TimeKey {
                year,
                month: None,
                day: None,
                hour: None,
            },
            Granularity::Monthly => TimeKey {
                year,
                month: Some(month),
                day: None,
                hour: None,
            },
            Granularity::Daily => TimeKey {
                year,
                month: Some(month),
                day: Some(day),
                hour: None,
            },
            Granularity::Hourly => TimeKey {
                year,
                month: Some(month),
                day: Some(day),
                hour: Some(hour),
            },
        }
    }
}

/// Time component of a grouping key. Sub-fields finer than the granularity
/// are absent and take the fixed defaults when the bucket timestamp is
/// rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeKey {
    pub year: i32,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
}

impl TimeKey {
    pub const DEFAULT_MONTH: u32 = 1;
    pub const DEFAULT_DAY: u32 = 1;
    pub const DEFAULT_HOUR: u32 = 0;

    /// Rebuilds the bucket timestamp from the key plus defaults.
    ///
    /// Always constructible: present sub-fields were validated when the
    /// record was loaded, and the defaults (Jan 1, hour 0) form a valid
    /// date in any year.
    pub fn timestamp(&self) -> NaiveDateTime {
        let month = self.month.unwrap_or(Self::DEFAULT_MONTH);
        let day = self.day.unwrap_or(Self::DEFAULT_DAY);
        let hour = self.hour.unwrap_or(Self::DEFAULT_HOUR);
        NaiveDate::from_ymd_opt(self.year, month, day)
            .and_then(|date| date.and_hms_opt(hour, 0, 0))
            .expect("bucket key fields come from a validated record")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_key_and_dropped_fields_partition_the_time_fields() {
        for granularity in Granularity::ALL {
            let key = granularity.key_fields();
            let dropped = granularity.dropped_fields();
            assert_eq!(key.len() + dropped.len(), TimeField::ALL.len());
            for field in TimeField::ALL {
                let in_key = key.contains(&field);
                let in_dropped = dropped.contains(&field);
                assert!(
                    in_key != in_dropped,
                    "{:?} must appear exactly once for {:?}",
                    field,
                    granularity
                );
            }
        }
    }

    #[test]
    fn test_time_key_population_matches_key_fields() {
        for granularity in Granularity::ALL {
            let key = granularity.time_key(2020, 6, 15, 9);
            let fields = granularity.key_fields();
            assert_eq!(key.month.is_some(), fields.contains(&TimeField::Month));
            assert_eq!(key.day.is_some(), fields.contains(&TimeField::Day));
            assert_eq!(key.hour.is_some(), fields.contains(&TimeField::Hour));
        }
    }

    #[test]
    fn test_timestamp_defaults_for_coarse_granularities() {
        let key = Granularity::Yearly.time_key(2014, 7, 19, 13);
        let expected = NaiveDate::from_ymd_opt(2014, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(key.timestamp(), expected);

        let key = Granularity::Monthly.time_key(2014, 7, 19, 13);
        let expected = NaiveDate::from_ymd_opt(2014, 7, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(key.timestamp(), expected);
    }

    #[test]
    fn test_hourly_key_keeps_every_field() {
        let key = Granularity::Hourly.time_key(2014, 7, 19, 13);
        let expected = NaiveDate::from_ymd_opt(2014, 7, 19)
            .unwrap()
            .and_hms_opt(13, 0, 0)
            .unwrap();
        assert_eq!(key.timestamp(), expected);
    }

    #[test]
    fn test_label_round_trip() {
        for granularity in Granularity::ALL {
            assert_eq!(Granularity::from_label(granularity.label()), Some(granularity));
        }
        assert_eq!(Granularity::from_label("Weekly"), None);
    }
}
