use crate::dataset::Dataset;
use baq_core::date_range::TimestampRange;
use baq_core::granularity::Granularity;
use chrono::{Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};

/// User-chosen filter state driving one dashboard render.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSelection {
    /// Stations whose series are drawn. Chart-time filter only: the
    /// aggregation itself always covers every station.
    pub stations: Vec<String>,
    pub granularity: Granularity,
    /// Effective window, both bounds inclusive.
    pub range: TimestampRange,
}

impl FilterSelection {
    /// Initial dashboard state: every station, monthly buckets, full range.
    pub fn initial(dataset: &Dataset) -> Self {
        let granularity = Granularity::Monthly;
        FilterSelection {
            stations: dataset.stations().to_vec(),
            granularity,
            range: default_range(dataset, granularity),
        }
    }
}

/// Default window offered when the user switches to `granularity`.
pub fn default_range(dataset: &Dataset, granularity: Granularity) -> TimestampRange {
    match granularity {
        // whole years, compared on Jan 1 of each year
        Granularity::Yearly => TimestampRange::new(
            year_start(dataset.min_year()),
            year_start(dataset.max_year()),
        ),
        Granularity::Monthly => {
            TimestampRange::new(dataset.min_timestamp(), dataset.max_timestamp())
        }
        // one calendar month from the start of the data
        Granularity::Daily => {
            let start = dataset.min_timestamp();
            let end = start
                .checked_add_months(Months::new(1))
                .unwrap_or_else(|| dataset.max_timestamp());
            TimestampRange::new(start, end)
        }
        Granularity::Hourly => day_range(dataset.min_timestamp().date()),
    }
}

/// Jan 1 00:00 of `year`; whole-year selections compare on this instant.
pub fn year_start(year: i32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .expect("Jan 1 exists in every year")
        .and_time(NaiveTime::MIN)
}

/// The [00:00, 23:00] window of a single calendar day.
pub fn day_range(date: NaiveDate) -> TimestampRange {
    let midnight = date.and_time(NaiveTime::MIN);
    TimestampRange::new(midnight, midnight + Duration::hours(23))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    const CSV_SAMPLE: &str = "\
No,year,month,day,hour,PM2.5,PM10,SO2,NO2,CO,O3,TEMP,PRES,DEWP,RAIN,wd,WSPM,station
1,2013,3,1,0,4,4,4,7,300,77,-0.7,1023,-18.8,0,NNW,4.4,Aotizhongxin
2,2013,3,1,1,8,8,4,7,300,77,-1.1,1023.2,-18.2,0,N,4.7,Aotizhongxin
3,2013,12,31,23,25,40,9,30,500,12,2.0,1019.0,-8.0,0,NW,2.2,Aotizhongxin
4,2015,6,2,5,12,20,6,18,400,60,12.5,1008.1,3.2,0.4,SE,1.0,Aotizhongxin
";

    fn dataset() -> Dataset {
        Dataset::from_csv_str(CSV_SAMPLE).unwrap()
    }

    fn ts(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_initial_selection_covers_everything() {
        let dataset = dataset();
        let selection = FilterSelection::initial(&dataset);
        assert_eq!(selection.granularity, Granularity::Monthly);
        assert_eq!(selection.stations, dataset.stations());
        assert_eq!(selection.range.start, dataset.min_timestamp());
        assert_eq!(selection.range.end, dataset.max_timestamp());
    }

    #[test]
    fn test_yearly_default_spans_year_bounds() {
        let range = default_range(&dataset(), Granularity::Yearly);
        assert_eq!(range.start, ts(2013, 1, 1, 0));
        assert_eq!(range.end, ts(2015, 1, 1, 0));
    }

    #[test]
    fn test_daily_default_is_one_calendar_month() {
        let range = default_range(&dataset(), Granularity::Daily);
        assert_eq!(range.start, ts(2013, 3, 1, 0));
        assert_eq!(range.end, ts(2013, 4, 1, 0));
    }

    #[test]
    fn test_hourly_default_is_first_day() {
        let range = default_range(&dataset(), Granularity::Hourly);
        assert_eq!(range.start, ts(2013, 3, 1, 0));
        assert_eq!(range.end, ts(2013, 3, 1, 23));
    }
}
