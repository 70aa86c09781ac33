use baq_core::granularity::{Granularity, TimeKey};
use baq_core::record::Record;
use baq_core::variable::{Variable, VARIABLE_COUNT};
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// Mean of every measurement for one (station, time bucket) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedPoint {
    pub station: String,
    /// Rebuilt from the bucket key; dropped sub-fields take the
    /// granularity defaults (month=1, day=1, hour=0).
    pub timestamp: NaiveDateTime,
    means: [Option<f64>; VARIABLE_COUNT],
}

impl AggregatedPoint {
    /// Mean for `variable`, or `None` when the bucket had no surviving
    /// observations for it.
    pub fn mean(&self, variable: Variable) -> Option<f64> {
        self.means[variable.index()]
    }
}

/// Running sum/count for one variable in one bucket. Missing values touch
/// neither the numerator nor the denominator.
#[derive(Debug, Clone, Copy, Default)]
struct MeanState {
    sum: f64,
    count: u32,
}

impl MeanState {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / f64::from(self.count))
    }
}

/// Groups records by (station, time bucket) and averages every
/// measurement variable.
///
/// Buckets come out in first-seen order, not temporal order; callers
/// that chart the result sort by timestamp themselves.
pub fn aggregate(records: &[Record], granularity: Granularity) -> Vec<AggregatedPoint> {
    let mut buckets: HashMap<(String, TimeKey), [MeanState; VARIABLE_COUNT]> = HashMap::new();
    let mut order: Vec<(String, TimeKey)> = Vec::new();

    for record in records {
        let key = (record.station.clone(), record.time_key(granularity));
        let states = buckets.entry(key.clone()).or_insert_with(|| {
            order.push(key.clone());
            [MeanState::default(); VARIABLE_COUNT]
        });
        for variable in Variable::ALL {
            states[variable.index()].push(record.value(variable));
        }
    }

    order
        .into_iter()
        .map(|key| {
            let states = &buckets[&key];
            let means = std::array::from_fn(|index| states[index].mean());
            let (station, time_key) = key;
            AggregatedPoint {
                station,
                timestamp: time_key.timestamp(),
                means,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use baq_core::variable::VARIABLE_COUNT;
    use chrono::NaiveDate;

    fn record(
        station: &str,
        (year, month, day, hour): (i32, u32, u32, u32),
        pm25: Option<f64>,
        pm10: Option<f64>,
    ) -> Record {
        let mut measurements = [None; VARIABLE_COUNT];
        measurements[Variable::Pm25.index()] = pm25;
        measurements[Variable::Pm10.index()] = pm10;
        Record::new(station.to_string(), year, month, day, hour, measurements).unwrap()
    }

    fn ts(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_daily_mean_of_two_hours() {
        // station A, (2013,3,1,0) PM2.5=10 and (2013,3,1,1) PM2.5=20
        // must yield one point, 2013-03-01, mean 15
        let records = vec![
            record("A", (2013, 3, 1, 0), Some(10.0), None),
            record("A", (2013, 3, 1, 1), Some(20.0), None),
        ];
        let points = aggregate(&records, Granularity::Daily);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].station, "A");
        assert_eq!(points[0].timestamp, ts(2013, 3, 1, 0));
        assert_eq!(points[0].mean(Variable::Pm25), Some(15.0));
    }

    #[test]
    fn test_missing_value_excluded_from_denominator() {
        // the NA row still counts toward PM10 but not PM2.5
        let records = vec![
            record("A", (2013, 3, 1, 0), Some(10.0), Some(30.0)),
            record("A", (2013, 3, 1, 1), None, Some(60.0)),
        ];
        let points = aggregate(&records, Granularity::Daily);
        assert_eq!(points[0].mean(Variable::Pm25), Some(10.0));
        assert_eq!(points[0].mean(Variable::Pm10), Some(45.0));
    }

    #[test]
    fn test_all_missing_bucket_yields_none_not_zero() {
        let records = vec![record("A", (2013, 3, 1, 0), None, Some(5.0))];
        let points = aggregate(&records, Granularity::Daily);
        assert_eq!(points[0].mean(Variable::Pm25), None);
        assert_eq!(points[0].mean(Variable::So2), None);
    }

    #[test]
    fn test_stations_bucket_independently() {
        let records = vec![
            record("A", (2013, 3, 1, 0), Some(10.0), None),
            record("B", (2013, 3, 1, 0), Some(40.0), None),
        ];
        let points = aggregate(&records, Granularity::Daily);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].station, "A");
        assert_eq!(points[1].station, "B");
        assert_eq!(points[1].mean(Variable::Pm25), Some(40.0));
    }

    #[test]
    fn test_yearly_bucket_timestamp_uses_defaults() {
        let records = vec![
            record("A", (2013, 3, 1, 5), Some(10.0), None),
            record("A", (2013, 11, 20, 17), Some(20.0), None),
        ];
        let points = aggregate(&records, Granularity::Yearly);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].timestamp, ts(2013, 1, 1, 0));
        assert_eq!(points[0].mean(Variable::Pm25), Some(15.0));
    }

    #[test]
    fn test_hourly_then_daily_matches_direct_daily() {
        // one record per station-hour, as in the pre-aggregated dataset:
        // re-grouping the hourly buckets by day must reproduce the daily
        // means
        let records: Vec<Record> = (0..24)
            .map(|hour| record("A", (2013, 3, 1, hour), Some(f64::from(hour) * 1.5), None))
            .collect();

        let hourly = aggregate(&records, Granularity::Hourly);
        assert_eq!(hourly.len(), 24);
        let regrouped_mean = hourly
            .iter()
            .filter_map(|point| point.mean(Variable::Pm25))
            .sum::<f64>()
            / 24.0;

        let daily = aggregate(&records, Granularity::Daily);
        assert_eq!(daily.len(), 1);
        let direct_mean = daily[0].mean(Variable::Pm25).unwrap();
        assert!((regrouped_mean - direct_mean).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input_aggregates_to_nothing() {
        let points = aggregate(&[], Granularity::Monthly);
        assert!(points.is_empty());
    }
}
