use crate::aggregate::AggregatedPoint;
use baq_core::date_range::TimestampRange;
use baq_core::variable::Variable;
use chrono::NaiveDateTime;

/// One charted line: a station label plus its (timestamp, mean) points.
#[derive(Debug, Clone, PartialEq)]
pub struct StationSeries {
    pub station: String,
    pub points: Vec<(NaiveDateTime, f64)>,
}

/// Keeps the aggregated points whose rebuilt timestamp falls inside the
/// selection window (both bounds inclusive).
pub fn filter_range(
    points: Vec<AggregatedPoint>,
    range: TimestampRange,
) -> Vec<AggregatedPoint> {
    points
        .into_iter()
        .filter(|point| range.contains(point.timestamp))
        .collect()
}

/// Projects filtered points into one series per selected station.
///
/// This is where the station filter applies, per chart; buckets with no
/// surviving observations for `variable` are skipped, not charted as
/// zero. Points are sorted by timestamp here because the aggregation
/// deliberately makes no ordering promise.
pub fn station_series(
    points: &[AggregatedPoint],
    stations: &[String],
    variable: Variable,
) -> Vec<StationSeries> {
    stations
        .iter()
        .map(|station| {
            let mut series: Vec<(NaiveDateTime, f64)> = points
                .iter()
                .filter(|point| &point.station == station)
                .filter_map(|point| point.mean(variable).map(|value| (point.timestamp, value)))
                .collect();
            series.sort_by_key(|(timestamp, _)| *timestamp);
            StationSeries {
                station: station.clone(),
                points: series,
            }
        })
        .collect()
}
