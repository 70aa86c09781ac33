//! Filter-and-aggregate pipeline over the air quality dataset.
//!
//! This crate turns raw records into the per-station time series the
//! charts consume: load once, bucket by (station, granularity), average
//! every measurement, filter to the selected window.

pub mod aggregate;
pub mod dataset;
pub mod selection;
pub mod series;

use aggregate::{aggregate, AggregatedPoint};
use dataset::Dataset;
use selection::FilterSelection;

/// Full aggregation pass for one selection.
///
/// Aggregation always covers every station; the station filter is applied
/// later, per chart, by [`series::station_series`].
pub fn filter_and_aggregate(dataset: &Dataset, selection: &FilterSelection) -> Vec<AggregatedPoint> {
    let buckets = aggregate(dataset.records(), selection.granularity);
    series::filter_range(buckets, selection.range)
}
