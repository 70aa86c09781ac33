//! Dataset inspection commands: station listing and a JSON summary.

use baq_data::dataset::Dataset;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::Path;

/// Shape of the `summary` subcommand's JSON output.
#[derive(Debug, Serialize)]
pub struct DatasetSummary {
    pub records: usize,
    pub stations: Vec<String>,
    pub years: Vec<i32>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DatasetSummary {
    pub fn of(dataset: &Dataset) -> Self {
        DatasetSummary {
            records: dataset.len(),
            stations: dataset.stations().to_vec(),
            years: dataset.years().to_vec(),
            start: dataset.min_timestamp(),
            end: dataset.max_timestamp(),
        }
    }
}

pub fn run_stations(dataset_csv: &str) -> anyhow::Result<()> {
    let dataset = Dataset::from_csv_path(Path::new(dataset_csv))?;
    for station in dataset.stations() {
        println!("{}", station);
    }
    Ok(())
}

pub fn run_summary(dataset_csv: &str) -> anyhow::Result<()> {
    let dataset = Dataset::from_csv_path(Path::new(dataset_csv))?;
    let summary = DatasetSummary::of(&dataset);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE_CSV: &str = include_str!("../../fixtures/air_quality.csv");

    #[test]
    fn test_summary_shape() {
        let dataset = Dataset::from_csv_str(FIXTURE_CSV).unwrap();
        let summary = DatasetSummary::of(&dataset);
        assert_eq!(summary.records, dataset.len());
        assert_eq!(summary.stations.len(), 3);

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"records\""));
        assert!(json.contains("Aotizhongxin"));
    }
}
