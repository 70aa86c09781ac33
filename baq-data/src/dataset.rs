use baq_core::error::{DataError, Result};
use baq_core::record::{ColumnIndex, Record};
use chrono::NaiveDateTime;
use csv::ReaderBuilder;
use itertools::Itertools;
use std::io::Read;
use std::path::Path;
use std::sync::{Arc, OnceLock};

/// Immutable record store loaded once at startup.
///
/// Owns the raw records plus the bounds every filter control needs: the
/// distinct station list, the distinct years, and the min/max timestamps.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    stations: Vec<String>,
    years: Vec<i32>,
    min_timestamp: NaiveDateTime,
    max_timestamp: NaiveDateTime,
}

impl Dataset {
    /// Parses a dataset from in-memory CSV text.
    pub fn from_csv_str(data: &str) -> Result<Self> {
        Self::from_reader(data.as_bytes())
    }

    /// Parses a dataset from a CSV file on disk.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Parses a dataset from any reader. One-shot: the whole file either
    /// loads or the first bad row/column aborts with an error.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let columns = ColumnIndex::from_headers(&headers)?;

        let mut records = Vec::new();
        for row in csv_reader.records() {
            records.push(columns.record(&row?)?);
        }
        if records.is_empty() {
            return Err(DataError::EmptyDataset);
        }

        // the station selector offers exactly the stations present,
        // first-seen order
        let stations: Vec<String> = records
            .iter()
            .map(|record| record.station.clone())
            .unique()
            .collect();
        let years: Vec<i32> = records
            .iter()
            .map(|record| record.year)
            .unique()
            .sorted()
            .collect();
        let min_timestamp = records
            .iter()
            .map(Record::timestamp)
            .min()
            .expect("records is non-empty");
        let max_timestamp = records
            .iter()
            .map(Record::timestamp)
            .max()
            .expect("records is non-empty");

        log::info!(
            "loaded {} records from {} stations ({} - {})",
            records.len(),
            stations.len(),
            min_timestamp,
            max_timestamp
        );
        Ok(Dataset {
            records,
            stations,
            years,
            min_timestamp,
            max_timestamp,
        })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn stations(&self) -> &[String] {
        &self.stations
    }

    /// Distinct years present, ascending.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn min_timestamp(&self) -> NaiveDateTime {
        self.min_timestamp
    }

    pub fn max_timestamp(&self) -> NaiveDateTime {
        self.max_timestamp
    }

    pub fn min_year(&self) -> i32 {
        self.years[0]
    }

    pub fn max_year(&self) -> i32 {
        self.years[self.years.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

static SHARED: OnceLock<Arc<Dataset>> = OnceLock::new();

/// Loads the process-wide dataset exactly once and returns the shared
/// read-only handle.
///
/// Concurrent first callers may each parse the data, but only one result
/// is stored; the value is never mutated after that. Sessions that want
/// their own copy should call [`Dataset::from_csv_str`] directly.
pub fn load_shared(csv_data: &str) -> Result<Arc<Dataset>> {
    if let Some(existing) = SHARED.get() {
        return Ok(existing.clone());
    }
    let dataset = Arc::new(Dataset::from_csv_str(csv_data)?);
    Ok(SHARED.get_or_init(|| dataset).clone())
}
