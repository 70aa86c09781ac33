/// Raw observation records and their CSV conversion
use crate::error::{DataError, Result};
use crate::granularity::{Granularity, TimeKey};
use crate::variable::{Variable, VARIABLE_COUNT};
use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;

/// Header name of the station identifier column
pub const STATION_COLUMN: &str = "station";

/// Header names of the time columns, in year/month/day/hour order
pub const TIME_COLUMNS: [&str; 4] = ["year", "month", "day", "hour"];

/// Cell contents treated as a missing measurement
const MISSING_CELLS: [&str; 2] = ["", "NA"];

/// One raw observation: a station, an hour of the calendar, and up to
/// eleven measurement values. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub station: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    timestamp: NaiveDateTime,
    measurements: [Option<f64>; VARIABLE_COUNT],
}

impl Record {
    /// Builds a record, validating that the time fields form a real
    /// calendar date and hour.
    pub fn new(
        station: String,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        measurements: [Option<f64>; VARIABLE_COUNT],
    ) -> Result<Self> {
        let timestamp = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, 0, 0))
            .ok_or(DataError::InvalidTimestamp {
                year,
                month,
                day,
                hour,
            })?;
        Ok(Record {
            station,
            year,
            month,
            day,
            hour,
            timestamp,
            measurements,
        })
    }

    /// Timestamp derived from the year/month/day/hour fields at load time.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Measurement value for `variable`, if the cell was not missing.
    pub fn value(&self, variable: Variable) -> Option<f64> {
        self.measurements[variable.index()]
    }

    /// Grouping key of this record under `granularity`.
    pub fn time_key(&self, granularity: Granularity) -> TimeKey {
        granularity.time_key(self.year, self.month, self.day, self.hour)
    }
}

/// Header-resolved indices of every required column.
///
/// Columns are located by name, so extra columns (`No`, `wd`, ...) and
/// arbitrary column order are both tolerated.
#[derive(Debug, Clone)]
pub struct ColumnIndex {
    station: usize,
    year: usize,
    month: usize,
    day: usize,
    hour: usize,
    measurements: [usize; VARIABLE_COUNT],
}

impl ColumnIndex {
    /// Locates every required column in the header row.
    pub fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|header| header.trim() == name)
                .ok_or_else(|| DataError::MissingColumn {
                    name: name.to_string(),
                })
        };
        let mut measurements = [0usize; VARIABLE_COUNT];
        for variable in Variable::ALL {
            measurements[variable.index()] = find(variable.column_name())?;
        }
        Ok(ColumnIndex {
            station: find(STATION_COLUMN)?,
            year: find(TIME_COLUMNS[0])?,
            month: find(TIME_COLUMNS[1])?,
            day: find(TIME_COLUMNS[2])?,
            hour: find(TIME_COLUMNS[3])?,
            measurements,
        })
    }

    /// Converts one data row into a [`Record`].
    pub fn record(&self, row: &StringRecord) -> Result<Record> {
        let station = cell(row, self.station).to_string();
        let year = parse_cell::<i32>(row, self.year, TIME_COLUMNS[0])?;
        let month = parse_cell::<u32>(row, self.month, TIME_COLUMNS[1])?;
        let day = parse_cell::<u32>(row, self.day, TIME_COLUMNS[2])?;
        let hour = parse_cell::<u32>(row, self.hour, TIME_COLUMNS[3])?;
        let mut measurements = [None; VARIABLE_COUNT];
        for variable in Variable::ALL {
            measurements[variable.index()] =
                parse_measurement(row, self.measurements[variable.index()], variable)?;
        }
        Record::new(station, year, month, day, hour, measurements)
    }
}

fn cell(row: &StringRecord, index: usize) -> &str {
    row.get(index).unwrap_or("").trim()
}

fn parse_cell<T: std::str::FromStr>(row: &StringRecord, index: usize, column: &str) -> Result<T> {
    let value = cell(row, index);
    value.parse().map_err(|_| DataError::InvalidValue {
        column: column.to_string(),
        value: value.to_string(),
    })
}

/// Missing cells parse to `None`; anything else must be numeric.
fn parse_measurement(row: &StringRecord, index: usize, variable: Variable) -> Result<Option<f64>> {
    let value = cell(row, index);
    if MISSING_CELLS.contains(&value) {
        return Ok(None);
    }
    value
        .parse::<f64>()
        .map(Some)
        .map_err(|_| DataError::InvalidValue {
            column: variable.column_name().to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv::ReaderBuilder;

    const CSV_SAMPLE: &str = "\
No,year,month,day,hour,PM2.5,PM10,SO2,NO2,CO,O3,TEMP,PRES,DEWP,RAIN,wd,WSPM,station
1,2013,3,1,0,4,4,4,7,300,77,-0.7,1023,-18.8,0,NNW,4.4,Aotizhongxin
2,2013,3,1,1,8,8,4,7,300,77,-1.1,1023.2,-18.2,0,N,4.7,Aotizhongxin
3,2013,3,1,2,NA,7,5,10,300,73,-1.1,1023.5,-18.2,0,NNW,5.6,Aotizhongxin
";

    fn read_records(data: &str) -> Result<Vec<Record>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(data.as_bytes());
        let columns = ColumnIndex::from_headers(&reader.headers()?.clone())?;
        reader
            .records()
            .map(|row| columns.record(&row?))
            .collect()
    }

    #[test]
    fn test_rows_parse_with_extra_columns_ignored() {
        let records = read_records(CSV_SAMPLE).unwrap();
        assert_eq!(records.len(), 3);
        let first = &records[0];
        assert_eq!(first.station, "Aotizhongxin");
        assert_eq!((first.year, first.month, first.day, first.hour), (2013, 3, 1, 0));
        assert_eq!(first.value(Variable::Pm25), Some(4.0));
        assert_eq!(first.value(Variable::Temp), Some(-0.7));
    }

    #[test]
    fn test_na_cell_is_missing_not_zero() {
        let records = read_records(CSV_SAMPLE).unwrap();
        assert_eq!(records[2].value(Variable::Pm25), None);
        assert_eq!(records[2].value(Variable::Pm10), Some(7.0));
    }

    #[test]
    fn test_timestamp_derivation() {
        let records = read_records(CSV_SAMPLE).unwrap();
        let expected = NaiveDate::from_ymd_opt(2013, 3, 1)
            .unwrap()
            .and_hms_opt(2, 0, 0)
            .unwrap();
        assert_eq!(records[2].timestamp(), expected);
    }

    #[test]
    fn test_missing_required_column_is_fatal() {
        let headerless = CSV_SAMPLE.replace("PM2.5", "PM25");
        let error = read_records(&headerless).unwrap_err();
        assert!(matches!(
            error,
            DataError::MissingColumn { name } if name == "PM2.5"
        ));
    }

    #[test]
    fn test_invalid_calendar_date_is_fatal() {
        let bad_month = CSV_SAMPLE.replace("1,2013,3,1,0", "1,2013,13,1,0");
        let error = read_records(&bad_month).unwrap_err();
        assert!(matches!(
            error,
            DataError::InvalidTimestamp { month: 13, .. }
        ));
    }

    #[test]
    fn test_invalid_hour_is_fatal() {
        let bad_hour = CSV_SAMPLE.replace("2,2013,3,1,1", "2,2013,3,1,24");
        let error = read_records(&bad_hour).unwrap_err();
        assert!(matches!(error, DataError::InvalidTimestamp { hour: 24, .. }));
    }

    #[test]
    fn test_non_numeric_measurement_is_fatal() {
        let bad_value = CSV_SAMPLE.replace("300,73", "300,bogus");
        let error = read_records(&bad_value).unwrap_err();
        assert!(matches!(
            error,
            DataError::InvalidValue { column, .. } if column == "O3"
        ));
    }
}
