/// Error types for the air quality data library
use thiserror::Error;

/// Main error type for dataset loading and parsing
#[derive(Error, Debug)]
pub enum DataError {
    /// Failed to read the input file
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("Required column not found: {name}")]
    MissingColumn { name: String },

    /// The year/month/day/hour fields do not form a valid calendar date/hour
    #[error("Invalid timestamp: year={year} month={month} day={day} hour={hour}")]
    InvalidTimestamp {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
    },

    /// A cell holds a value that cannot be parsed for its column
    #[error("Invalid value in column {column}: {value:?}")]
    InvalidValue { column: String, value: String },

    /// The file parsed cleanly but holds no data rows
    #[error("The dataset contains no records")]
    EmptyDataset,
}

/// Type alias for Results using DataError
pub type Result<T> = std::result::Result<T, DataError>;
