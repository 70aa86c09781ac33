use serde::{Deserialize, Serialize};

/// Number of measurement variables charted by the dashboard.
pub const VARIABLE_COUNT: usize = 11;

/// One of the fixed measurement columns of the dataset.
///
/// The dashboard shows exactly one chart per variable; everything that
/// differs between those charts (column name, display name, file name)
/// lives here so the rendering path stays a single parameterized call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variable {
    Pm25,
    Pm10,
    So2,
    No2,
    Co,
    O3,
    Temp,
    Pres,
    Dewp,
    Rain,
    Wspm,
}

impl Variable {
    /// Every charted variable, in dashboard display order.
    pub const ALL: [Variable; VARIABLE_COUNT] = [
        Variable::Pm25,
        Variable::Pm10,
        Variable::So2,
        Variable::No2,
        Variable::Co,
        Variable::O3,
        Variable::Temp,
        Variable::Pres,
        Variable::Dewp,
        Variable::Rain,
        Variable::Wspm,
    ];

    /// CSV header name of this variable's column.
    pub fn column_name(self) -> &'static str {
        match self {
            Variable::Pm25 => "PM2.5",
            Variable::Pm10 => "PM10",
            Variable::So2 => "SO2",
            Variable::No2 => "NO2",
            Variable::Co => "CO",
            Variable::O3 => "O3",
            Variable::Temp => "TEMP",
            Variable::Pres => "PRES",
            Variable::Dewp => "DEWP",
            Variable::Rain => "RAIN",
            Variable::Wspm => "WSPM",
        }
    }

    /// Human-readable name used in chart titles.
    pub fn display_name(self) -> &'static str {
        match self {
            Variable::Pm25 => "PM2.5",
            Variable::Pm10 => "PM10",
            Variable::So2 => "SO2",
            Variable::No2 => "NO2",
            Variable::Co => "CO",
            Variable::O3 => "O3",
            Variable::Temp => "Temperature",
            Variable::Pres => "Pressure",
            Variable::Dewp => "Dew Point Temperature",
            Variable::Rain => "Precipitation",
            Variable::Wspm => "Wind Speed",
        }
    }

    /// Filesystem-safe name, used for rendered chart files.
    pub fn slug(self) -> &'static str {
        match self {
            Variable::Pm25 => "pm2_5",
            Variable::Pm10 => "pm10",
            Variable::So2 => "so2",
            Variable::No2 => "no2",
            Variable::Co => "co",
            Variable::O3 => "o3",
            Variable::Temp => "temp",
            Variable::Pres => "pres",
            Variable::Dewp => "dewp",
            Variable::Rain => "rain",
            Variable::Wspm => "wspm",
        }
    }

    /// Position of this variable in per-record measurement arrays.
    pub fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_indices_are_dense() {
        for (position, variable) in Variable::ALL.iter().enumerate() {
            assert_eq!(variable.index(), position);
        }
    }

    #[test]
    fn test_column_names_are_distinct() {
        let mut names: Vec<&str> = Variable::ALL.iter().map(|v| v.column_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), VARIABLE_COUNT);
    }
}
