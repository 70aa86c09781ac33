//! Shared plotters rendering for the air quality charts.
//!
//! Every chart the dashboard and the CLI emit goes through the one
//! parameterized draw call in [`chart`]; the per-variable differences are
//! only the title and the series data.

pub mod chart;
pub mod palette;

pub use chart::{chart_title, draw_variable_chart, CHART_SIZE};
pub use palette::series_color;
