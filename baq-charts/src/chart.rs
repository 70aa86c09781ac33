use baq_core::granularity::Granularity;
use baq_core::variable::Variable;
use baq_data::series::StationSeries;
use chrono::{Duration, NaiveDateTime};
use plotters::coord::types::RangedDateTime;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::palette::series_color;

/// Plot-area fill matching the dashboard's dark theme (#0F1018).
pub const PLOT_BACKGROUND: RGBColor = RGBColor(15, 16, 24);

/// Mesh/label foreground on the dark background.
pub const FOREGROUND: RGBColor = RGBColor(200, 203, 215);

/// Pixel size of every rendered chart.
pub const CHART_SIZE: (u32, u32) = (900, 420);

/// Result of a drawing operation on backend `DB`.
pub type DrawResult<T, DB> =
    Result<T, DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

/// Chart title for one variable under the selected granularity.
///
/// The time-bucket noun follows the granularity, so a yearly view reads
/// "Average PM2.5 per Year" rather than a fixed "per Month".
pub fn chart_title(variable: Variable, granularity: Granularity) -> String {
    format!(
        "Average {} per {}",
        variable.display_name(),
        granularity.unit_noun()
    )
}

/// Draws one multi-series line chart onto `area`.
///
/// Zero series, empty series, and all-missing buckets all render an
/// empty chart rather than failing.
pub fn draw_variable_chart<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    variable: Variable,
    granularity: Granularity,
    series: &[StationSeries],
) -> DrawResult<(), DB> {
    area.fill(&PLOT_BACKGROUND)?;

    let (x_range, y_range) = axis_ranges(series);
    let date_format = x_label_format(granularity);

    let mut chart = ChartBuilder::on(area)
        .caption(
            chart_title(variable, granularity),
            ("sans-serif", 22).into_font().color(&FOREGROUND),
        )
        .margin(12)
        .x_label_area_size(28)
        .y_label_area_size(52)
        .build_cartesian_2d(RangedDateTime::from(x_range), y_range)?;

    chart
        .configure_mesh()
        .axis_style(FOREGROUND.mix(0.8))
        .light_line_style(FOREGROUND.mix(0.08))
        .bold_line_style(FOREGROUND.mix(0.18))
        .label_style(("sans-serif", 12).into_font().color(&FOREGROUND))
        .x_labels(8)
        .y_labels(6)
        .x_label_formatter(&|timestamp| timestamp.format(date_format).to_string())
        .draw()?;

    let mut drew_any = false;
    for (index, line) in series.iter().enumerate() {
        if line.points.is_empty() {
            continue;
        }
        drew_any = true;
        let color = series_color(index);
        chart
            .draw_series(LineSeries::new(line.points.iter().copied(), &color))?
            .label(line.station.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    if drew_any {
        chart
            .configure_series_labels()
            .background_style(PLOT_BACKGROUND.mix(0.85))
            .border_style(FOREGROUND.mix(0.4))
            .label_font(("sans-serif", 12).into_font().color(&FOREGROUND))
            .draw()?;
    }

    area.present()?;
    Ok(())
}

fn x_label_format(granularity: Granularity) -> &'static str {
    match granularity {
        Granularity::Yearly => "%Y",
        Granularity::Monthly => "%Y-%m",
        Granularity::Daily => "%Y-%m-%d",
        Granularity::Hourly => "%H:00",
    }
}

/// Axis bounds covering every point of every series, with headroom on y
/// and a non-zero span on both axes even for degenerate data.
fn axis_ranges(
    series: &[StationSeries],
) -> (std::ops::Range<NaiveDateTime>, std::ops::Range<f64>) {
    let mut timestamps = series
        .iter()
        .flat_map(|line| line.points.iter().map(|(timestamp, _)| *timestamp));
    let first = timestamps.next();

    let (mut x_min, mut x_max) = match first {
        Some(timestamp) => (timestamp, timestamp),
        None => {
            let origin = NaiveDateTime::default();
            return (origin..origin + Duration::days(1), 0.0..1.0);
        }
    };
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for line in series {
        for &(timestamp, value) in &line.points {
            x_min = x_min.min(timestamp);
            x_max = x_max.max(timestamp);
            y_min = y_min.min(value);
            y_max = y_max.max(value);
        }
    }

    if x_min == x_max {
        x_max += Duration::days(1);
    }
    let padding = ((y_max - y_min) * 0.05).max(0.5);
    (x_min..x_max, (y_min - padding)..(y_max + padding))
}
