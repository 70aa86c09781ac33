//! Renders the full chart set for one selection into an output directory.

use baq_charts::{draw_variable_chart, CHART_SIZE};
use baq_core::date_range::TimestampRange;
use baq_core::granularity::Granularity;
use baq_core::variable::Variable;
use baq_data::dataset::Dataset;
use baq_data::selection::{day_range, default_range, FilterSelection};
use baq_data::series::station_series;
use chrono::{NaiveDate, NaiveTime};
use plotters::prelude::IntoDrawingArea;
use plotters_svg::SVGBackend;
use std::path::Path;

pub fn run_render(
    dataset_csv: &str,
    out_dir: &str,
    granularity: Granularity,
    stations: &[String],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> anyhow::Result<()> {
    let dataset = Dataset::from_csv_path(Path::new(dataset_csv))?;
    let selection = build_selection(&dataset, granularity, stations, start, end)?;

    std::fs::create_dir_all(out_dir)?;
    let points = baq_data::filter_and_aggregate(&dataset, &selection);
    log::info!(
        "{} aggregated points in range for {} stations",
        points.len(),
        selection.stations.len()
    );

    for variable in Variable::ALL {
        let series = station_series(&points, &selection.stations, variable);
        let path = Path::new(out_dir).join(format!("{}.svg", variable.slug()));
        {
            let area = SVGBackend::new(&path, CHART_SIZE).into_drawing_area();
            draw_variable_chart(&area, variable, granularity, &series)?;
        }
        log::info!("wrote {}", path.display());
    }
    println!(
        "Rendered {} charts to {}",
        Variable::ALL.len(),
        out_dir
    );
    Ok(())
}

/// Resolves the CLI flags into a concrete selection, falling back to the
/// granularity's default window for whichever bound is omitted.
fn build_selection(
    dataset: &Dataset,
    granularity: Granularity,
    stations: &[String],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> anyhow::Result<FilterSelection> {
    for station in stations {
        anyhow::ensure!(
            dataset.stations().contains(station),
            "unknown station: {}",
            station
        );
    }
    let selected: Vec<String> = if stations.is_empty() {
        dataset.stations().to_vec()
    } else {
        // keep dataset order so series colors stay stable
        dataset
            .stations()
            .iter()
            .filter(|station| stations.contains(*station))
            .cloned()
            .collect()
    };

    let defaults = default_range(dataset, granularity);
    let range = match granularity {
        // an hourly chart covers one calendar day
        Granularity::Hourly => match start {
            Some(date) => day_range(date),
            None => defaults,
        },
        _ => TimestampRange::new(
            start
                .map(|date| date.and_time(NaiveTime::MIN))
                .unwrap_or(defaults.start),
            end.map(|date| date.and_time(NaiveTime::MIN))
                .unwrap_or(defaults.end),
        ),
    };

    Ok(FilterSelection {
        stations: selected,
        granularity,
        range,
    })
}
