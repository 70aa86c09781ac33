use baq_charts::{draw_variable_chart, CHART_SIZE};
use baq_core::granularity::Granularity;
use baq_core::variable::Variable;
use baq_data::aggregate::AggregatedPoint;
use baq_data::dataset::Dataset;
use baq_data::selection::{day_range, default_range, year_start, FilterSelection};
use baq_data::series::station_series;
use chrono::{Datelike, NaiveDate, NaiveTime};
use log::info;
use plotters::prelude::IntoDrawingArea;
use plotters_svg::SVGBackend;
use wasm_bindgen::JsCast;
use yew::prelude::*;

const DATE_FORMAT: &str = "%Y-%m-%d";
pub const APP_DIV_ID: &str = "chart-air-quality";
const SIDEBAR_TITLE: &str = "China Air Quality Report";
const GRANULARITY_SELECT_ID: &str = "granularity-select";
const START_DATE_ID: &str = "start-date";
const END_DATE_ID: &str = "end-date";
const START_YEAR_ID: &str = "start-year";
const END_YEAR_ID: &str = "end-year";
const OBS_DATE_ID: &str = "obs-date";

/// Demonstration dataset embedded at compile time; a deployment replaces
/// the fixture file with the full pre-aggregated export.
const EMBEDDED_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/air_quality.csv"));

/// Dashboard root component. The dataset is loaded once in `create` and
/// every selection change re-runs the whole pipeline synchronously.
pub enum DashboardModel {
    Ready {
        dataset: Dataset,
        selection: FilterSelection,
    },
    /// Load failures are fatal: the app renders a blocking message
    /// instead of the controls.
    Failed { message: String },
}

#[derive(Debug)]
pub enum Msg {
    ToggleStation(String),
    SetGranularity(Option<Granularity>),
    SetRangeStart(Option<NaiveDate>),
    SetRangeEnd(Option<NaiveDate>),
    SetStartYear(Option<i32>),
    SetEndYear(Option<i32>),
    SetObservationDate(Option<NaiveDate>),
}

/// Reads the current value of an `<input>` by DOM id.
fn input_value(dom_id: &str) -> Option<String> {
    let document = web_sys::window().and_then(|window| window.document())?;
    let element = document.get_element_by_id(dom_id)?;
    let input = element.dyn_into::<web_sys::HtmlInputElement>().ok()?;
    Some(input.value())
}

/// Reads the current value of a `<select>` by DOM id.
fn select_value(dom_id: &str) -> Option<String> {
    let document = web_sys::window().and_then(|window| window.document())?;
    let element = document.get_element_by_id(dom_id)?;
    let select = element.dyn_into::<web_sys::HtmlSelectElement>().ok()?;
    Some(select.value())
}

fn date_value(dom_id: &str) -> Option<NaiveDate> {
    let raw = input_value(dom_id)?;
    match NaiveDate::parse_from_str(&raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            info!("{} holds no parseable date: {}", dom_id, raw);
            None
        }
    }
}

fn year_value(dom_id: &str) -> Option<i32> {
    let raw = select_value(dom_id)?;
    match raw.parse() {
        Ok(year) => Some(year),
        Err(_) => {
            info!("{} holds no parseable year: {}", dom_id, raw);
            None
        }
    }
}

impl DashboardModel {
    /// Renders one variable chart as an inline SVG node.
    fn chart_html(
        &self,
        selection: &FilterSelection,
        points: &[AggregatedPoint],
        variable: Variable,
    ) -> Html {
        let series = station_series(points, &selection.stations, variable);
        let mut svg = String::new();
        {
            let area = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
            if let Err(error) =
                draw_variable_chart(&area, variable, selection.granularity, &series)
            {
                info!("failed to draw {}: {}", variable.column_name(), error);
            }
        }
        let rendered = Html::from_html_unchecked(AttrValue::from(svg));
        html! {
            <div class="chart" id={format!("chart-{}", variable.slug())}>
                {rendered}
            </div>
        }
    }

    fn station_controls(&self, ctx: &Context<Self>, dataset: &Dataset, selection: &FilterSelection) -> Html {
        html! {
            <fieldset id="station-select">
                <legend>{"Select station"}</legend>
                { for dataset.stations().iter().map(|station| {
                    let station_name = station.clone();
                    let onchange = ctx
                        .link()
                        .callback(move |_event: Event| Msg::ToggleStation(station_name.clone()));
                    let checkbox_id = format!("station-{}", station);
                    let checked = selection.stations.iter().any(|s| s == station);
                    html! {
                        <div>
                            <input type="checkbox" id={checkbox_id.clone()} {onchange} {checked} />
                            <label for={checkbox_id}>{station.clone()}</label>
                        </div>
                    }
                }) }
            </fieldset>
        }
    }

    fn granularity_control(&self, ctx: &Context<Self>, selection: &FilterSelection) -> Html {
        let onchange = ctx.link().callback(|_event: Event| {
            Msg::SetGranularity(
                select_value(GRANULARITY_SELECT_ID)
                    .and_then(|value| Granularity::from_label(&value)),
            )
        });
        html! {
            <div id="period-select">
                {"Select period: "}
                <select id={GRANULARITY_SELECT_ID} {onchange}>
                    { for Granularity::ALL.iter().map(|granularity| {
                        html! {
                            <option
                                value={granularity.label()}
                                selected={*granularity == selection.granularity}
                            >
                                {granularity.label()}
                            </option>
                        }
                    }) }
                </select>
            </div>
        }
    }

    fn year_select(
        &self,
        ctx: &Context<Self>,
        dataset: &Dataset,
        dom_id: &'static str,
        selected_year: i32,
        label: &'static str,
    ) -> Html {
        let onchange = ctx.link().callback(move |_event: Event| match dom_id {
            START_YEAR_ID => Msg::SetStartYear(year_value(dom_id)),
            _ => Msg::SetEndYear(year_value(dom_id)),
        });
        html! {
            <div>
                {label}
                <select id={dom_id} {onchange}>
                    { for dataset.years().iter().map(|year| {
                        html! {
                            <option value={year.to_string()} selected={*year == selected_year}>
                                {year.to_string()}
                            </option>
                        }
                    }) }
                </select>
            </div>
        }
    }

    fn date_input(
        &self,
        ctx: &Context<Self>,
        dataset: &Dataset,
        dom_id: &'static str,
        value: NaiveDate,
        label: &'static str,
    ) -> Html {
        let onchange = ctx.link().callback(move |_event: Event| match dom_id {
            START_DATE_ID => Msg::SetRangeStart(date_value(dom_id)),
            END_DATE_ID => Msg::SetRangeEnd(date_value(dom_id)),
            _ => Msg::SetObservationDate(date_value(dom_id)),
        });
        html! {
            <div>
                {label}
                <input
                    type="date"
                    id={dom_id}
                    min={dataset.min_timestamp().date().format(DATE_FORMAT).to_string()}
                    max={dataset.max_timestamp().date().format(DATE_FORMAT).to_string()}
                    value={value.format(DATE_FORMAT).to_string()}
                    {onchange}
                />
            </div>
        }
    }

    /// The date controls change shape with the granularity: year bounds
    /// for yearly, a start/end pair for monthly and daily, one calendar
    /// day for hourly.
    fn range_controls(&self, ctx: &Context<Self>, dataset: &Dataset, selection: &FilterSelection) -> Html {
        match selection.granularity {
            Granularity::Yearly => html! {
                <div id="year-range">
                    { self.year_select(ctx, dataset, START_YEAR_ID, selection.range.start.year(), "Start Year: ") }
                    { self.year_select(ctx, dataset, END_YEAR_ID, selection.range.end.year(), "End Year: ") }
                </div>
            },
            Granularity::Monthly | Granularity::Daily => html! {
                <div id="date-range">
                    { self.date_input(ctx, dataset, START_DATE_ID, selection.range.start.date(), "Start Date: ") }
                    { self.date_input(ctx, dataset, END_DATE_ID, selection.range.end.date(), "End Date: ") }
                </div>
            },
            Granularity::Hourly => html! {
                <div id="date-range">
                    { self.date_input(ctx, dataset, OBS_DATE_ID, selection.range.start.date(), "Select Date: ") }
                </div>
            },
        }
    }
}

impl Component for DashboardModel {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        match Dataset::from_csv_str(EMBEDDED_CSV) {
            Ok(dataset) => {
                let selection = FilterSelection::initial(&dataset);
                info!(
                    "dashboard ready: {} stations, {} - {}",
                    dataset.stations().len(),
                    dataset.min_timestamp().format(DATE_FORMAT),
                    dataset.max_timestamp().format(DATE_FORMAT)
                );
                DashboardModel::Ready { dataset, selection }
            }
            Err(error) => DashboardModel::Failed {
                message: format!("Failed to load dataset: {}", error),
            },
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        let (dataset, selection) = match self {
            DashboardModel::Ready { dataset, selection } => (dataset, selection),
            DashboardModel::Failed { .. } => return false,
        };
        match msg {
            Msg::ToggleStation(station) => {
                let currently_selected =
                    selection.stations.iter().any(|s| s.as_str() == station);
                // keep dataset order so series colors stay stable
                selection.stations = dataset
                    .stations()
                    .iter()
                    .filter(|candidate| {
                        let was_selected =
                            selection.stations.iter().any(|s| s == *candidate);
                        if candidate.as_str() == station {
                            !currently_selected
                        } else {
                            was_selected
                        }
                    })
                    .cloned()
                    .collect();
                true
            }
            Msg::SetGranularity(Some(granularity)) => {
                if selection.granularity == granularity {
                    false
                } else {
                    info!("granularity changed to {}", granularity.label());
                    selection.granularity = granularity;
                    selection.range = default_range(dataset, granularity);
                    true
                }
            }
            // an end before the start is a valid degenerate selection and
            // simply renders empty charts
            Msg::SetRangeStart(Some(date)) => {
                selection.range.start = date.and_time(NaiveTime::MIN);
                true
            }
            Msg::SetRangeEnd(Some(date)) => {
                selection.range.end = date.and_time(NaiveTime::MIN);
                true
            }
            Msg::SetStartYear(Some(year)) => {
                selection.range.start = year_start(year);
                true
            }
            Msg::SetEndYear(Some(year)) => {
                selection.range.end = year_start(year);
                true
            }
            Msg::SetObservationDate(Some(date)) => {
                selection.range = day_range(date);
                true
            }
            // the DOM element was missing or unparseable; nothing changed
            Msg::SetGranularity(None)
            | Msg::SetRangeStart(None)
            | Msg::SetRangeEnd(None)
            | Msg::SetStartYear(None)
            | Msg::SetEndYear(None)
            | Msg::SetObservationDate(None) => false,
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let (dataset, selection) = match self {
            DashboardModel::Ready { dataset, selection } => (dataset, selection),
            DashboardModel::Failed { message } => {
                return html! { <p id="load-error">{message.clone()}</p> };
            }
        };

        let points = baq_data::filter_and_aggregate(dataset, selection);
        let charts: Html = Variable::ALL
            .iter()
            .map(|variable| self.chart_html(selection, &points, *variable))
            .collect();

        html! {
            <div id="dashboard">
                <div id="sidebar">
                    <h1>{SIDEBAR_TITLE}</h1>
                    { self.station_controls(ctx, dataset, selection) }
                    { self.granularity_control(ctx, selection) }
                    { self.range_controls(ctx, dataset, selection) }
                </div>
                <div id="charts">
                    {charts}
                </div>
            </div>
        }
    }
}
