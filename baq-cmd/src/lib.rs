//! Command implementations for the air quality CLI.
//!
//! Provides subcommands for rendering the dashboard charts to SVG files
//! and for inspecting a dataset file without the browser app.

use baq_core::granularity::Granularity;
use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};

pub mod render;
pub mod report;

/// Time-bucket size, as a CLI argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GranularityArg {
    Yearly,
    Monthly,
    Daily,
    Hourly,
}

impl From<GranularityArg> for Granularity {
    fn from(arg: GranularityArg) -> Granularity {
        match arg {
            GranularityArg::Yearly => Granularity::Yearly,
            GranularityArg::Monthly => Granularity::Monthly,
            GranularityArg::Daily => Granularity::Daily,
            GranularityArg::Hourly => Granularity::Hourly,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Render every variable chart for a dataset as SVG files
    Render {
        /// Path to the air quality CSV dataset
        #[arg(short = 'd', long)]
        dataset_csv: String,

        /// Directory the per-variable SVG files are written to
        #[arg(short = 'o', long, default_value = "charts")]
        out_dir: String,

        /// Time bucket size
        #[arg(short = 'g', long, value_enum, default_value_t = GranularityArg::Monthly)]
        granularity: GranularityArg,

        /// Stations to chart; repeat the flag for several (default: all)
        #[arg(short = 's', long = "station")]
        stations: Vec<String>,

        /// Range start (YYYY-MM-DD); granularity default when omitted
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Range end (YYYY-MM-DD); granularity default when omitted
        #[arg(long)]
        end: Option<NaiveDate>,
    },

    /// List the stations present in a dataset
    Stations {
        /// Path to the air quality CSV dataset
        #[arg(short = 'd', long)]
        dataset_csv: String,
    },

    /// Print dataset bounds and counts as JSON
    Summary {
        /// Path to the air quality CSV dataset
        #[arg(short = 'd', long)]
        dataset_csv: String,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Render {
            dataset_csv,
            out_dir,
            granularity,
            stations,
            start,
            end,
        } => render::run_render(
            &dataset_csv,
            &out_dir,
            granularity.into(),
            &stations,
            start,
            end,
        ),
        Command::Stations { dataset_csv } => report::run_stations(&dataset_csv),
        Command::Summary { dataset_csv } => report::run_summary(&dataset_csv),
    }
}
