//! baq-cli - renders and inspects the air quality dashboard dataset from
//! the terminal.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "baq-cli",
    version,
    about = "Beijing air quality dashboard toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: baq_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    baq_cmd::run(cli.command)
}
