//! Command-line entry point: load raw tick files, clean them, aggregate the
//! requested window into OHLCV bars, and write the bars as CSV.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tickforge_bars::{IntervalSpec, Window};
use tickforge_core::{Config, Error};
use tickforge_ingestion::TickLoader;
use tickforge_pipeline::{build_dataset, export, query_bars, BarRequest};

#[derive(Parser, Debug)]
#[command(
    name = "tickforge",
    about = "Clean raw tick CSV files and aggregate them into OHLCV bars"
)]
struct Args {
    /// Directory containing the raw tick CSV files
    #[arg(short, long)]
    data_dir: PathBuf,

    /// Window start, e.g. "2024-09-19 09:30:00.000"
    #[arg(long)]
    start: String,

    /// Window end, e.g. "2024-09-19 16:00:00.000"
    #[arg(long)]
    end: String,

    /// Bar interval, e.g. "1m", "1h30m", "90s"
    #[arg(short, long)]
    interval: String,

    /// Output CSV path (defaults to <interval>_bars.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Optional JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_json_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    // reject a bad request before any file is touched
    let interval = IntervalSpec::parse(&args.interval)?;
    let window = Window::parse(&args.start, &args.end)?;

    let loader = TickLoader::new(&args.data_dir, &config.loader);
    let rows = loader.load().await?;
    info!(rows = rows.len(), dir = %args.data_dir.display(), "loaded raw rows");

    let (index, report) = build_dataset(rows, &config)?;
    info!(
        surviving = report.surviving_ticks,
        lower = report.bounds.lower,
        upper = report.bounds.upper,
        "dataset ready"
    );

    let request = BarRequest { window, interval };
    let bars = match query_bars(&index, &request, &config.session) {
        Ok(bars) => bars,
        Err(err @ Error::OutOfRange { .. }) => {
            warn!(error = %err, "window has no overlap with the dataset; writing zero bars");
            Vec::new()
        }
        Err(err) => return Err(err.into()),
    };

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(export::default_output_name(&interval)));
    export::write_bars_to_path(&bars, &output)?;
    info!(bars = bars.len(), output = %output.display(), "wrote bar file");

    Ok(())
}
