use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use oil_gauge::config::default_cache_path;
use oil_gauge::data::{CsvDirectorySource, SeriesSource, write_cache_async};

/// Build the price cache artifact from local CSV files (one `<series>.csv` per series).
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding `brent-daily.csv`, `wti-week_csv.csv`, ...
    #[arg(long)]
    input_dir: PathBuf,

    /// Cache artifact to write
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Setup Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let output = args.output.unwrap_or_else(default_cache_path);

    log::info!("🚀 Building cache from CSV directory: {:?}", args.input_dir);

    // 2. Extract Data
    let source = CsvDirectorySource::new(&args.input_dir);
    let dataset = source
        .fetch_dataset()
        .await
        .with_context(|| format!("Failed to read CSV tables from {:?}", args.input_dir))?;

    for series in dataset.iter() {
        log::info!("   {} -> {} rows", series.name, series.len());
    }

    // 3. Save
    log::info!("📦 Serializing to {:?}", output);
    write_cache_async(&output, &dataset).await?;

    log::info!("✅ Success!");
    Ok(())
}
