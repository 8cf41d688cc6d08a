use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::sync::Arc;
use tabled::{Table, Tabled};

use crate::config::default_cache_path;
use crate::data::{DatapackageSource, load_dataset};
use crate::domain::SeriesId;
use crate::engine::{ChartController, InputCommand, JsonLinesSink, SelectionState};
use crate::models::Dataset;
use crate::{Cli, Command};

/// Load once, then hand the dataset to the selected host mode.
pub fn run_app(args: Cli) -> Result<()> {
    let cache_path = args.cache.clone().unwrap_or_else(default_cache_path);
    let remote = DatapackageSource::new(&args.source_url)?;

    let dataset = {
        let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
        runtime
            .block_on(load_dataset(&cache_path, &remote))
            .context("Startup failure: dataset could not be loaded")?
    };
    let dataset = Arc::new(dataset);
    log::info!("Dataset ready: {:?}", dataset.names().collect::<Vec<_>>());

    let stdout = std::io::stdout();
    match args.command {
        Command::Render(selection) => {
            render(dataset, selection.into(), stdout.lock())?;
        }
        Command::Listen(selection) => {
            let stdin = std::io::stdin();
            listen(dataset, selection.into(), stdin.lock(), stdout.lock())?;
        }
        Command::Summary => {
            writeln!(stdout.lock(), "{}", summary_table(&dataset))?;
        }
    }
    Ok(())
}

/// Publishes the full payload set for one selection.
pub fn render<W: Write>(dataset: Arc<Dataset>, selection: SelectionState, out: W) -> Result<usize> {
    let mut controller = ChartController::new(dataset, selection, JsonLinesSink::new(out));
    controller.initialize()
}

/// Event loop: publishes the initial payloads, then applies one input line at a time.
///
/// Lines that fail validation are logged and dropped. Blank lines and `#`
/// comments are ignored. Stops at `quit` or end of input.
pub fn listen<R: BufRead, W: Write>(
    dataset: Arc<Dataset>,
    selection: SelectionState,
    input: R,
    out: W,
) -> Result<usize> {
    let mut controller = ChartController::new(dataset, selection, JsonLinesSink::new(out));
    let mut published = controller.initialize()?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match trimmed.parse::<InputCommand>() {
            Ok(InputCommand::Quit) => break,
            Ok(InputCommand::Event(event)) => published += controller.handle_event(event)?,
            Err(e) => log::warn!("Rejected input {:?}: {:#}", trimmed, e),
        }
    }

    log::info!("Input closed after {} published payloads", published);
    Ok(published)
}

#[derive(Tabled)]
struct SeriesRow {
    #[tabled(rename = "Series")]
    name: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Rows")]
    rows: usize,
    #[tabled(rename = "First")]
    first: String,
    #[tabled(rename = "Last")]
    last: String,
    #[tabled(rename = "Last Price")]
    last_price: String,
}

pub fn summary_table(dataset: &Dataset) -> String {
    let rows = dataset.iter().map(|series| {
        let (last, last_price) = match series.last() {
            Some((date, price)) => (date.to_string(), format!("{:.2}", price)),
            None => ("-".to_string(), "-".to_string()),
        };
        let label = series
            .name
            .parse::<SeriesId>()
            .map_or_else(|_| "-".to_string(), |id| id.label());
        SeriesRow {
            name: series.name.clone(),
            label,
            rows: series.len(),
            first: series
                .first_date()
                .map_or_else(|| "-".to_string(), |d| d.to_string()),
            last,
            last_price,
        }
    });
    Table::new(rows).to_string()
}
