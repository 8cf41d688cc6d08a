//! Price table parsing for `Date,Price` CSV resources.

use anyhow::{Context, Result, anyhow};
use std::io::Read;

use crate::models::Series;
use crate::utils::TimeUtils;

/// Parse one CSV table into a Series named `name`.
///
/// Headers are matched case-insensitively. Rows with a blank or unparsable
/// date or price are skipped.
pub fn parse_price_csv<R: Read>(name: &str, reader: R) -> Result<Series> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read CSV headers for {}", name))?
        .clone();
    let column = |wanted: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| anyhow!("{}: missing '{}' column (headers: {:?})", name, wanted, headers))
    };
    let date_idx = column("Date")?;
    let price_idx = column("Price")?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("{}: malformed CSV record {}", name, line + 1))?;

        let date = record.get(date_idx).and_then(TimeUtils::parse_flexible_date);
        let price = record
            .get(price_idx)
            .and_then(|p| p.parse::<f64>().ok())
            .filter(|p| p.is_finite());

        match (date, price) {
            (Some(date), Some(price)) => rows.push((date, price)),
            _ => {
                log::debug!("{}: skipping row {}: {:?}", name, line + 1, record);
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        log::warn!("{}: skipped {} unusable row(s)", name, skipped);
    }

    Ok(Series::from_rows(name, rows))
}
