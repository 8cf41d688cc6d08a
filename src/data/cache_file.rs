//! Versioned columnar cache artifact.
//!
//! Layout (bincode, fixed-width little-endian integers):
//! 1. `CacheHeader { magic, schema_version, created_ms }`
//! 2. `Vec<SeriesTable>`, one table per series: name, date column as days
//!    from CE, price column.
//!
//! The header is decoded and checked before the tables so a foreign or
//! outdated file fails with a clear error instead of a decode fault.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::config::PERSISTENCE;
use crate::models::{Dataset, Series};
use crate::utils::{TimeUtils, now_timestamp_ms};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CacheHeader {
    pub magic: [u8; 4],
    pub schema_version: u32,
    pub created_ms: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SeriesTable {
    pub name: String,
    pub dates: Vec<i32>,
    pub prices: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CacheFile {
    pub header: CacheHeader,
    pub tables: Vec<SeriesTable>,
}

impl CacheFile {
    pub fn new(dataset: &Dataset) -> Self {
        let tables = dataset
            .iter()
            .map(|series| SeriesTable {
                name: series.name.clone(),
                dates: series.dates.iter().map(|d| TimeUtils::date_to_days(*d)).collect(),
                prices: series.prices.clone(),
            })
            .collect();

        Self {
            header: CacheHeader {
                magic: PERSISTENCE.cache.magic,
                schema_version: PERSISTENCE.cache.schema_version,
                created_ms: now_timestamp_ms(),
            },
            tables,
        }
    }

    pub fn into_dataset(self) -> Result<Dataset> {
        let mut dataset = Dataset::new();
        for table in self.tables {
            if table.dates.len() != table.prices.len() {
                bail!(
                    "Cache table {} is ragged: {} dates vs {} prices",
                    table.name,
                    table.dates.len(),
                    table.prices.len()
                );
            }
            let dates = table
                .dates
                .iter()
                .map(|&days| {
                    TimeUtils::days_to_date(days)
                        .with_context(|| format!("Invalid date {} in cache table {}", days, table.name))
                })
                .collect::<Result<Vec<_>>>()?;

            dataset.insert(Series {
                name: table.name,
                dates,
                prices: table.prices,
            });
        }
        Ok(dataset)
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        bincode::serialize_into(&mut writer, &self.header).context("Failed to encode cache header")?;
        bincode::serialize_into(&mut writer, &self.tables).context("Failed to encode cache tables")?;
        writer.flush()?;
        Ok(())
    }

    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let header: CacheHeader =
            bincode::deserialize_from(&mut reader).context("Failed to decode cache header")?;

        if header.magic != PERSISTENCE.cache.magic {
            bail!("Not an oil price cache (magic {:?})", header.magic);
        }

        if header.schema_version != PERSISTENCE.cache.schema_version {
            bail!(
                "Cache schema mismatch: file v{} vs required v{}",
                header.schema_version,
                PERSISTENCE.cache.schema_version
            );
        }

        let tables: Vec<SeriesTable> =
            bincode::deserialize_from(&mut reader).context("Failed to decode cache tables")?;

        Ok(Self { header, tables })
    }

    /// Writes to a sibling temp file, then renames it over `path`.
    /// A failed write leaves no file at `path`.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        write_atomically(path, |writer| self.write_to(writer))
            .with_context(|| format!("Failed to write cache to: {}", path.display()))
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
        Self::read_from(BufReader::new(file))
            .with_context(|| format!("Failed to read cache from: {:?}", path))
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(BufWriter<fs::File>) -> Result<()>,
{
    let tmp = temp_path(path);
    let result = create_file_with_parents(&tmp)
        .and_then(|file| write(BufWriter::new(file)))
        .and_then(|()| {
            fs::rename(&tmp, path)
                .with_context(|| format!("Failed to move {} into place", tmp.display()))
        });

    if result.is_err() && tmp.is_file() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

// Helper function to create a new file and any missing parent directories.
fn create_file_with_parents(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))
}
