use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::{DF, SOURCE};
use crate::data::{CacheFile, parse_price_csv};
use crate::models::{Dataset, Series};

/// Abstract interface for obtaining the full price dataset.
#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// Short human-readable origin, used in logs.
    fn signature(&self) -> &'static str;

    async fn fetch_dataset(&self) -> Result<Dataset>;
}

// ============================================================================
// Local cache artifact
// ============================================================================

pub struct CacheSource {
    path: PathBuf,
}

impl CacheSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SeriesSource for CacheSource {
    fn signature(&self) -> &'static str {
        "Local Cache"
    }

    async fn fetch_dataset(&self) -> Result<Dataset> {
        let start_time = std::time::Instant::now();

        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read cache: {:?}", self.path))?;

        // Decoding is CPU-bound
        let cache = tokio::task::spawn_blocking(move || CacheFile::read_from(bytes.as_slice()))
            .await
            .context("Cache decode task panicked")?
            .with_context(|| format!("Failed to decode cache from: {:?}", self.path))?;

        let created_ms = cache.header.created_ms;
        let dataset = cache.into_dataset()?;

        log::info!(
            "✅ Cache loaded: {} series in {:.2}s (written {}, {} ago)",
            dataset.len(),
            start_time.elapsed().as_secs_f64(),
            crate::utils::epoch_ms_to_utc(created_ms),
            crate::utils::format_duration(crate::utils::now_timestamp_ms() - created_ms),
        );

        Ok(dataset)
    }
}

// ============================================================================
// Remote tabular data package (datapackage.json + CSV resources)
// ============================================================================

#[derive(Debug, Deserialize)]
struct PackageDescriptor {
    #[serde(default)]
    resources: Vec<ResourceDescriptor>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResourcePath {
    Single(String),
    Chunked(Vec<String>),
}

#[derive(Debug, Deserialize)]
struct ResourceDescriptor {
    name: String,
    path: Option<ResourcePath>,
    format: Option<String>,
    profile: Option<String>,
}

impl ResourceDescriptor {
    /// Every chunk of the resource, in order. Only the first chunk carries the header row.
    fn paths(&self) -> Vec<&str> {
        match &self.path {
            Some(ResourcePath::Single(path)) => vec![path.as_str()],
            Some(ResourcePath::Chunked(paths)) => paths.iter().map(String::as_str).collect(),
            None => Vec::new(),
        }
    }

    fn path(&self) -> Option<&str> {
        self.paths().first().copied()
    }

    fn is_tabular(&self) -> bool {
        self.profile.as_deref() == Some(SOURCE.tabular_profile)
            || self
                .format
                .as_deref()
                .is_some_and(|f| f.eq_ignore_ascii_case("csv"))
            || self
                .path()
                .is_some_and(|p| p.to_ascii_lowercase().ends_with(".csv"))
    }

    /// `brent-daily_csv` -> `brent-daily`
    fn series_name(&self) -> &str {
        self.name
            .strip_suffix(SOURCE.csv_resource_suffix)
            .unwrap_or(&self.name)
    }
}

impl PackageDescriptor {
    /// `(series name, chunk paths)` per tabular resource.
    /// When two resources map to the same series, the first listed wins.
    fn tabular_resources(&self) -> Vec<(String, Vec<String>)> {
        let mut seen = HashSet::new();
        let mut tabular = Vec::new();

        for resource in self.resources.iter().filter(|r| r.is_tabular()) {
            let name = resource.series_name();
            let paths: Vec<String> = resource.paths().into_iter().map(str::to_string).collect();
            if paths.is_empty() {
                log::warn!("Resource {} has no path; skipped", resource.name);
                continue;
            }
            if !seen.insert(name.to_string()) {
                log::warn!(
                    "Resource {} duplicates series {}; keeping the first one listed",
                    resource.name,
                    name
                );
                continue;
            }
            tabular.push((name.to_string(), paths));
        }
        tabular
    }
}

/// Concatenates CSV chunks, keeping a line break between them.
fn join_chunks<I, B>(chunks: I) -> Vec<u8>
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut joined: Vec<u8> = Vec::new();
    for chunk in chunks {
        if joined.last().is_some_and(|&b| b != b'\n') {
            joined.push(b'\n');
        }
        joined.extend_from_slice(chunk.as_ref());
    }
    joined
}

pub struct DatapackageSource {
    client: Client,
    package_url: Url,
}

impl DatapackageSource {
    pub fn new(package_url: &str) -> Result<Self> {
        let package_url = Url::parse(package_url)
            .with_context(|| format!("Invalid data package URL: {}", package_url))?;
        let client = Client::builder()
            .timeout(Duration::from_millis(SOURCE.timeout_ms))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            package_url,
        })
    }

    async fn fetch_resource(&self, name: String, paths: Vec<String>) -> Result<Series> {
        let mut chunks = Vec::with_capacity(paths.len());
        for path in &paths {
            chunks.push(self.fetch_chunk(&name, path).await?);
        }

        if paths.len() > 1 {
            log::info!("{}: joined {} chunks", name, paths.len());
        }

        parse_price_csv(&name, join_chunks(&chunks).as_slice())
    }

    async fn fetch_chunk(&self, name: &str, path: &str) -> Result<Vec<u8>> {
        let url = self
            .package_url
            .join(path)
            .with_context(|| format!("Bad resource path {} for {}", path, name))?;

        if DF.log_fetch {
            log::info!("Fetching {} from {}", name, url);
        }

        self.client
            .get(url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .with_context(|| format!("Failed to fetch resource {} ({})", name, url))?
            .bytes()
            .await
            .map(|body| body.to_vec())
            .with_context(|| format!("Failed to read resource body {}", name))
    }
}

#[async_trait]
impl SeriesSource for DatapackageSource {
    fn signature(&self) -> &'static str {
        "Remote Data Package"
    }

    async fn fetch_dataset(&self) -> Result<Dataset> {
        let descriptor: PackageDescriptor = self
            .client
            .get(self.package_url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .with_context(|| format!("Data package unreachable: {}", self.package_url))?
            .json()
            .await
            .context("Failed to parse datapackage.json")?;

        let tabular = descriptor.tabular_resources();

        log::info!(
            "Data package lists {} resources, {} tabular",
            descriptor.resources.len(),
            tabular.len()
        );

        if tabular.is_empty() {
            bail!("Data package {} has no tabular resources", self.package_url);
        }

        let series = try_join_all(
            tabular
                .into_iter()
                .map(|(name, paths)| self.fetch_resource(name, paths)),
        )
        .await?;

        Ok(series.into_iter().collect())
    }
}

// ============================================================================
// Directory of `<name>.csv` files
// ============================================================================

pub struct CsvDirectorySource {
    dir: PathBuf,
}

impl CsvDirectorySource {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl SeriesSource for CsvDirectorySource {
    fn signature(&self) -> &'static str {
        "CSV Directory"
    }

    async fn fetch_dataset(&self) -> Result<Dataset> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .with_context(|| format!("Failed to list {:?}", self.dir))?;

        let mut dataset = Dataset::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_csv = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !is_csv {
                continue;
            }

            let name = stem.strip_suffix(SOURCE.csv_resource_suffix).unwrap_or(stem);
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("Failed to read {:?}", path))?;
            dataset.insert(parse_price_csv(name, bytes.as_slice())?);
        }

        if dataset.is_empty() {
            bail!("No CSV files found in {:?}", self.dir);
        }
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resources(json: &str) -> Vec<ResourceDescriptor> {
        serde_json::from_str::<PackageDescriptor>(json).unwrap().resources
    }

    #[test]
    fn filters_to_tabular_resources() {
        let list = resources(
            r#"{"name": "oil-prices", "resources": [
                {"name": "validation_report", "path": "data/validation_report.json", "format": "json"},
                {"name": "brent-daily_csv", "path": "data/brent-daily_csv.csv", "format": "csv"},
                {"name": "wti-week", "path": "data/wti-week.csv", "profile": "tabular-data-resource"},
                {"name": "brent-year_json", "path": "data/brent-year_json.json", "format": "json"},
                {"name": "chunked", "path": ["data/a.csv", "data/b.csv"]}
            ]}"#,
        );
        let tabular: Vec<_> = list
            .iter()
            .filter(|r| r.is_tabular())
            .map(|r| r.series_name())
            .collect();
        assert_eq!(tabular, vec!["brent-daily", "wti-week", "chunked"]);
    }

    #[test]
    fn chunked_resources_keep_every_chunk() {
        let descriptor: PackageDescriptor = serde_json::from_str(
            r#"{"resources": [
                {"name": "wti-daily_csv", "format": "csv", "path": ["data/wti-1.csv", "data/wti-2.csv"]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            descriptor.tabular_resources(),
            vec![(
                "wti-daily".to_string(),
                vec!["data/wti-1.csv".to_string(), "data/wti-2.csv".to_string()]
            )]
        );

        // header only in the first chunk, which has no trailing newline
        let joined = join_chunks(["Date,Price\n2020-01-02,61.17", "2020-01-03,63.0\n"]);
        let series = parse_price_csv("wti-daily", joined.as_slice()).unwrap();
        assert_eq!(series.prices, vec![61.17, 63.0]);
    }

    #[test]
    fn duplicate_series_resources_are_fetched_once() {
        let descriptor: PackageDescriptor = serde_json::from_str(
            r#"{"resources": [
                {"name": "brent-daily", "path": "data/brent-daily.csv"},
                {"name": "brent-daily_csv", "path": "data/brent-daily_csv.csv", "format": "csv"},
                {"name": "brent-week_csv", "path": "data/brent-week_csv.csv", "format": "csv"},
                {"name": "empty_csv", "format": "csv", "path": []}
            ]}"#,
        )
        .unwrap();
        let tabular = descriptor.tabular_resources();
        let names: Vec<_> = tabular.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["brent-daily", "brent-week"]);
        assert_eq!(tabular[0].1, vec!["data/brent-daily.csv".to_string()]);
    }

    #[test]
    fn descriptor_without_resources() {
        assert!(resources(r#"{"name": "empty"}"#).is_empty());
    }

    #[test]
    fn resource_paths_resolve_against_package() {
        let source = DatapackageSource::new("https://example.org/core/oil-prices/datapackage.json").unwrap();
        let url = source.package_url.join("data/brent-daily_csv.csv").unwrap();
        assert_eq!(url.as_str(), "https://example.org/core/oil-prices/data/brent-daily_csv.csv");
        assert!(DatapackageSource::new("not a url").is_err());
    }

    #[tokio::test]
    async fn reads_csv_directory() {
        let dir = std::env::temp_dir().join(format!("oil-gauge-csv-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("brent-daily_csv.csv"), "Date,Price\n2020-01-02,66.25\n").unwrap();
        std::fs::write(dir.join("wti-daily.csv"), "Date,Price\n2020-01-02,61.17\n").unwrap();
        std::fs::write(dir.join("README.md"), "not data").unwrap();

        let dataset = CsvDirectorySource::new(&dir).fetch_dataset().await.unwrap();
        assert_eq!(dataset.names().collect::<Vec<_>>(), vec!["brent-daily", "wti-daily"]);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
