// Async dataset load, run once before the selection loop starts

use anyhow::{Context, Result, bail};
use std::path::Path;

use crate::data::{CacheFile, CacheSource, SeriesSource};
use crate::models::Dataset;

/// Load the dataset, preferring the local cache artifact.
///
/// With a cache present the remote source is never contacted. Without one the
/// remote source is fetched once and the result is written to `cache_path`;
/// a failed cache write is logged and does not fail the load. There is no
/// refresh: a stale cache is served as-is.
pub async fn load_dataset(cache_path: &Path, remote: &dyn SeriesSource) -> Result<Dataset> {
    if cache_path.exists() {
        let local = CacheSource::new(cache_path);
        log::info!("Loading dataset via {} at {:?}", local.signature(), cache_path);
        return local.fetch_dataset().await;
    }

    log::info!(
        "No cache at {:?}; fetching dataset via {}...",
        cache_path,
        remote.signature()
    );

    let dataset = remote
        .fetch_dataset()
        .await
        .with_context(|| format!("{} failed and no local cache exists", remote.signature()))?;

    if dataset.is_empty() {
        bail!("{} returned no series", remote.signature());
    }

    if let Err(e) = write_cache_async(cache_path, &dataset).await {
        log::warn!("⚠️  Could not write cache {:?}: {:#}", cache_path, e);
    }

    Ok(dataset)
}

/// Writes the cache artifact on a blocking thread.
pub async fn write_cache_async(cache_path: &Path, dataset: &Dataset) -> Result<()> {
    let cache = CacheFile::new(dataset);
    let path = cache_path.to_path_buf();
    let start_time = std::time::Instant::now();

    tokio::task::spawn_blocking(move || cache.save_to_path(&path))
        .await
        .context("Cache write task panicked")??;

    let file_size = std::fs::metadata(cache_path)?.len();
    log::info!(
        "✅ Cache written: {:?} ({:.1} KB in {:.2}s)",
        cache_path,
        file_size as f64 / 1024.0,
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}
