mod cache_file;
mod csv_table;
mod pre_main_async;
mod provider;

pub use {
    cache_file::{CacheFile, CacheHeader, SeriesTable},
    csv_table::parse_price_csv,
    pre_main_async::{load_dataset, write_cache_async},
    provider::{CacheSource, CsvDirectorySource, DatapackageSource, SeriesSource},
};
