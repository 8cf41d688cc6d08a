//! File persistence and serialization configuration
use std::path::PathBuf;

/// Configuration for the price cache artifact
pub struct CachePersistenceConfig {
    /// Directory path for storing the cache artifact
    pub directory: &'static str,
    /// Base filename for the cache artifact (without extension)
    pub filename_base: &'static str,
    /// Magic bytes at the start of every cache artifact
    pub magic: [u8; 4],
    /// Current version of the columnar cache schema. Bump on any layout change.
    pub schema_version: u32,
}

/// The Master Persistence Configuration
pub struct PersistenceConfig {
    pub cache: CachePersistenceConfig,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    cache: CachePersistenceConfig {
        directory: "oil_data",
        filename_base: "oil_prices",
        magic: *b"OILC",
        schema_version: 1,
    },
};

/// Default cache location.
/// Example: "oil_data/oil_prices_v1.bin"
pub fn default_cache_path() -> PathBuf {
    PathBuf::from(PERSISTENCE.cache.directory).join(format!(
        "{}_v{}.bin",
        PERSISTENCE.cache.filename_base, PERSISTENCE.cache.schema_version
    ))
}
