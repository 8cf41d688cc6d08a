//! Configuration module for the oil price dashboard.

// Can all be private now because we have a public re-export.
mod dashboard;
mod debug;
mod persistence;
mod source;

// Can't be private because we don't re-export it
pub mod plot;

// Re-export commonly used items
pub use dashboard::{DASHBOARD, DashboardConfig};
pub use debug::{DF, LOG_PERFORMANCE};
pub use persistence::{PERSISTENCE, default_cache_path};
pub use source::{SOURCE, SourceConfig};
