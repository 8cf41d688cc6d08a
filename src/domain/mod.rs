// Domain types and value objects
mod indicators;
mod series_id;

// Re-export commonly used types to the world
pub use indicators::{HistogramPeriod, Overlay, RollingWindow};
pub use series_id::{Benchmark, Frequency, SeriesId};
