//! Chart composition: turns a DerivedSeries into declarative chart payloads.
mod gauge;
mod histogram;
mod line;
mod payload;

pub use gauge::{NEUTRAL_ANGLE, compose_gauge, pointer_angle};
pub use histogram::{bin_values, compose_histogram};
pub use line::compose_line;
pub use payload::{
    Annotation, AxisConfig, ChartLayout, ChartPayload, EmptyPayload, GaugeBand, GaugePayload,
    GaugeSection, HistogramBin, HistogramPayload, LinePayload, LineTrace, PayloadKind, Shape,
};
