mod dataset;
mod derived;
mod series;

pub use {
    dataset::Dataset,
    derived::{DerivedSeries, RollingColumns},
    series::Series,
};
