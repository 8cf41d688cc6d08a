use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{Overlay, RollingWindow};
use crate::models::Series;

/// Rolling mean and sample deviation columns for one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollingColumns {
    pub window: RollingWindow,
    pub sma: Vec<Option<f64>>,
    pub std: Vec<Option<f64>>,
}

/// A Series plus the computed columns.
/// Every column has one entry per observation; `None` marks an undefined value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedSeries {
    pub series: Series,
    pub rolling_20: RollingColumns,
    pub rolling_50: RollingColumns,
    pub rolling_100: RollingColumns,
    pub returns: Vec<Option<f64>>,
}

impl DerivedSeries {
    pub fn name(&self) -> &str {
        &self.series.name
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.series.dates
    }

    pub fn prices(&self) -> &[f64] {
        &self.series.prices
    }

    pub fn rolling(&self, window: RollingWindow) -> &RollingColumns {
        match window {
            RollingWindow::W20 => &self.rolling_20,
            RollingWindow::W50 => &self.rolling_50,
            RollingWindow::W100 => &self.rolling_100,
        }
    }

    pub fn sma(&self, window: RollingWindow) -> &[Option<f64>] {
        &self.rolling(window).sma
    }

    pub fn std(&self, window: RollingWindow) -> &[Option<f64>] {
        &self.rolling(window).std
    }

    /// The column drawn for a line chart overlay.
    pub fn overlay(&self, overlay: Overlay) -> &[Option<f64>] {
        self.sma(overlay.window())
    }
}
