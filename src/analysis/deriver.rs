//! Metric derivation: rolling statistics and returns over a price column.
//!
//! Every function here is pure. The same input yields the same output bit for bit.

use itertools::Itertools;

use crate::domain::RollingWindow;
use crate::models::{DerivedSeries, RollingColumns, Series};
use crate::utils::{percent_change, sample_mean_and_stddev};

/// Computes SMA/STD for every rolling window plus period-over-period returns.
pub fn derive(series: &Series) -> DerivedSeries {
    let rolling = |window: RollingWindow| {
        let (sma, std) = rolling_mean_std(&series.prices, window.size());
        RollingColumns { window, sma, std }
    };

    DerivedSeries {
        rolling_20: rolling(RollingWindow::W20),
        rolling_50: rolling(RollingWindow::W50),
        rolling_100: rolling(RollingWindow::W100),
        returns: percent_changes(&series.prices),
        series: series.clone(),
    }
}

/// Trailing-window mean and sample standard deviation.
///
/// Output `i` covers inputs `[i - k + 1, i]` and is `None` while `i < k - 1`.
/// A window of one observation has a mean but no sample deviation.
pub fn rolling_mean_std(values: &[f64], k: usize) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
    let mut means = vec![None; values.len()];
    let mut stds = vec![None; values.len()];

    if k == 0 || values.len() < k {
        return (means, stds);
    }

    for (offset, window) in values.windows(k).enumerate() {
        if let Some((mean, std)) = sample_mean_and_stddev(window) {
            let i = offset + k - 1;
            means[i] = Some(mean);
            stds[i] = std;
        }
    }

    (means, stds)
}

/// `(p[i] - p[i-1]) / p[i-1]`, undefined at `i = 0`.
pub fn percent_changes(values: &[f64]) -> Vec<Option<f64>> {
    if values.is_empty() {
        return Vec::new();
    }

    std::iter::once(None)
        .chain(
            values
                .iter()
                .tuple_windows()
                .map(|(&previous, &current)| percent_change(previous, current)),
        )
        .collect()
}
