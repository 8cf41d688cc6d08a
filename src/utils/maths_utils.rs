use statrs::statistics::Statistics;

/// Mean and sample standard deviation (n-1 denominator) of one window.
///
/// Returns `None` for an empty window. The deviation is `None` when the
/// window holds fewer than two observations, since the sample variance is
/// undefined there.
#[inline]
pub(crate) fn sample_mean_and_stddev(window: &[f64]) -> Option<(f64, Option<f64>)> {
    if window.is_empty() {
        return None;
    }

    let mean = window.iter().mean();
    let std_dev = if window.len() < 2 {
        None
    } else {
        Some(window.iter().std_dev().max(0.0))
    };

    Some((mean, std_dev))
}

/// Period-over-period relative change: `(current - previous) / previous`.
/// `None` when the previous value is zero or either input is not finite.
#[inline]
pub(crate) fn percent_change(previous: f64, current: f64) -> Option<f64> {
    if !previous.is_finite() || !current.is_finite() || previous == 0.0 {
        return None;
    }
    Some((current - previous) / previous)
}
