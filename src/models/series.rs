use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Series: one named price history, dates ascending and unique
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub dates: Vec<NaiveDate>,
    pub prices: Vec<f64>,
}

impl Series {
    /// Create a Series from rows in any order.
    /// Rows are sorted by date; when a date repeats, the row read last wins.
    pub fn from_rows(name: impl Into<String>, mut rows: Vec<(NaiveDate, f64)>) -> Self {
        let name = name.into();
        // Stable sort keeps input order among equal dates
        rows.sort_by_key(|(date, _)| *date);

        let mut dates: Vec<NaiveDate> = Vec::with_capacity(rows.len());
        let mut prices: Vec<f64> = Vec::with_capacity(rows.len());
        let mut duplicates = 0usize;

        for (date, price) in rows {
            if dates.last() == Some(&date) {
                if let Some(last) = prices.last_mut() {
                    *last = price;
                }
                duplicates += 1;
            } else {
                dates.push(date);
                prices.push(price);
            }
        }

        if duplicates > 0 {
            log::warn!(
                "Series {}: {} duplicate date(s) collapsed (last value kept)",
                name,
                duplicates
            );
        }

        Self {
            name,
            dates,
            prices,
        }
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    /// The most recent observation.
    pub fn last(&self) -> Option<(NaiveDate, f64)> {
        Some((*self.dates.last()?, *self.prices.last()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, day).unwrap()
    }

    #[test]
    fn rows_are_sorted_by_date() {
        let series = Series::from_rows("brent-daily", vec![(d(3), 3.0), (d(1), 1.0), (d(2), 2.0)]);
        assert_eq!(series.dates, vec![d(1), d(2), d(3)]);
        assert_eq!(series.prices, vec![1.0, 2.0, 3.0]);
        assert_eq!(series.last(), Some((d(3), 3.0)));
    }

    #[test]
    fn duplicate_dates_keep_last_row() {
        let series = Series::from_rows("wti-daily", vec![(d(1), 1.0), (d(2), 2.0), (d(1), 9.0)]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.prices, vec![9.0, 2.0]);
    }

    #[test]
    fn empty_series_has_no_last() {
        let series = Series::from_rows("wti-year", vec![]);
        assert!(series.is_empty());
        assert_eq!(series.last(), None);
        assert_eq!(series.first_date(), None);
    }
}
