use std::collections::BTreeMap;

use crate::domain::SeriesId;
use crate::models::Series;

/// Every loaded series keyed by canonical name. Read-only once loaded.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Dataset {
    series: BTreeMap<String, Series>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a series under its own name, replacing any previous entry.
    pub fn insert(&mut self, series: Series) -> Option<Series> {
        self.series.insert(series.name.clone(), series)
    }

    pub fn get(&self, id: SeriesId) -> Option<&Series> {
        self.series.get(id.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.series.values()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl FromIterator<Series> for Dataset {
    fn from_iter<I: IntoIterator<Item = Series>>(iter: I) -> Self {
        let mut dataset = Self::new();
        for series in iter {
            dataset.insert(series);
        }
        dataset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn lookup_by_series_id() {
        let date = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
        let dataset: Dataset = [
            Series::from_rows("brent-daily", vec![(date, 64.0)]),
            Series::from_rows("wti-daily", vec![(date, 60.0)]),
        ]
        .into_iter()
        .collect();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.get(SeriesId::WtiDaily).map(|s| s.prices[0]), Some(60.0));
        assert!(dataset.get(SeriesId::BrentYear).is_none());
        assert_eq!(dataset.names().collect::<Vec<_>>(), vec!["brent-daily", "wti-daily"]);
    }
}
