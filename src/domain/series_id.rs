use {
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumIter, EnumString, IntoStaticStr},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
pub enum Benchmark {
    #[strum(to_string = "Brent")]
    Brent,
    #[strum(to_string = "WTI")]
    Wti,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// The eight selectable price series: {brent, wti} x {daily, week, month, year}.
///
/// The string form (`brent-daily`, ...) is the canonical dataset key.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum SeriesId {
    #[default]
    #[strum(serialize = "brent-daily")]
    BrentDaily,
    #[strum(serialize = "brent-week")]
    BrentWeek,
    #[strum(serialize = "brent-month")]
    BrentMonth,
    #[strum(serialize = "brent-year")]
    BrentYear,
    #[strum(serialize = "wti-daily")]
    WtiDaily,
    #[strum(serialize = "wti-week")]
    WtiWeek,
    #[strum(serialize = "wti-month")]
    WtiMonth,
    #[strum(serialize = "wti-year")]
    WtiYear,
}

impl SeriesId {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    pub fn benchmark(&self) -> Benchmark {
        match self {
            Self::BrentDaily | Self::BrentWeek | Self::BrentMonth | Self::BrentYear => {
                Benchmark::Brent
            }
            Self::WtiDaily | Self::WtiWeek | Self::WtiMonth | Self::WtiYear => Benchmark::Wti,
        }
    }

    pub fn frequency(&self) -> Frequency {
        match self {
            Self::BrentDaily | Self::WtiDaily => Frequency::Daily,
            Self::BrentWeek | Self::WtiWeek => Frequency::Weekly,
            Self::BrentMonth | Self::WtiMonth => Frequency::Monthly,
            Self::BrentYear | Self::WtiYear => Frequency::Yearly,
        }
    }

    /// Dropdown label, e.g. "Daily Brent".
    pub fn label(&self) -> String {
        format!("{} {}", self.frequency(), self.benchmark())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn eight_series_with_unique_keys() {
        let keys: std::collections::BTreeSet<_> = SeriesId::iter().map(|id| id.as_str()).collect();
        assert_eq!(keys.len(), 8);
        assert!(keys.contains("wti-month"));
    }

    #[test]
    fn parses_and_labels() {
        let id = SeriesId::from_str("wti-week").unwrap();
        assert_eq!(id, SeriesId::WtiWeek);
        assert_eq!(id.to_string(), "wti-week");
        assert_eq!(id.label(), "Weekly WTI");
        assert_eq!(SeriesId::BrentDaily.label(), "Daily Brent");
        assert!(SeriesId::from_str("brent-hourly").is_err());
    }

    #[test]
    fn serde_uses_canonical_key() {
        assert_eq!(serde_json::to_string(&SeriesId::BrentYear).unwrap(), "\"brent-year\"");
    }
}
