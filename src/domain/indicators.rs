use {
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumIter, EnumString},
};

/// Trailing window length for the rolling statistics.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
#[serde(try_from = "usize", into = "usize")]
pub enum RollingWindow {
    W20,
    W50,
    W100,
}

impl RollingWindow {
    pub const fn size(&self) -> usize {
        match self {
            Self::W20 => 20,
            Self::W50 => 50,
            Self::W100 => 100,
        }
    }

    pub fn from_size(size: usize) -> Option<Self> {
        match size {
            20 => Some(Self::W20),
            50 => Some(Self::W50),
            100 => Some(Self::W100),
            _ => None,
        }
    }
}

impl TryFrom<usize> for RollingWindow {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::from_size(value).ok_or_else(|| format!("Unsupported rolling window: {}", value))
    }
}

impl From<RollingWindow> for usize {
    fn from(window: RollingWindow) -> Self {
        window.size()
    }
}

impl std::fmt::Display for RollingWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.size())
    }
}

/// Moving-average overlay drawn on top of the price line.
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
)]
pub enum Overlay {
    #[strum(serialize = "SMA20")]
    #[serde(rename = "SMA20")]
    Sma20,
    #[strum(serialize = "SMA50")]
    #[serde(rename = "SMA50")]
    Sma50,
    #[strum(serialize = "SMA100")]
    #[serde(rename = "SMA100")]
    Sma100,
}

impl Overlay {
    pub fn window(&self) -> RollingWindow {
        match self {
            Self::Sma20 => RollingWindow::W20,
            Self::Sma50 => RollingWindow::W50,
            Self::Sma100 => RollingWindow::W100,
        }
    }
}

/// Lookback for the returns histogram.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
#[serde(try_from = "usize", into = "usize")]
pub enum HistogramPeriod {
    P20,
    P60,
    P100,
    P250,
}

impl HistogramPeriod {
    pub const fn periods(&self) -> usize {
        match self {
            Self::P20 => 20,
            Self::P60 => 60,
            Self::P100 => 100,
            Self::P250 => 250,
        }
    }
}

impl TryFrom<usize> for HistogramPeriod {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            20 => Ok(Self::P20),
            60 => Ok(Self::P60),
            100 => Ok(Self::P100),
            250 => Ok(Self::P250),
            _ => Err(format!("Unsupported histogram period: {}", value)),
        }
    }
}

impl From<HistogramPeriod> for usize {
    fn from(period: HistogramPeriod) -> Self {
        period.periods()
    }
}

impl std::str::FromStr for HistogramPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: usize = s
            .trim()
            .parse()
            .map_err(|_| format!("Not a period count: {:?}", s))?;
        Self::try_from(value)
    }
}

impl std::fmt::Display for HistogramPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.periods())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn overlay_names_match_column_labels() {
        assert_eq!(Overlay::from_str("SMA50").unwrap(), Overlay::Sma50);
        assert_eq!(Overlay::Sma100.to_string(), "SMA100");
        assert_eq!(Overlay::Sma20.window().size(), 20);
        assert!(Overlay::from_str("SMA200").is_err());
    }

    #[test]
    fn period_accepts_only_enumerated_values() {
        assert_eq!(HistogramPeriod::from_str("60"), Ok(HistogramPeriod::P60));
        assert!(HistogramPeriod::from_str("50").is_err());
        assert!(HistogramPeriod::from_str("abc").is_err());
        assert_eq!(serde_json::to_string(&HistogramPeriod::P250).unwrap(), "250");
    }

    #[test]
    fn window_lengths() {
        assert_eq!(RollingWindow::from_size(50), Some(RollingWindow::W50));
        assert_eq!(RollingWindow::from_size(30), None);
    }
}
