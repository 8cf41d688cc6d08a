use std::collections::BTreeSet;
use std::str::FromStr;

use anyhow::{Result, anyhow, bail};

use crate::chart::PayloadKind;
use crate::domain::{HistogramPeriod, Overlay, SeriesId};

/// An external input change. Values are already validated against the enumerated sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    SeriesSelected(SeriesId),
    OverlaysChanged(BTreeSet<Overlay>),
    PeriodChanged(HistogramPeriod),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionField {
    Series,
    Overlays,
    Period,
}

impl SelectionEvent {
    pub fn field(&self) -> SelectionField {
        match self {
            Self::SeriesSelected(_) => SelectionField::Series,
            Self::OverlaysChanged(_) => SelectionField::Overlays,
            Self::PeriodChanged(_) => SelectionField::Period,
        }
    }
}

/// Dispatch table: which payloads go stale when a field changes.
pub fn affected_payloads(field: SelectionField) -> &'static [PayloadKind] {
    match field {
        SelectionField::Series => &[
            PayloadKind::Line,
            PayloadKind::Histogram,
            PayloadKind::Gauge20,
            PayloadKind::Gauge50,
            PayloadKind::Gauge100,
        ],
        SelectionField::Overlays => &[PayloadKind::Line],
        SelectionField::Period => &[PayloadKind::Histogram],
    }
}

/// One line of the text input surface.
///
/// ```text
/// series wti-week
/// overlays SMA20,SMA100      (or: overlays none)
/// period 60
/// quit
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    Event(SelectionEvent),
    Quit,
}

pub fn parse_overlays(text: &str) -> Result<BTreeSet<Overlay>> {
    let text = text.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("none") {
        return Ok(BTreeSet::new());
    }
    text.split(',')
        .map(|item| {
            Overlay::from_str(item.trim()).map_err(|_| anyhow!("Unknown overlay: {:?}", item.trim()))
        })
        .collect()
}

impl FromStr for InputCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (command, argument) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let argument = argument.trim();

        let event = match command.to_ascii_lowercase().as_str() {
            "quit" | "exit" => return Ok(Self::Quit),
            "series" => SelectionEvent::SeriesSelected(
                SeriesId::from_str(argument).map_err(|_| anyhow!("Unknown series: {:?}", argument))?,
            ),
            "overlays" => SelectionEvent::OverlaysChanged(parse_overlays(argument)?),
            "period" => SelectionEvent::PeriodChanged(
                HistogramPeriod::from_str(argument).map_err(|e| anyhow!(e))?,
            ),
            "" => bail!("Empty command"),
            other => bail!("Unknown command: {:?}", other),
        };
        Ok(Self::Event(event))
    }
}
