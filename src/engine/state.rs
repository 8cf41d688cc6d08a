use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::DASHBOARD;
use crate::domain::{HistogramPeriod, Overlay, SeriesId};
use crate::engine::{SelectionEvent, SelectionField};

/// The user-chosen parameters that govern which derivations are active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    pub series: SeriesId,
    pub overlays: BTreeSet<Overlay>,
    pub period: HistogramPeriod,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            series: DASHBOARD.default_series,
            overlays: BTreeSet::new(),
            period: DASHBOARD.default_period,
        }
    }
}

impl SelectionState {
    /// Applies an event. Returns the changed field, or `None` when the value is unchanged.
    pub fn apply(&mut self, event: SelectionEvent) -> Option<SelectionField> {
        let field = event.field();
        let changed = match event {
            SelectionEvent::SeriesSelected(series) => {
                std::mem::replace(&mut self.series, series) != series
            }
            SelectionEvent::OverlaysChanged(overlays) => {
                if self.overlays == overlays {
                    false
                } else {
                    self.overlays = overlays;
                    true
                }
            }
            SelectionEvent::PeriodChanged(period) => {
                std::mem::replace(&mut self.period, period) != period
            }
        };
        changed.then_some(field)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ControllerPhase {
    /// No recomputation pending
    #[default]
    Idle,
    Recomputing,
}
