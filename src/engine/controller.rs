use std::collections::VecDeque;
use std::sync::Arc;

use anyhow::Result;

use crate::analysis::derive;
use crate::chart::{
    ChartPayload, EmptyPayload, PayloadKind, compose_gauge, compose_histogram, compose_line,
};
use crate::config::{DASHBOARD, DF};
use crate::models::{Dataset, DerivedSeries};

use super::messages::{SelectionEvent, SelectionField, affected_payloads};
use super::sink::ChartSink;
use super::state::{ControllerPhase, SelectionState};

/// Reactive binding between selection events and chart payloads.
///
/// Each applied event enqueues one request per stale payload kind; the queue
/// is drained synchronously before the next event is accepted.
pub struct ChartController<S: ChartSink> {
    /// Loaded once at startup, read-only afterwards
    dataset: Arc<Dataset>,
    state: SelectionState,
    phase: ControllerPhase,

    /// Derived columns for `state.series`, dropped when the series changes
    derived: Option<Arc<DerivedSeries>>,
    queue: VecDeque<PayloadKind>,
    sink: S,

    /// Number of times the Metric Deriver has run
    derivations: usize,
}

impl<S: ChartSink> ChartController<S> {
    pub fn new(dataset: Arc<Dataset>, state: SelectionState, sink: S) -> Self {
        Self {
            dataset,
            state,
            phase: ControllerPhase::Idle,
            derived: None,
            queue: VecDeque::new(),
            sink,
            derivations: 0,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    pub fn derivations(&self) -> usize {
        self.derivations
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Publishes every payload for the current selection.
    pub fn initialize(&mut self) -> Result<usize> {
        self.enqueue(PayloadKind::Line);
        self.enqueue(PayloadKind::Histogram);
        for &window in DASHBOARD.gauge_windows {
            self.enqueue(PayloadKind::gauge(window));
        }
        self.drain()
    }

    /// Applies one event and republishes the payloads it invalidates.
    /// Returns how many payloads were published (0 when the value did not change).
    pub fn handle_event(&mut self, event: SelectionEvent) -> Result<usize> {
        let Some(field) = self.state.apply(event) else {
            log::debug!("Selection unchanged; nothing to recompute");
            return Ok(0);
        };

        if field == SelectionField::Series {
            self.derived = None;
        }

        for &kind in affected_payloads(field) {
            self.enqueue(kind);
        }

        if DF.log_selection {
            log::info!("Selection {:?} changed -> recompute {:?}", field, self.queue);
        }

        self.drain()
    }

    /// Explicit dispatch loop over a stream of events.
    pub fn run<I>(&mut self, events: I) -> Result<usize>
    where
        I: IntoIterator<Item = SelectionEvent>,
    {
        let mut published = 0;
        for event in events {
            published += self.handle_event(event)?;
        }
        Ok(published)
    }

    fn enqueue(&mut self, kind: PayloadKind) {
        if !self.queue.contains(&kind) {
            self.queue.push_back(kind);
        }
    }

    fn drain(&mut self) -> Result<usize> {
        self.phase = ControllerPhase::Recomputing;
        let mut published = 0;

        while let Some(kind) = self.queue.pop_front() {
            let payload = self.compose(kind);
            if let Err(e) = self.sink.publish(kind, payload) {
                self.queue.clear();
                self.phase = ControllerPhase::Idle;
                return Err(e);
            }
            published += 1;
        }

        self.phase = ControllerPhase::Idle;
        Ok(published)
    }

    /// Derived columns for the selected series, computed on first use.
    fn derived(&mut self) -> Option<Arc<DerivedSeries>> {
        if self.derived.is_none() {
            let series = self.dataset.get(self.state.series)?;
            let derived = crate::trace_time!("derive", 5_000, { derive(series) });
            self.derivations += 1;
            self.derived = Some(Arc::new(derived));
        }
        self.derived.clone()
    }

    fn compose(&mut self, kind: PayloadKind) -> ChartPayload {
        let series = self.state.series;
        let Some(derived) = self.derived() else {
            log::warn!("Series {} not in dataset; publishing empty {}", series, kind);
            return empty(series, "No data for this series");
        };

        let payload = match kind {
            PayloadKind::Line => {
                compose_line(&derived, &self.state.overlays).map(ChartPayload::Line)
            }
            PayloadKind::Histogram => {
                compose_histogram(&derived, self.state.period).map(ChartPayload::Histogram)
            }
            PayloadKind::Gauge20 | PayloadKind::Gauge50 | PayloadKind::Gauge100 => kind
                .gauge_window()
                .and_then(|window| compose_gauge(&derived, window))
                .map(ChartPayload::Gauge),
        };

        payload.unwrap_or_else(|| empty(series, "Series has no observations"))
    }
}

fn empty(series: crate::domain::SeriesId, message: &str) -> ChartPayload {
    ChartPayload::Empty(EmptyPayload {
        series,
        message: message.to_string(),
    })
}
