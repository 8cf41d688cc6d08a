mod controller;
mod messages;
mod sink;
mod state;

pub use controller::ChartController;

pub use messages::{
    InputCommand, SelectionEvent, SelectionField, affected_payloads, parse_overlays,
};
pub use sink::{ChartSink, JsonLinesSink, MemorySink};
pub use state::{ControllerPhase, SelectionState};
