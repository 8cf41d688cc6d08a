use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

use crate::chart::{ChartPayload, PayloadKind};

/// Receives chart-ready payloads. Stands in for the rendering surface.
pub trait ChartSink {
    fn publish(&mut self, target: PayloadKind, payload: ChartPayload) -> Result<()>;
}

#[derive(Serialize)]
struct Envelope<'a> {
    target: PayloadKind,
    payload: &'a ChartPayload,
}

/// Writes one JSON object per payload, one per line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ChartSink for JsonLinesSink<W> {
    fn publish(&mut self, target: PayloadKind, payload: ChartPayload) -> Result<()> {
        serde_json::to_writer(
            &mut self.writer,
            &Envelope {
                target,
                payload: &payload,
            },
        )
        .with_context(|| format!("Failed to encode {} payload", target))?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps every published payload in order.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub published: Vec<(PayloadKind, ChartPayload)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kinds(&self) -> Vec<PayloadKind> {
        self.published.iter().map(|(kind, _)| *kind).collect()
    }

    /// Most recent payload published to `target`.
    pub fn latest(&self, target: PayloadKind) -> Option<&ChartPayload> {
        self.published
            .iter()
            .rev()
            .find(|(kind, _)| *kind == target)
            .map(|(_, payload)| payload)
    }

    pub fn clear(&mut self) {
        self.published.clear();
    }
}

impl ChartSink for MemorySink {
    fn publish(&mut self, target: PayloadKind, payload: ChartPayload) -> Result<()> {
        self.published.push((target, payload));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::EmptyPayload;
    use crate::domain::SeriesId;

    #[test]
    fn json_lines_are_tagged_by_target() {
        let mut sink = JsonLinesSink::new(Vec::new());
        let payload = ChartPayload::Empty(EmptyPayload {
            series: SeriesId::WtiWeek,
            message: "no data".to_string(),
        });
        sink.publish(PayloadKind::Gauge50, payload.clone()).unwrap();
        sink.publish(PayloadKind::Line, payload).unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> =
            out.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["target"], "50-gauge-chart");
        assert_eq!(lines[0]["payload"]["type"], "empty");
        assert_eq!(lines[0]["payload"]["series"], "wti-week");
        assert_eq!(lines[1]["target"], "line-chart");
    }
}
