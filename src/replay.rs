use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::config::WhiteboardOpts;
use crate::foundation::color::Color;
use crate::foundation::core::{Point, SurfaceSize};
use crate::foundation::error::{InkError, InkResult};
use crate::input::device::DeviceInfo;
use crate::input::emulated::EmulatedRawInput;
use crate::input::event::{PointerEvent, RawInputEvent};
use crate::input::low_latency::LowLatencyInput;
use crate::present::memory::MemorySurface;
use crate::raster::snapshot::Snapshot;
use crate::whiteboard::Whiteboard;

/// A recorded input session: surface size, optional device identity and timed events.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Trace {
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<DeviceInfo>,
    #[serde(default)]
    pub events: Vec<TraceEvent>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TraceEvent {
    /// Milliseconds since the start of the session; never decreasing.
    #[serde(default)]
    pub t_ms: u64,
    pub op: TraceOp,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceOp {
    Pointer(PointerEvent),
    /// What the vendor subsystem would report. Only delivered while raw capture is armed.
    Raw(RawStep),
    Style(StyleChange),
    Clear,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawStep {
    Begin(Option<[f64; 2]>),
    Points(Vec<[f64; 2]>),
    End,
}

impl RawStep {
    fn to_event(&self) -> RawInputEvent {
        let pt = |[x, y]: [f64; 2]| Point::new(x, y);
        match self {
            Self::Begin(p) => RawInputEvent::BeginDrawing(p.map(pt)),
            Self::Points(ps) => RawInputEvent::Points(ps.iter().copied().map(pt).collect()),
            Self::End => RawInputEvent::EndDrawing,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleChange {
    pub color: Option<Color>,
    pub width: Option<f32>,
}

impl Trace {
    pub fn from_reader<R: std::io::Read>(r: R) -> InkResult<Self> {
        let trace: Self = serde_json::from_reader(r)
            .map_err(|e| InkError::serde(format!("parse trace JSON: {e}")))?;
        trace.validate()?;
        Ok(trace)
    }

    pub fn from_path(path: impl AsRef<Path>) -> InkResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            InkError::serde(format!("open trace JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> InkResult<()> {
        SurfaceSize::new(self.width, self.height)?;
        if let Some(w) = self.events.windows(2).find(|w| w[1].t_ms < w[0].t_ms) {
            return Err(InkError::validation(format!(
                "trace timestamps go backwards ({} ms after {} ms)",
                w[1].t_ms, w[0].t_ms
            )));
        }
        Ok(())
    }

    fn duration(&self) -> Duration {
        Duration::from_millis(self.events.last().map_or(0, |e| e.t_ms))
    }
}

/// Play `trace` against a headless board and return the final drawing.
///
/// With `emulate_low_latency` (or a capable `device` in the trace) raw events go through an
/// [`EmulatedRawInput`]; otherwise they are ignored and pointer events draw directly. Timing is
/// virtual: the board is pumped at each event's timestamp and once more after the disarm delay.
#[tracing::instrument(skip(trace, opts), fields(events = trace.events.len()))]
pub fn replay(
    trace: &Trace,
    opts: WhiteboardOpts,
    emulate_low_latency: bool,
) -> InkResult<Snapshot> {
    trace.validate()?;

    let capable = emulate_low_latency
        || trace
            .device
            .as_ref()
            .is_some_and(DeviceInfo::supports_low_latency);
    let device = capable.then(EmulatedRawInput::new);
    let low_latency = match &device {
        Some(dev) => LowLatencyInput::Detected(Box::new(dev.clone())),
        None => LowLatencyInput::Unavailable,
    };

    let disarm_delay = opts.disarm_delay();
    let mut board = Whiteboard::new(
        MemorySurface::new(trace.width, trace.height),
        opts,
        low_latency,
    )?;
    board.on_surface_created();
    board.on_surface_changed(trace.width, trace.height)?;

    let start = Instant::now();
    for ev in &trace.events {
        let now = start + Duration::from_millis(ev.t_ms);
        board.pump(now);
        match &ev.op {
            TraceOp::Pointer(p) => {
                board.on_pointer_event(*p, now);
            }
            TraceOp::Raw(step) => match &device {
                Some(dev) => {
                    if !dev.send(step.to_event()) {
                        tracing::debug!(t_ms = ev.t_ms, "raw capture not armed; event dropped");
                    }
                }
                None => tracing::debug!(t_ms = ev.t_ms, "no low-latency device; raw event ignored"),
            },
            TraceOp::Style(change) => {
                if let Some(color) = change.color {
                    board.set_color(color);
                }
                if let Some(width) = change.width {
                    board.set_stroke_width(width)?;
                }
            }
            TraceOp::Clear => board.clear(),
        }
    }
    board.pump(start + trace.duration() + disarm_delay);

    let stats = board.publish_stats();
    tracing::debug!(
        presented = stats.presented,
        skipped = stats.skipped,
        "replay finished"
    );
    let snapshot = board
        .snapshot()
        .ok_or_else(|| InkError::validation("surface was never sized"))?;
    board.on_surface_destroyed();
    Ok(snapshot)
}

#[cfg(test)]
#[path = "../tests/unit/replay.rs"]
mod tests;
