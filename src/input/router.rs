use std::time::{Duration, Instant};

use crate::foundation::core::BezPath;
use crate::input::event::{PointerAction, PointerEvent, RawInputEvent};
use crate::input::low_latency::LowLatencyInput;
use crate::input::timer::DisarmTimer;
use crate::stroke::path::StrokePathBuilder;
use crate::stroke::style::StrokeStyle;

/// Where the router hands a stroke for rasterization and presentation.
///
/// Called once per applied move sample or per batch, never once per batched point.
pub trait StrokeSink {
    fn draw_stroke(&mut self, path: &BezPath);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouterState {
    Idle,
    Capturing,
}

/// Decides, per sample, whether to build the stroke directly or defer to the low-latency
/// subsystem, and owns the debounced disarm of that subsystem.
#[derive(Debug)]
pub struct InputRouter {
    state: RouterState,
    stroke: StrokePathBuilder,
    low_latency: LowLatencyInput,
    disarm: DisarmTimer,
    disarm_delay: Duration,
}

impl InputRouter {
    pub fn new(low_latency: LowLatencyInput, disarm_delay: Duration) -> Self {
        Self {
            state: RouterState::Idle,
            stroke: StrokePathBuilder::new(),
            low_latency,
            disarm: DisarmTimer::default(),
            disarm_delay,
        }
    }

    pub fn state(&self) -> RouterState {
        self.state
    }

    pub fn stroke(&self) -> &StrokePathBuilder {
        &self.stroke
    }

    pub fn low_latency(&self) -> &LowLatencyInput {
        &self.low_latency
    }

    pub fn low_latency_mut(&mut self) -> &mut LowLatencyInput {
        &mut self.low_latency
    }

    /// When the pending disarm fires, if any.
    pub fn disarm_deadline(&self) -> Option<Instant> {
        self.disarm.deadline()
    }

    /// Handle a host pointer sample. Returns whether the event was consumed.
    pub fn on_pointer(
        &mut self,
        ev: PointerEvent,
        now: Instant,
        sink: &mut dyn StrokeSink,
    ) -> bool {
        if self.low_latency.is_active() {
            // Raw capture owns stroke construction; pointer-down only re-arms it.
            if ev.action == PointerAction::Down {
                self.disarm.cancel();
                self.low_latency.set_enabled(true);
                tracing::trace!("raw capture re-armed");
            }
            return true;
        }

        match ev.action {
            PointerAction::Down => self.begin_stroke(ev),
            PointerAction::Move => {
                if self.state == RouterState::Capturing && self.stroke.extend(ev.point()) {
                    sink.draw_stroke(self.stroke.path());
                }
            }
            PointerAction::Up | PointerAction::Cancel => self.end_stroke(now),
        }
        true
    }

    /// Handle a callback from the low-latency subsystem.
    pub fn on_raw(&mut self, ev: RawInputEvent, now: Instant, sink: &mut dyn StrokeSink) {
        match ev {
            RawInputEvent::BeginDrawing(p) => {
                self.disarm.cancel();
                if let Some(p) = p
                    && self.stroke.begin(p)
                {
                    self.state = RouterState::Capturing;
                }
            }
            RawInputEvent::Points(points) => {
                if self.state != RouterState::Capturing || points.is_empty() {
                    return;
                }
                let applied = self.stroke.extend_batch(points);
                tracing::trace!(applied, "raw batch");
                if applied > 0 {
                    sink.draw_stroke(self.stroke.path());
                }
            }
            RawInputEvent::EndDrawing => self.end_stroke(now),
            RawInputEvent::BeginErasing(_)
            | RawInputEvent::ErasingPoints(_)
            | RawInputEvent::EndErasing => {
                tracing::trace!("erasing is not supported; event ignored");
            }
        }
    }

    /// Fire the pending disarm when due. Returns whether it fired.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.disarm.fire_if_due(now) {
            return false;
        }
        tracing::debug!("quiet period elapsed; disarming raw capture");
        self.low_latency.set_enabled(false);
        true
    }

    pub fn set_style(&mut self, style: StrokeStyle) {
        self.low_latency.set_style(style);
    }

    /// Cancel the pending disarm, tear down the low-latency subsystem and drop the stroke.
    pub fn cleanup(&mut self) {
        self.disarm.cancel();
        self.low_latency.teardown();
        self.stroke.reset();
        self.state = RouterState::Idle;
    }

    /// Restart an in-progress stroke at its last point, dropping what was drawn so far.
    ///
    /// Used after the backing image is cleared mid-stroke so the next composite does not
    /// repaint the erased part.
    pub fn restart_stroke(&mut self) {
        if self.state != RouterState::Capturing {
            return;
        }
        if let Some(&last) = self.stroke.points().last() {
            self.stroke.begin(last);
        }
    }

    fn begin_stroke(&mut self, ev: PointerEvent) {
        if self.stroke.begin(ev.point()) {
            self.state = RouterState::Capturing;
        }
    }

    fn end_stroke(&mut self, now: Instant) {
        self.state = RouterState::Idle;
        self.stroke.reset();
        if self.low_latency.is_active() {
            self.disarm.schedule(now, self.disarm_delay);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/router.rs"]
mod tests;
