use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::foundation::color::Color;
use crate::foundation::core::Rect;
use crate::input::event::RawInputEvent;
use crate::input::low_latency::{RawInputDevice, RawInputSender, StrokeKind};

/// Observable state of an [`EmulatedRawInput`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EmulatedState {
    /// Every trait call, in order.
    pub calls: Vec<&'static str>,
    pub initialized: bool,
    pub open: bool,
    pub enabled: bool,
    pub fast_refresh: bool,
    pub pen_up_refresh: Option<Duration>,
    pub stroke_kind: Option<StrokeKind>,
    pub limit_region: Option<Rect>,
    pub color: Option<Color>,
    pub width: Option<f32>,
}

#[derive(Default)]
struct Shared {
    state: EmulatedState,
    events: Option<RawInputSender>,
}

/// In-process stand-in for a vendor low-latency pen subsystem.
///
/// Clones share state: keep one clone as a handle to inspect calls and to inject raw events
/// the way the vendor callback thread would.
#[derive(Clone, Default)]
pub struct EmulatedRawInput {
    shared: Arc<Mutex<Shared>>,
    fail_init: bool,
}

impl EmulatedRawInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// A device whose `initialize` always fails.
    pub fn failing_init() -> Self {
        Self {
            fail_init: true,
            ..Self::default()
        }
    }

    pub fn state(&self) -> EmulatedState {
        self.lock().state.clone()
    }

    /// Deliver an event as the vendor thread would.
    ///
    /// Dropped unless raw drawing is open and armed, or when nobody is listening.
    pub fn send(&self, event: RawInputEvent) -> bool {
        let shared = self.lock();
        if !(shared.state.open && shared.state.enabled) {
            return false;
        }
        shared.events.as_ref().is_some_and(|tx| tx.send(event))
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: &'static str) -> MutexGuard<'_, Shared> {
        let mut shared = self.lock();
        shared.state.calls.push(call);
        shared
    }
}

impl RawInputDevice for EmulatedRawInput {
    fn initialize(&mut self, events: RawInputSender) -> anyhow::Result<()> {
        let mut shared = self.record("initialize");
        if self.fail_init {
            anyhow::bail!("emulated pen subsystem refused to start");
        }
        shared.state.initialized = true;
        shared.events = Some(events);
        Ok(())
    }

    fn set_fast_refresh(&mut self, enabled: bool) -> anyhow::Result<()> {
        self.record("set_fast_refresh").state.fast_refresh = enabled;
        Ok(())
    }

    fn set_pen_up_refresh(&mut self, delay: Duration) -> anyhow::Result<()> {
        self.record("set_pen_up_refresh").state.pen_up_refresh = Some(delay);
        Ok(())
    }

    fn set_stroke_kind(&mut self, kind: StrokeKind) -> anyhow::Result<()> {
        self.record("set_stroke_kind").state.stroke_kind = Some(kind);
        Ok(())
    }

    fn set_limit_region(&mut self, bounds: Rect) -> anyhow::Result<()> {
        self.record("set_limit_region").state.limit_region = Some(bounds);
        Ok(())
    }

    fn open_raw_drawing(&mut self) -> anyhow::Result<()> {
        let mut shared = self.record("open_raw_drawing");
        anyhow::ensure!(shared.state.initialized, "raw drawing opened before initialize");
        shared.state.open = true;
        Ok(())
    }

    fn close_raw_drawing(&mut self) -> anyhow::Result<()> {
        let mut shared = self.record("close_raw_drawing");
        shared.state.open = false;
        shared.state.enabled = false;
        Ok(())
    }

    fn set_raw_drawing_enabled(&mut self, enabled: bool) -> anyhow::Result<()> {
        self.record("set_raw_drawing_enabled").state.enabled = enabled;
        Ok(())
    }

    fn set_stroke_color(&mut self, color: Color) -> anyhow::Result<()> {
        self.record("set_stroke_color").state.color = Some(color);
        Ok(())
    }

    fn set_stroke_width(&mut self, width: f32) -> anyhow::Result<()> {
        self.record("set_stroke_width").state.width = Some(width);
        Ok(())
    }
}
