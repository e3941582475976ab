use std::sync::mpsc;
use std::time::Duration;

use crate::foundation::color::Color;
use crate::foundation::core::{Rect, SurfaceSize};
use crate::input::device::DeviceInfo;
use crate::input::event::RawInputEvent;
use crate::stroke::style::StrokeStyle;

/// Brush the subsystem uses for its own on-screen ink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokeKind {
    /// Plain fixed-width line, matching what the compositor draws.
    Pencil,
}

/// Vendor low-latency pen subsystem, seen as a black box.
///
/// Implementations wrap the device SDK. Any method may fail; callers treat every failure as
/// non-fatal. Batched callbacks must be delivered through the [`RawInputSender`] passed to
/// [`RawInputDevice::initialize`], never by touching drawing state directly.
pub trait RawInputDevice {
    /// Create the vendor helper and route its callbacks to `events`.
    fn initialize(&mut self, events: RawInputSender) -> anyhow::Result<()>;

    /// Switch the drawing view between the default and the fast (low-ghosting) refresh mode.
    fn set_fast_refresh(&mut self, enabled: bool) -> anyhow::Result<()>;

    /// How long the subsystem waits after pen-up before doing a full refresh.
    fn set_pen_up_refresh(&mut self, delay: Duration) -> anyhow::Result<()>;

    fn set_stroke_kind(&mut self, kind: StrokeKind) -> anyhow::Result<()>;

    /// Region (surface coordinates) where raw input is intercepted.
    fn set_limit_region(&mut self, bounds: Rect) -> anyhow::Result<()>;

    fn open_raw_drawing(&mut self) -> anyhow::Result<()>;

    fn close_raw_drawing(&mut self) -> anyhow::Result<()>;

    /// Arm or disarm raw capture. While disarmed, input reaches normal UI dispatch.
    fn set_raw_drawing_enabled(&mut self, enabled: bool) -> anyhow::Result<()>;

    fn set_stroke_color(&mut self, color: Color) -> anyhow::Result<()>;

    fn set_stroke_width(&mut self, width: f32) -> anyhow::Result<()>;
}

/// Cloneable handle the vendor callback thread uses to hand events to the owning thread.
#[derive(Clone, Debug)]
pub struct RawInputSender(mpsc::Sender<RawInputEvent>);

impl RawInputSender {
    /// Returns false once the drawing surface is gone.
    pub fn send(&self, event: RawInputEvent) -> bool {
        self.0.send(event).is_ok()
    }
}

/// Owning-thread end of the raw input queue.
#[derive(Debug)]
pub(crate) struct RawInputQueue {
    tx: mpsc::Sender<RawInputEvent>,
    rx: mpsc::Receiver<RawInputEvent>,
}

impl RawInputQueue {
    pub(crate) fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub(crate) fn sender(&self) -> RawInputSender {
        RawInputSender(self.tx.clone())
    }

    /// Everything delivered so far, in arrival order.
    pub(crate) fn drain(&self) -> Vec<RawInputEvent> {
        self.rx.try_iter().collect()
    }

    /// Drop queued events; returns how many were dropped.
    pub(crate) fn discard_pending(&self) -> usize {
        self.rx.try_iter().count()
    }
}

/// Settings applied when the subsystem is brought up.
#[derive(Debug, Clone, Copy)]
pub struct ActivateParams {
    pub size: SurfaceSize,
    pub style: StrokeStyle,
    pub pen_up_refresh: Duration,
}

/// The optional low-latency input capability.
pub enum LowLatencyInput {
    /// Hardware lacks the subsystem, or bringing it up failed this session.
    Unavailable,
    /// Hardware has the subsystem; not initialized yet (or torn down by cleanup).
    Detected(Box<dyn RawInputDevice>),
    /// Initialized; raw capture is open and may be armed.
    Active(Box<dyn RawInputDevice>),
}

impl std::fmt::Debug for LowLatencyInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Unavailable => "Unavailable",
            Self::Detected(_) => "Detected",
            Self::Active(_) => "Active",
        })
    }
}

impl LowLatencyInput {
    /// Build the capability only when the device is known to carry it.
    pub fn detect<F>(device: &DeviceInfo, make: F) -> Self
    where
        F: FnOnce() -> Box<dyn RawInputDevice>,
    {
        if device.supports_low_latency() {
            tracing::debug!(manufacturer = %device.manufacturer, model = %device.model, "low-latency input detected");
            Self::Detected(make())
        } else {
            Self::Unavailable
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }

    /// Initialize a detected device and open raw drawing over the whole surface, disarmed.
    ///
    /// A failing initialization downgrades to [`LowLatencyInput::Unavailable`] for the rest of
    /// the session. Returns whether the capability is active afterwards.
    pub fn activate(&mut self, params: ActivateParams, events: RawInputSender) -> bool {
        let mut dev = match std::mem::replace(self, Self::Unavailable) {
            Self::Detected(dev) => dev,
            other => {
                let active = other.is_active();
                *self = other;
                return active;
            }
        };

        if let Err(e) = initialize(dev.as_mut(), params, events) {
            tracing::error!(error = %e, "failed to initialize low-latency input; using direct input");
            // Leave raw mode and refresh as they were before the failed attempt.
            best_effort("set_fast_refresh", dev.set_fast_refresh(false));
            return false;
        }

        best_effort(
            "set_limit_region",
            dev.set_limit_region(params.size.bounds()),
        );
        best_effort("open_raw_drawing", dev.open_raw_drawing());
        // Armed on the first pointer-down.
        best_effort(
            "set_raw_drawing_enabled",
            dev.set_raw_drawing_enabled(false),
        );
        tracing::debug!(
            width = params.size.width,
            height = params.size.height,
            "low-latency input initialized (disarmed)"
        );
        *self = Self::Active(dev);
        true
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if let Self::Active(dev) = self {
            best_effort("set_raw_drawing_enabled", dev.set_raw_drawing_enabled(enabled));
        }
    }

    pub fn set_limit_region(&mut self, bounds: Rect) {
        if let Self::Active(dev) = self {
            best_effort("set_limit_region", dev.set_limit_region(bounds));
        }
    }

    /// Mirror the stroke style into the subsystem's own renderer.
    pub fn set_style(&mut self, style: StrokeStyle) {
        if let Self::Active(dev) = self {
            best_effort("set_stroke_color", dev.set_stroke_color(style.color));
            best_effort("set_stroke_width", dev.set_stroke_width(style.width));
        }
    }

    /// Disarm, close raw drawing and restore the default refresh mode.
    ///
    /// The device returns to [`LowLatencyInput::Detected`] so a later surface can bring it up
    /// again. Safe to call in any state.
    pub fn teardown(&mut self) {
        let mut dev = match std::mem::replace(self, Self::Unavailable) {
            Self::Active(dev) => dev,
            other => {
                *self = other;
                return;
            }
        };
        best_effort(
            "set_raw_drawing_enabled",
            dev.set_raw_drawing_enabled(false),
        );
        best_effort("close_raw_drawing", dev.close_raw_drawing());
        best_effort("set_fast_refresh", dev.set_fast_refresh(false));
        tracing::debug!("low-latency input torn down");
        *self = Self::Detected(dev);
    }
}

fn initialize(
    dev: &mut dyn RawInputDevice,
    params: ActivateParams,
    events: RawInputSender,
) -> anyhow::Result<()> {
    dev.set_fast_refresh(true)?;
    dev.initialize(events)?;
    dev.set_pen_up_refresh(params.pen_up_refresh)?;
    dev.set_stroke_kind(StrokeKind::Pencil)?;
    dev.set_stroke_color(params.style.color)?;
    dev.set_stroke_width(params.style.width)?;
    Ok(())
}

fn best_effort(op: &'static str, res: anyhow::Result<()>) {
    if let Err(e) = res {
        tracing::warn!(op, error = %e, "low-latency input call failed");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/low_latency.rs"]
mod tests;
