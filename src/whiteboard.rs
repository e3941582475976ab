use std::time::Instant;

use crate::config::WhiteboardOpts;
use crate::foundation::color::Color;
use crate::foundation::core::{BezPath, SurfaceSize};
use crate::foundation::error::{InkError, InkResult};
use crate::input::device::DeviceInfo;
use crate::input::event::PointerEvent;
use crate::input::low_latency::{
    ActivateParams, LowLatencyInput, RawInputDevice, RawInputQueue, RawInputSender,
};
use crate::input::router::{InputRouter, StrokeSink};
use crate::present::publisher::{PublishStats, SurfaceHost, SurfacePublisher};
use crate::raster::compositor::RasterCompositor;
use crate::raster::snapshot::Snapshot;
use crate::stroke::style::StrokeStyle;

/// Compositor + publisher: what a stroke update goes through.
struct Pipeline<H: SurfaceHost> {
    compositor: RasterCompositor,
    publisher: SurfacePublisher<H>,
    style: StrokeStyle,
}

impl<H: SurfaceHost> Pipeline<H> {
    fn republish(&mut self) {
        if let Some(view) = self.compositor.view() {
            self.publisher.publish(view);
        }
    }
}

impl<H: SurfaceHost> StrokeSink for Pipeline<H> {
    fn draw_stroke(&mut self, path: &BezPath) {
        self.compositor.composite(path, self.style);
        self.republish();
    }
}

/// A freehand drawing surface.
///
/// Owns the backing image, the presentation path and the input router. Every method is meant
/// to be called from the one thread that owns the host surface; raw input produced elsewhere
/// enters through [`Whiteboard::raw_input_sender`] and is applied by [`Whiteboard::pump`].
pub struct Whiteboard<H: SurfaceHost> {
    pipeline: Pipeline<H>,
    router: InputRouter,
    raw_queue: RawInputQueue,
    opts: WhiteboardOpts,
}

impl<H: SurfaceHost> Whiteboard<H> {
    pub fn new(host: H, opts: WhiteboardOpts, low_latency: LowLatencyInput) -> InkResult<Self> {
        opts.validate()?;
        Ok(Self {
            pipeline: Pipeline {
                compositor: RasterCompositor::new(),
                publisher: SurfacePublisher::new(host),
                style: opts.stroke_style(),
            },
            router: InputRouter::new(low_latency, opts.disarm_delay()),
            raw_queue: RawInputQueue::new(),
            opts,
        })
    }

    /// Like [`Whiteboard::new`], building the low-latency device only on capable hardware.
    pub fn for_device<F>(host: H, opts: WhiteboardOpts, device: &DeviceInfo, make: F) -> InkResult<Self>
    where
        F: FnOnce() -> Box<dyn RawInputDevice>,
    {
        Self::new(host, opts, LowLatencyInput::detect(device, make))
    }

    /// Host callback: the surface exists. Shows a transparent frame.
    #[tracing::instrument(skip(self))]
    pub fn on_surface_created(&mut self) {
        self.pipeline.publisher.clear_screen();
    }

    /// Host callback: the surface has (new) dimensions.
    ///
    /// Resizes the backing image keeping its content, brings up the low-latency subsystem on
    /// first use, and republishes.
    #[tracing::instrument(skip(self))]
    pub fn on_surface_changed(&mut self, width: u32, height: u32) -> InkResult<()> {
        self.pipeline.compositor.ensure_surface(width, height)?;

        if matches!(self.router.low_latency(), LowLatencyInput::Detected(_)) {
            let params = ActivateParams {
                size: SurfaceSize::new(width, height)?,
                style: self.pipeline.style,
                pen_up_refresh: std::time::Duration::from_millis(self.opts.pen_up_refresh_ms),
            };
            let sender = self.raw_queue.sender();
            self.router.low_latency_mut().activate(params, sender);
        } else if let Ok(size) = SurfaceSize::new(width, height) {
            self.router.low_latency_mut().set_limit_region(size.bounds());
        }

        self.pipeline.republish();
        Ok(())
    }

    /// Host callback: the surface is gone. Tears everything down; idempotent.
    #[tracing::instrument(skip(self))]
    pub fn on_surface_destroyed(&mut self) {
        self.cleanup();
        self.pipeline.compositor.release();
    }

    /// Host pointer entry point. Returns whether the event was consumed.
    pub fn on_pointer_event(&mut self, ev: PointerEvent, now: Instant) -> bool {
        self.router.on_pointer(ev, now, &mut self.pipeline)
    }

    /// Apply raw input delivered since the last call, then fire the disarm timer if due.
    ///
    /// Returns the number of raw events applied.
    pub fn pump(&mut self, now: Instant) -> usize {
        let events = self.raw_queue.drain();
        let n = events.len();
        for ev in events {
            self.router.on_raw(ev, now, &mut self.pipeline);
        }
        self.router.poll(now);
        n
    }

    /// When the owning loop should call [`Whiteboard::pump`] next without new input.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.router.disarm_deadline()
    }

    /// Handle for the vendor callback thread.
    pub fn raw_input_sender(&self) -> RawInputSender {
        self.raw_queue.sender()
    }

    /// Erase everything, on the backing image and on screen.
    pub fn clear(&mut self) {
        self.pipeline.compositor.clear_all();
        self.router.restart_stroke();
        self.pipeline.publisher.clear_screen();
    }

    pub fn set_color(&mut self, color: Color) {
        self.pipeline.style = self.pipeline.style.with_color(color);
        self.router.set_style(self.pipeline.style);
    }

    pub fn set_stroke_width(&mut self, width: f32) -> InkResult<()> {
        if !width.is_finite() || width <= 0.0 {
            return Err(InkError::validation(format!(
                "stroke width must be finite and > 0, got {width}"
            )));
        }
        self.pipeline.style = self.pipeline.style.with_width(width);
        self.router.set_style(self.pipeline.style);
        Ok(())
    }

    pub fn style(&self) -> StrokeStyle {
        self.pipeline.style
    }

    /// Copy of the drawing; `None` until the surface has been sized.
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.pipeline.compositor.snapshot()
    }

    /// Tear down the low-latency subsystem and drop transient stroke state.
    ///
    /// For hiding the board without destroying the surface. Idempotent; the subsystem comes
    /// back on the next [`Whiteboard::on_surface_changed`].
    #[tracing::instrument(skip(self))]
    pub fn cleanup(&mut self) {
        self.router.cleanup();
        let dropped = self.raw_queue.discard_pending();
        if dropped > 0 {
            tracing::debug!(dropped, "discarded queued raw input");
        }
    }

    pub fn router(&self) -> &InputRouter {
        &self.router
    }

    pub fn compositor(&self) -> &RasterCompositor {
        &self.pipeline.compositor
    }

    pub fn publish_stats(&self) -> PublishStats {
        self.pipeline.publisher.stats()
    }

    pub fn host(&self) -> &H {
        self.pipeline.publisher.host()
    }

    pub fn host_mut(&mut self) -> &mut H {
        self.pipeline.publisher.host_mut()
    }

    pub fn opts(&self) -> &WhiteboardOpts {
        &self.opts
    }
}

#[cfg(test)]
#[path = "../tests/unit/whiteboard.rs"]
mod tests;
