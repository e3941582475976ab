//! inkboard is a low-latency freehand drawing surface.
//!
//! Pointer or stylus samples are turned into strokes, rasterized incrementally onto a
//! persistent backing image and mirrored onto a host-supplied surface. On hardware that ships
//! a vendor low-latency pen subsystem, stroke capture is handed to that subsystem while a pen
//! is down and released after a short quiet period.
//!
//! The entry point is [`Whiteboard`]: feed it the host's surface lifecycle callbacks and
//! pointer events, and call [`Whiteboard::pump`] from the owning loop so raw input and the
//! disarm timer are processed on that thread.
#![forbid(unsafe_code)]

mod config;
mod foundation;
mod input;
mod present;
mod raster;
mod replay;
mod stroke;
mod whiteboard;

pub use crate::config::{DISARM_DELAY_ENV, WhiteboardOpts};
pub use crate::foundation::color::Color;
pub use crate::foundation::core::{BezPath, Point, Rect, SurfaceSize};
pub use crate::foundation::error::{InkError, InkResult};

pub use crate::input::device::DeviceInfo;
pub use crate::input::emulated::{EmulatedRawInput, EmulatedState};
pub use crate::input::event::{PointerAction, PointerEvent, RawInputEvent};
pub use crate::input::low_latency::{
    ActivateParams, LowLatencyInput, RawInputDevice, RawInputSender, StrokeKind,
};
pub use crate::input::router::{InputRouter, RouterState, StrokeSink};
pub use crate::input::timer::DisarmTimer;
pub use crate::present::memory::MemorySurface;
pub use crate::present::publisher::{
    AcquiredBuffer, PublishStats, SurfaceBuffer, SurfaceHost, SurfacePublisher,
};
pub use crate::raster::compositor::RasterCompositor;
pub use crate::raster::snapshot::{ImageView, Snapshot};
pub use crate::replay::{RawStep, StyleChange, Trace, TraceEvent, TraceOp, replay};
pub use crate::stroke::path::StrokePathBuilder;
pub use crate::stroke::style::StrokeStyle;
pub use crate::whiteboard::Whiteboard;
