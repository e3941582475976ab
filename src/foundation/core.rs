use crate::foundation::error::{InkError, InkResult};

pub use kurbo::{BezPath, Point, Rect};

/// Pixel dimensions of the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    /// Validate dimensions for a raster surface.
    ///
    /// Both sides must be non-zero and fit the rasterizer's `u16` coordinate space.
    pub fn new(width: u32, height: u32) -> InkResult<Self> {
        if width == 0 || height == 0 {
            return Err(InkError::validation(format!(
                "surface size must be non-zero, got {width}x{height}"
            )));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(InkError::validation(format!(
                "surface size {width}x{height} exceeds {}x{}",
                u16::MAX,
                u16::MAX
            )));
        }
        Ok(Self { width, height })
    }

    /// Full-surface bounds in surface coordinates.
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    pub(crate) fn as_u16(self) -> (u16, u16) {
        // `new` guarantees both sides fit.
        (self.width as u16, self.height as u16)
    }
}

pub(crate) fn is_finite_point(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
