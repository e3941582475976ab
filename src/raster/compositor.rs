use kurbo::Shape;

use crate::foundation::core::{BezPath, Rect, SurfaceSize};
use crate::foundation::error::InkResult;
use crate::foundation::math::over;
use crate::raster::snapshot::{ImageView, Snapshot};
use crate::stroke::style::StrokeStyle;

/// The persistent backing image plus the render context bound to it.
struct BackingImage {
    size: SurfaceSize,
    pixmap: vello_cpu::Pixmap,
    // Strokes are rasterized here first, then blended into `pixmap` over their dirty rect.
    layer: vello_cpu::Pixmap,
    ctx: vello_cpu::RenderContext,
}

impl BackingImage {
    fn new(size: SurfaceSize) -> Self {
        let (w, h) = size.as_u16();
        Self {
            size,
            pixmap: vello_cpu::Pixmap::new(w, h),
            layer: vello_cpu::Pixmap::new(w, h),
            ctx: vello_cpu::RenderContext::new(w, h),
        }
    }

    /// Copy `old` into the top-left corner, clipped to the overlap.
    fn copy_from(&mut self, old: &BackingImage) {
        let copy_w = self.size.width.min(old.size.width) as usize * 4;
        let copy_h = self.size.height.min(old.size.height) as usize;
        let dst_stride = self.size.width as usize * 4;
        let src_stride = old.size.width as usize * 4;

        let src = old.pixmap.data_as_u8_slice();
        let dst = self.pixmap.data_as_u8_slice_mut();
        for y in 0..copy_h {
            let s = y * src_stride;
            let d = y * dst_stride;
            dst[d..d + copy_w].copy_from_slice(&src[s..s + copy_w]);
        }
    }
}

/// Owns the backing image and rasterizes strokes onto it.
#[derive(Default)]
pub struct RasterCompositor {
    backing: Option<BackingImage>,
    allocations: u64,
}

impl RasterCompositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure the backing image has the given dimensions.
    ///
    /// Unchanged dimensions are a no-op. Otherwise a fresh transparent image is allocated and
    /// the previous content is copied in at the origin. Returns whether a reallocation happened.
    pub fn ensure_surface(&mut self, width: u32, height: u32) -> InkResult<bool> {
        let size = SurfaceSize::new(width, height)?;
        if self.backing.as_ref().is_some_and(|b| b.size == size) {
            return Ok(false);
        }

        let mut fresh = BackingImage::new(size);
        if let Some(old) = self.backing.take() {
            tracing::debug!(
                from_w = old.size.width,
                from_h = old.size.height,
                to_w = width,
                to_h = height,
                "resizing backing image"
            );
            fresh.copy_from(&old);
        } else {
            tracing::debug!(width, height, "allocating backing image");
        }
        self.backing = Some(fresh);
        self.allocations = self.allocations.saturating_add(1);
        Ok(true)
    }

    /// Stroke `path` onto the backing image with `style`.
    ///
    /// Antialiased, round joins and caps, source-over. Without a backing image, or for an empty
    /// path, nothing happens.
    pub fn composite(&mut self, path: &BezPath, style: StrokeStyle) {
        let Some(backing) = self.backing.as_mut() else {
            return;
        };
        if path.elements().is_empty() {
            return;
        }
        let Some((x0, y0, x1, y1)) =
            dirty_pixels(path.bounding_box(), style.coverage_radius(), backing.size)
        else {
            return;
        };

        let BackingImage {
            size,
            pixmap,
            layer,
            ctx,
        } = backing;

        let c = style.color;
        ctx.reset();
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
        match tap_point(path) {
            // The stroker emits no caps for a segment of zero length.
            Some(p) => {
                let dot = vello_cpu::kurbo::Circle::new(
                    vello_cpu::kurbo::Point::new(p.x, p.y),
                    f64::from(style.width) * 0.5,
                );
                ctx.fill_path(&vello_cpu::kurbo::Shape::to_path(&dot, 0.1));
            }
            None => {
                ctx.set_stroke(style.to_cpu_stroke());
                ctx.stroke_path(&bezpath_to_cpu(path));
            }
        }
        ctx.flush();
        layer.data_as_u8_slice_mut().fill(0);
        ctx.render_to_pixmap(layer);

        let stride = size.width as usize * 4;
        let src = layer.data_as_u8_slice();
        let dst = pixmap.data_as_u8_slice_mut();
        for y in y0..y1 {
            let row = y * stride;
            for x in x0..x1 {
                let i = row + x * 4;
                let s = [src[i], src[i + 1], src[i + 2], src[i + 3]];
                if s[3] == 0 {
                    continue;
                }
                let d = [dst[i], dst[i + 1], dst[i + 2], dst[i + 3]];
                dst[i..i + 4].copy_from_slice(&over(d, s));
            }
        }
    }

    /// Reset every pixel to fully transparent.
    pub fn clear_all(&mut self) {
        if let Some(backing) = self.backing.as_mut() {
            backing.pixmap.data_as_u8_slice_mut().fill(0);
        }
    }

    /// A copy of the current content; `None` before the first [`Self::ensure_surface`].
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.backing
            .as_ref()
            .map(|b| Snapshot::copy_of(b.size, b.pixmap.data_as_u8_slice()))
    }

    /// Drop the backing image and its render context.
    pub fn release(&mut self) {
        if self.backing.take().is_some() {
            tracing::debug!("released backing image");
        }
    }

    pub fn size(&self) -> Option<SurfaceSize> {
        self.backing.as_ref().map(|b| b.size)
    }

    /// Number of backing images allocated so far.
    pub fn allocations(&self) -> u64 {
        self.allocations
    }

    /// Borrowed view of the live backing image, for presentation.
    pub fn view(&self) -> Option<ImageView<'_>> {
        self.backing.as_ref().map(|b| ImageView {
            size: b.size,
            data: b.pixmap.data_as_u8_slice(),
        })
    }
}

/// Pixel ranges `[x0, x1) x [y0, y1)` touched by a stroke, clipped to the surface.
fn dirty_pixels(
    bounds: Rect,
    radius: f64,
    size: SurfaceSize,
) -> Option<(usize, usize, usize, usize)> {
    let r = bounds
        .inflate(radius, radius)
        .intersect(size.bounds())
        .expand();
    if r.width() <= 0.0 || r.height() <= 0.0 {
        return None;
    }
    Some((r.x0 as usize, r.y0 as usize, r.x1 as usize, r.y1 as usize))
}

/// The single location of a path that has segments but no extent (a tap).
///
/// A lone `MoveTo` is not a tap: nothing was drawn yet.
fn tap_point(path: &BezPath) -> Option<kurbo::Point> {
    let els = path.elements();
    if els.len() < 2 {
        return None;
    }
    let bounds = path.bounding_box();
    if bounds.width() > 0.0 || bounds.height() > 0.0 {
        return None;
    }
    Some(bounds.origin())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/raster/compositor.rs"]
mod tests;
