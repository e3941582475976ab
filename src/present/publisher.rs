use crate::raster::snapshot::ImageView;

/// One presentable buffer handed out by the host surface.
///
/// Premultiplied RGBA8, tightly packed, row-major. Its size is whatever the host surface
/// currently is, which may briefly disagree with the backing image during a resize.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl SurfaceBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Copy `src` to the origin, clipped to the overlap.
    pub fn blit(&mut self, src: ImageView<'_>) {
        let copy_w = (self.width.min(src.size.width) as usize) * 4;
        let copy_h = self.height.min(src.size.height) as usize;
        let dst_stride = self.width as usize * 4;
        let src_stride = src.size.width as usize * 4;
        for y in 0..copy_h {
            let d = y * dst_stride;
            let s = y * src_stride;
            self.data[d..d + copy_w].copy_from_slice(&src.data[s..s + copy_w]);
        }
    }
}

/// Buffer primitives supplied by the host surface-lifecycle container.
pub trait SurfaceHost {
    /// Next presentable buffer, or `None` when the surface is not ready (e.g. mid-teardown).
    fn acquire(&mut self) -> Option<SurfaceBuffer>;

    /// Post the buffer to the screen and hand it back to the host.
    fn present(&mut self, buffer: SurfaceBuffer);

    /// Hand the buffer back without showing it.
    fn discard(&mut self, buffer: SurfaceBuffer);
}

/// A buffer borrowed from a [`SurfaceHost`].
///
/// Dropping it without calling [`AcquiredBuffer::present`] returns it through
/// [`SurfaceHost::discard`], so every exit path releases the buffer.
pub struct AcquiredBuffer<'a, H: SurfaceHost + ?Sized> {
    host: &'a mut H,
    buffer: Option<SurfaceBuffer>,
}

impl<'a, H: SurfaceHost + ?Sized> AcquiredBuffer<'a, H> {
    pub fn acquire(host: &'a mut H) -> Option<Self> {
        let buffer = host.acquire()?;
        Some(Self {
            host,
            buffer: Some(buffer),
        })
    }

    pub fn buffer_mut(&mut self) -> &mut SurfaceBuffer {
        // Only `present` and `drop` take the buffer, and both consume the guard.
        self.buffer.get_or_insert_with(|| SurfaceBuffer::new(0, 0))
    }

    pub fn present(mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.host.present(buffer);
        }
    }
}

impl<H: SurfaceHost + ?Sized> Drop for AcquiredBuffer<'_, H> {
    fn drop(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.host.discard(buffer);
        }
    }
}

/// Counters for presentation activity.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PublishStats {
    pub presented: u64,
    pub skipped: u64,
}

/// Mirrors the backing image onto the host surface.
pub struct SurfacePublisher<H: SurfaceHost> {
    host: H,
    stats: PublishStats,
}

impl<H: SurfaceHost> SurfacePublisher<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            stats: PublishStats::default(),
        }
    }

    /// Clear the next buffer, blit `image` at the origin and present it.
    ///
    /// Returns false when no buffer was available; the frame is dropped, not queued.
    pub fn publish(&mut self, image: ImageView<'_>) -> bool {
        let Some(mut frame) = AcquiredBuffer::acquire(&mut self.host) else {
            self.stats.skipped = self.stats.skipped.saturating_add(1);
            tracing::trace!("no presentable buffer; frame skipped");
            return false;
        };
        let buf = frame.buffer_mut();
        buf.clear();
        buf.blit(image);
        frame.present();
        self.stats.presented = self.stats.presented.saturating_add(1);
        true
    }

    /// Present a fully transparent frame.
    pub fn clear_screen(&mut self) -> bool {
        let Some(mut frame) = AcquiredBuffer::acquire(&mut self.host) else {
            self.stats.skipped = self.stats.skipped.saturating_add(1);
            tracing::trace!("no presentable buffer; clear skipped");
            return false;
        };
        frame.buffer_mut().clear();
        frame.present();
        self.stats.presented = self.stats.presented.saturating_add(1);
        true
    }

    pub fn stats(&self) -> PublishStats {
        self.stats
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

#[cfg(test)]
#[path = "../../tests/unit/present/publisher.rs"]
mod tests;
