use crate::present::publisher::{SurfaceBuffer, SurfaceHost};

/// Headless double-buffered [`SurfaceHost`].
///
/// Keeps the last presented buffer as the "screen" and recycles the previous one as the next
/// back buffer. Useful for tests, replays and offscreen hosts.
#[derive(Debug, Default)]
pub struct MemorySurface {
    width: u32,
    height: u32,
    available: bool,
    front: Option<SurfaceBuffer>,
    spare: Option<SurfaceBuffer>,
    presents: u64,
    discards: u64,
}

impl MemorySurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            available: true,
            ..Self::default()
        }
    }

    /// Change the surface dimensions; buffers acquired afterwards have the new size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.spare = None;
    }

    /// Simulate the surface being torn down (or not yet ready).
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// What is currently on screen.
    pub fn front(&self) -> Option<&SurfaceBuffer> {
        self.front.as_ref()
    }

    pub fn presents(&self) -> u64 {
        self.presents
    }

    pub fn discards(&self) -> u64 {
        self.discards
    }

    fn recycle(&mut self, buffer: SurfaceBuffer) {
        if buffer.width == self.width && buffer.height == self.height {
            self.spare = Some(buffer);
        }
    }
}

impl SurfaceHost for MemorySurface {
    fn acquire(&mut self) -> Option<SurfaceBuffer> {
        if !self.available || self.width == 0 || self.height == 0 {
            return None;
        }
        Some(
            self.spare
                .take()
                .unwrap_or_else(|| SurfaceBuffer::new(self.width, self.height)),
        )
    }

    fn present(&mut self, buffer: SurfaceBuffer) {
        self.presents = self.presents.saturating_add(1);
        if let Some(prev) = self.front.replace(buffer) {
            self.recycle(prev);
        }
    }

    fn discard(&mut self, buffer: SurfaceBuffer) {
        self.discards = self.discards.saturating_add(1);
        self.recycle(buffer);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/present/memory.rs"]
mod tests;
