use crate::foundation::core::SurfaceSize;
use crate::foundation::math::unpremultiply;

/// Borrowed premultiplied RGBA8 pixels of the backing image.
#[derive(Clone, Copy, Debug)]
pub struct ImageView<'a> {
    pub size: SurfaceSize,
    pub data: &'a [u8],
}

/// An owned copy of the backing image, taken at a point in time.
///
/// Pixels are premultiplied RGBA8, tightly packed, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Snapshot {
    pub(crate) fn copy_of(size: SurfaceSize, data: &[u8]) -> Self {
        Self {
            width: size.width,
            height: size.height,
            data: data.to_vec(),
        }
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn is_fully_transparent(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Count of pixels with any coverage.
    pub fn painted_pixels(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] != 0).count()
    }

    /// Straight-alpha image for export.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let straight: Vec<u8> = self
            .data
            .chunks_exact(4)
            .flat_map(|px| unpremultiply([px[0], px[1], px[2], px[3]]))
            .collect();
        image::RgbaImage::from_raw(self.width, self.height, straight)
            .unwrap_or_else(|| image::RgbaImage::new(self.width, self.height))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/snapshot.rs"]
mod tests;
