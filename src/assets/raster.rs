use std::sync::Arc;

use crate::foundation::{
    core::{Rect, Size},
    error::{NeedleError, NeedleResult},
};

#[derive(Clone, Debug)]
/// Owned raster in premultiplied RGBA8 form.
///
/// Every rotated needle frame is its own `Raster`. Clones share the pixel buffer, which
/// is never mutated after construction.
pub struct Raster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl Raster {
    /// Fully transparent raster of the given size.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rgba8_premul: Arc::new(vec![0u8; byte_len(width, height)]),
        }
    }

    /// Wrap premultiplied RGBA8 bytes, checking the buffer length.
    pub fn from_premul_rgba8(width: u32, height: u32, bytes: Vec<u8>) -> NeedleResult<Self> {
        if bytes.len() != byte_len(width, height) {
            return Err(NeedleError::decode(format!(
                "expected {} bytes for {width}x{height} rgba8, got {}",
                byte_len(width, height),
                bytes.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(bytes),
        })
    }

    /// Wrap straight-alpha RGBA8 bytes, premultiplying them.
    pub fn from_straight_rgba8(width: u32, height: u32, mut bytes: Vec<u8>) -> NeedleResult<Self> {
        premultiply_rgba8_in_place(&mut bytes);
        Self::from_premul_rgba8(width, height, bytes)
    }

    /// Size in pixels as a float size.
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Unrotated bounding box anchored at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size((0.0, 0.0), self.size())
    }

    /// `true` when the raster has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Premultiplied pixel at `(x, y)`; transparent outside the raster.
    pub fn pixel(&self, x: i64, y: i64) -> [u8; 4] {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return [0, 0, 0, 0];
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.rgba8_premul[idx..idx + 4];
        [px[0], px[1], px[2], px[3]]
    }

    /// Copy the pixels inside `region` into a standalone raster.
    ///
    /// The region is snapped outwards to whole pixels and clipped to the raster. When it
    /// covers the whole raster the buffer is shared instead of copied.
    pub fn subregion(&self, region: Rect) -> Raster {
        let r = region.expand().intersect(self.bounds());
        let x0 = r.x0.max(0.0) as u32;
        let y0 = r.y0.max(0.0) as u32;
        let x1 = (r.x1.max(0.0) as u32).min(self.width);
        let y1 = (r.y1.max(0.0) as u32).min(self.height);
        if x1 <= x0 || y1 <= y0 {
            return Raster::transparent(0, 0);
        }
        if x0 == 0 && y0 == 0 && x1 == self.width && y1 == self.height {
            return self.clone();
        }

        let w = x1 - x0;
        let h = y1 - y0;
        let stride = self.width as usize * 4;
        let mut out = Vec::with_capacity(byte_len(w, h));
        for y in y0..y1 {
            let start = y as usize * stride + x0 as usize * 4;
            out.extend_from_slice(&self.rgba8_premul[start..start + w as usize * 4]);
        }
        Raster {
            width: w,
            height: h,
            rgba8_premul: Arc::new(out),
        }
    }

    /// `true` when both rasters point at the same pixel buffer.
    pub fn shares_pixels_with(&self, other: &Raster) -> bool {
        Arc::ptr_eq(&self.rgba8_premul, &other.rgba8_premul)
    }

    /// Sum of alpha over all pixels; handy for coverage checks.
    pub fn alpha_sum(&self) -> u64 {
        self.rgba8_premul
            .chunks_exact(4)
            .map(|px| u64::from(px[3]))
            .sum()
    }
}

impl PartialEq for Raster {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && (self.shares_pixels_with(other) || self.rgba8_premul == other.rgba8_premul)
    }
}

impl Eq for Raster {}

pub(crate) fn byte_len(width: u32, height: u32) -> usize {
    (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(4)
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/raster.rs"]
mod tests;
